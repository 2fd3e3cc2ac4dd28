// HTTP request handlers
use crate::application::refresher::{Phase, UpdatePolicy};
use crate::domain::dashboard::DashboardState;
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::render::render_page;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct StateSnapshot {
    pub phase: Phase,
    pub update_policy: UpdatePolicy,
    #[serde(flatten)]
    pub slots: DashboardState,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Rendered dashboard page
pub async fn dashboard_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    let snapshot = state.refresher.snapshot().await;
    let html = render_page(&snapshot, &state.render_options, &Local);

    match html_response(html, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Current slot values as JSON
pub async fn state_snapshot(State(state): State<Arc<AppState>>) -> Json<StateSnapshot> {
    Json(StateSnapshot {
        phase: state.refresher.phase().await,
        update_policy: state.refresher.policy(),
        slots: state.refresher.snapshot().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_source::{DashboardSource, FetchError};
    use crate::application::refresher::{Refresher, DEFAULT_REFRESH_INTERVAL};
    use crate::domain::resource::Resource;
    use crate::presentation::render::RenderOptions;
    use async_trait::async_trait;
    use axum::http::{header, HeaderValue, StatusCode};
    use serde_json::{json, Value};

    struct StaticSource;

    #[async_trait]
    impl DashboardSource for StaticSource {
        async fn fetch(&self, resource: Resource) -> Result<Value, FetchError> {
            Ok(match resource {
                Resource::Overview => json!({"status": "active", "last_updated": "2024-01-01T00:00:00Z"}),
                Resource::Tasks => json!({"active_projects": [{"id": "KAN-82", "title": "BI Dashboard", "status": "In Progress"}]}),
                Resource::Sessions => json!({"active_session": {"model": "anthropic/claude", "tokens_in": 60000, "tokens_out": 6000}}),
                Resource::Automation => json!({"cron_jobs": []}),
                Resource::Tokens => json!({"daily": []}),
                Resource::Memory => json!({"recent_files": []}),
            })
        }
    }

    fn app_state() -> Arc<AppState> {
        Arc::new(AppState {
            refresher: Arc::new(Refresher::new(
                Arc::new(StaticSource),
                DEFAULT_REFRESH_INTERVAL,
                UpdatePolicy::AllOrNothing,
            )),
            render_options: RenderOptions::default(),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_page_shows_loading_before_first_cycle() {
        let response = dashboard_page(HeaderMap::new(), State(app_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_page_after_refresh() {
        let state = app_state();
        state.refresher.refresh_once().await.unwrap();

        let html = body_text(dashboard_page(HeaderMap::new(), State(state)).await).await;
        assert!(html.contains("<div class=\"status-badge\">active</div>"));
        assert!(html.contains("KAN-82"));
    }

    #[tokio::test]
    async fn test_page_is_compressed_on_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br"));

        let response = dashboard_page(headers, State(app_state())).await;
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }

    #[tokio::test]
    async fn test_state_snapshot() {
        let state = app_state();

        let Json(before) = state_snapshot(State(state.clone())).await;
        assert_eq!(before.phase, Phase::Uninitialized);
        assert!(before.slots.overview.is_none());

        state.refresher.refresh_once().await.unwrap();
        let Json(after) = state_snapshot(State(state)).await;
        let value = serde_json::to_value(&after).unwrap();

        assert_eq!(value["update_policy"], "all_or_nothing");
        assert_eq!(value["overview"]["status"], "active");
        assert_eq!(value["tasks"]["active_projects"][0]["id"], "KAN-82");
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }
}
