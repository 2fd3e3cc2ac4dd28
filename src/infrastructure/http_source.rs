// HTTP implementation of the dashboard source
use crate::application::dashboard_source::{DashboardSource, FetchError};
use crate::domain::resource::Resource;
use crate::infrastructure::config::endpoint_url;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDashboardSource {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("openclaw-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, FetchError> {
        let url = endpoint_url(&self.base_url, resource.path());

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        // Error statuses are decoded like any other response
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered with status {}", url, status);
        }

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Json { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: String) -> HttpDashboardSource {
        HttpDashboardSource::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_json_body() {
        let router = Router::new().route(
            "/api/metrics/tokens",
            get(|| async { Json(json!({"daily": [{"date": "2026-02-01", "tokens_in": 1, "tokens_out": 2}]})) }),
        );
        let source = source(format!("{}/", serve(router).await));

        let body = source.fetch(Resource::Tokens).await.unwrap();
        assert_eq!(body["daily"][0]["tokens_out"], 2);
    }

    #[tokio::test]
    async fn test_error_status_is_still_decoded() {
        let router = Router::new().route(
            "/api/overview",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "boom"})),
                )
            }),
        );
        let source = source(serve(router).await);

        let body = source.fetch(Resource::Overview).await.unwrap();
        assert_eq!(body, json!({"detail": "boom"}));
    }

    #[tokio::test]
    async fn test_non_json_body_is_rejected() {
        let router = Router::new().route("/api/tasks", get(|| async { "<html>oops</html>" }));
        let source = source(serve(router).await);

        let err = source.fetch(Resource::Tasks).await.unwrap_err();
        assert!(matches!(err, FetchError::Json { .. }));
        assert!(err.to_string().contains("/api/tasks"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source(format!("http://{}", addr));
        let err = source.fetch(Resource::Memory).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }
}
