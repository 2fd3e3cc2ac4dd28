// Source trait for dashboard resource data
use crate::domain::resource::Resource;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} is not valid JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Fetch the current JSON body of a resource.
    ///
    /// Only transport and JSON syntax failures are errors; the HTTP status
    /// of a response is not inspected.
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, FetchError>;
}
