// Overview domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub status: String,
    /// Timestamp as sent by the backend; parsed only when rendered
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_files_count: Option<f64>,
}
