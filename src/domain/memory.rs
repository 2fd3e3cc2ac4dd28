// Memory file domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySummary {
    pub recent_files: Vec<MemoryFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryFile {
    pub name: String,
    /// Size in bytes
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl MemoryFile {
    pub fn size_kib(&self) -> f64 {
        self.size / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_kib() {
        let file = MemoryFile {
            name: "2026-02-01.md".to_string(),
            size: 2048.0,
            modified: None,
        };
        assert_eq!(file.size_kib(), 2.0);
    }

    #[test]
    fn test_decode_float_size() {
        let summary: MemorySummary =
            serde_json::from_str(r#"{"recent_files":[{"name":"a.md","size":1536.0}]}"#).unwrap();
        assert_eq!(summary.recent_files[0].size_kib(), 1.5);
    }
}
