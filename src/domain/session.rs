// Session domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sessions {
    pub active_session: ActiveSession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub model: String,
    pub tokens_in: f64,
    pub tokens_out: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
}

impl ActiveSession {
    /// Model name without its provider prefix ("anthropic/claude" -> "claude")
    pub fn model_name(&self) -> &str {
        self.model.split('/').nth(1).unwrap_or(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(model: &str) -> ActiveSession {
        ActiveSession {
            model: model.to_string(),
            tokens_in: 0.0,
            tokens_out: 0.0,
            key: None,
            started: None,
        }
    }

    #[test]
    fn test_model_name() {
        assert_eq!(session("anthropic/claude-sonnet-4-5").model_name(), "claude-sonnet-4-5");
        assert_eq!(session("unknown").model_name(), "unknown");
        assert_eq!(session("a/b/c").model_name(), "b");
    }

    #[test]
    fn test_decode_float_token_counts() {
        let sessions: Sessions = serde_json::from_str(
            r#"{"active_session":{"model":"a/b","tokens_in":60000.0,"tokens_out":6000}}"#,
        )
        .unwrap();
        assert_eq!(sessions.active_session.tokens_in, 60000.0);
        assert_eq!(sessions.active_session.tokens_out, 6000.0);
    }
}
