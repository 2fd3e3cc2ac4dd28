// Token usage domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetrics {
    pub daily: Vec<DailyTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_session: Option<SessionBudget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTokens {
    pub date: String,
    pub tokens_in: f64,
    pub tokens_out: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBudget {
    pub tokens_in: f64,
    pub tokens_out: f64,
    pub budget: f64,
    pub usage_pct: f64,
}
