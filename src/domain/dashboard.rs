// Dashboard view state - one slot per polled resource
use super::automation::Automation;
use super::memory::MemorySummary;
use super::overview::Overview;
use super::resource::Resource;
use super::session::Sessions;
use super::tasks::TaskList;
use super::token_usage::TokenMetrics;
use serde::Serialize;

/// Latest successfully fetched value of every resource.
///
/// A slot is `None` until the first cycle that publishes it and is only
/// ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub overview: Option<Overview>,
    pub tasks: Option<TaskList>,
    pub sessions: Option<Sessions>,
    pub automation: Option<Automation>,
    pub tokens: Option<TokenMetrics>,
    pub memory: Option<MemorySummary>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page shows its loading placeholder until the overview arrives
    pub fn is_loading(&self) -> bool {
        self.overview.is_none()
    }

    pub fn apply(&mut self, update: SlotUpdate) {
        match update {
            SlotUpdate::Overview(v) => self.overview = Some(v),
            SlotUpdate::Tasks(v) => self.tasks = Some(v),
            SlotUpdate::Sessions(v) => self.sessions = Some(v),
            SlotUpdate::Automation(v) => self.automation = Some(v),
            SlotUpdate::Tokens(v) => self.tokens = Some(v),
            SlotUpdate::Memory(v) => self.memory = Some(v),
        }
    }
}

/// A decoded payload destined for exactly one slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotUpdate {
    Overview(Overview),
    Tasks(TaskList),
    Sessions(Sessions),
    Automation(Automation),
    Tokens(TokenMetrics),
    Memory(MemorySummary),
}

impl SlotUpdate {
    /// Decode a JSON body into the payload type of `resource`
    pub fn decode(resource: Resource, body: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match resource {
            Resource::Overview => SlotUpdate::Overview(serde_json::from_value(body)?),
            Resource::Tasks => SlotUpdate::Tasks(serde_json::from_value(body)?),
            Resource::Sessions => SlotUpdate::Sessions(serde_json::from_value(body)?),
            Resource::Automation => SlotUpdate::Automation(serde_json::from_value(body)?),
            Resource::Tokens => SlotUpdate::Tokens(serde_json::from_value(body)?),
            Resource::Memory => SlotUpdate::Memory(serde_json::from_value(body)?),
        })
    }

    pub fn resource(&self) -> Resource {
        match self {
            SlotUpdate::Overview(_) => Resource::Overview,
            SlotUpdate::Tasks(_) => Resource::Tasks,
            SlotUpdate::Sessions(_) => Resource::Sessions,
            SlotUpdate::Automation(_) => Resource::Automation,
            SlotUpdate::Tokens(_) => Resource::Tokens,
            SlotUpdate::Memory(_) => Resource::Memory,
        }
    }
}
