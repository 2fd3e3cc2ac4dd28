// Domain layer - Resource payloads and view state
pub mod automation;
pub mod chart;
pub mod dashboard;
pub mod memory;
pub mod overview;
pub mod resource;
pub mod session;
pub mod tasks;
pub mod token_usage;
