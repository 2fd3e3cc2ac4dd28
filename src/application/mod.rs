// Application layer - Polling use case and its data source seam
pub mod dashboard_source;
pub mod refresher;
