// Presentation layer - HTTP handlers and page rendering
pub mod app_state;
pub mod chart_svg;
pub mod handlers;
pub mod render;
