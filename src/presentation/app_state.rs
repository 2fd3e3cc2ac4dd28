// Application state for HTTP handlers
use crate::application::refresher::Refresher;
use crate::presentation::render::RenderOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub refresher: Arc<Refresher>,
    pub render_options: RenderOptions,
}
