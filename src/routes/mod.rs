// Route exports
pub mod matches;
pub mod resources;

use actix_web::web;
use std::sync::Arc;

use crate::services::{Clock, CompstateManager};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub compstate: Arc<CompstateManager>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(compstate: CompstateManager, clock: impl Clock + 'static) -> Self {
        Self {
            compstate: Arc::new(compstate),
            clock: Arc::new(clock),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(resources::configure)
        .configure(matches::configure);
}
