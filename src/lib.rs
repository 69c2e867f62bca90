//! Compstate HTTP - read-only JSON view of a competition's state
//!
//! This library serves arenas, teams, locations, the match schedule and the
//! current state of play from an exported competition snapshot. Match lists
//! support range filters and a directional limit.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{encode, parse_difference_string, MatchFilterSet, RangePredicate};
pub use error::ApiError;
pub use models::{CompState, Match, MatchQuery};
pub use routes::AppState;
pub use services::CompstateManager;

use actix_web::web;

/// Mount the API routes and shared state
///
/// Unmatched paths are left to the caller's `App::default_service`, normally
/// [`error::not_found`].
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::QueryConfig::default().error_handler(error::handle_query_payload_error))
            .configure(routes::configure_routes);
    }
}
