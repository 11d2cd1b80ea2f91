//! HTTP surface for the form-builder backend.
//!
//! This module provides:
//! - The axum router with permissive CORS for browser clients
//! - Request handlers for form CRUD, submissions, and interview steps
//! - Mapping of application errors onto HTTP statuses and `{detail}` bodies

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::*;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::interview::InterviewEngine;
use crate::storage::SqliteStorage;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// SQLite storage backend.
    pub storage: SqliteStorage,
    /// Interview engine.
    pub engine: InterviewEngine,
}

impl AppState {
    /// Create application state
    pub fn new(config: Config, storage: SqliteStorage, engine: InterviewEngine) -> Self {
        Self {
            config,
            storage,
            engine,
        }
    }
}

/// Shared reference-counted application state.
pub type SharedState = Arc<AppState>;

/// Build the application router.
///
/// CORS is deliberately permissive: the admin dashboard and public form
/// pages are served from other origins. Preflight `OPTIONS` requests are
/// answered by the CORS layer itself.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/forms", get(handlers::list_forms).post(handlers::create_form))
        .route(
            "/forms/{id}",
            get(handlers::get_form)
                .put(handlers::update_form)
                .delete(handlers::delete_form),
        )
        .route(
            "/forms/{id}/submissions",
            get(handlers::list_form_submissions),
        )
        .route("/generate_question", post(handlers::generate_question))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
