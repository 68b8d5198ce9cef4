//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use coral_auth::session::manager::AuthManager;
use coral_core::config::AppConfig;
use coral_db::DatabasePool;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool wrapper.
    pub db: DatabasePool,
    /// Session and token lifecycle service.
    pub auth: Arc<AuthManager>,
}
