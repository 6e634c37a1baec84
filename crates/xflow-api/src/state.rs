//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use xflow_core::config::AppConfig;
use xflow_service::AdmissionService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Waiting-room admission service
    pub admission: Arc<AdmissionService>,
}
