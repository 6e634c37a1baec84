//! Route definitions for the X-Flow HTTP API.
//!
//! Queue routes live under `/api/v1/queue`; the health probe under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(queue_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Waiting-room endpoints
fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/queue", post(handlers::queue::register))
        .route("/api/v1/queue/allow", post(handlers::queue::allow))
        .route("/api/v1/queue/allowed", get(handlers::queue::allowed))
        .route("/api/v1/queue/rank", get(handlers::queue::rank))
        .route("/api/v1/queue/touch", get(handlers::queue::touch))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(handlers::health::health))
}
