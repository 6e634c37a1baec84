//! # xflow-api
//!
//! HTTP API layer for X-Flow built on Axum.
//!
//! Exposes the waiting-room operations as query-parameter endpoints under
//! `/api/v1/queue`, delivers admission tokens as cookies, and maps
//! [`AppError`](xflow_core::AppError) to JSON error responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
