//! Query-parameter DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Queue used when the caller does not name one.
pub const DEFAULT_QUEUE: &str = "default";

fn default_queue() -> String {
    DEFAULT_QUEUE.to_string()
}

/// `POST /api/v1/queue` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterQuery {
    /// Queue name.
    #[serde(default = "default_queue")]
    #[validate(length(min = 1, max = 256, message = "Queue name must be 1-256 characters"))]
    pub queue: String,
    /// Client identifier.
    pub user_id: i64,
}

/// `POST /api/v1/queue/allow` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AllowQuery {
    /// Queue name.
    #[serde(default = "default_queue")]
    #[validate(length(min = 1, max = 256, message = "Queue name must be 1-256 characters"))]
    pub queue: String,
    /// Maximum number of clients to promote.
    pub count: u64,
}

/// `GET /api/v1/queue/allowed` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AllowedQuery {
    /// Queue name.
    #[serde(default = "default_queue")]
    #[validate(length(min = 1, max = 256, message = "Queue name must be 1-256 characters"))]
    pub queue: String,
    /// Client identifier.
    pub user_id: i64,
    /// Token previously returned by `/touch`.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Parameters shared by `GET /api/v1/queue/rank` and `GET /api/v1/queue/touch`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientQuery {
    /// Queue name.
    #[serde(default = "default_queue")]
    #[validate(length(min = 1, max = 256, message = "Queue name must be 1-256 characters"))]
    pub queue: String,
    /// Client identifier.
    pub user_id: i64,
}
