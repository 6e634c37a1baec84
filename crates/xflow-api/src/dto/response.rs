//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Registration result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    /// 1-based position in the wait line.
    pub rank: i64,
}

/// Manual promotion result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowUserResponse {
    /// Number of clients asked for.
    pub requested_count: u64,
    /// Number of clients actually promoted.
    pub allowed_count: u64,
}

/// Token check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowedUserResponse {
    /// Whether the token matches the queue and client.
    pub allowed: bool,
}

/// Rank lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankNumberResponse {
    /// 1-based position in the wait line, `-1` when not waiting.
    pub rank: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `"connected"` or `"unreachable"`.
    pub store: String,
}
