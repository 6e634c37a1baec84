//! Sorted-set store trait for pluggable queue backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A member popped from a sorted set together with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMember {
    /// Member value.
    pub member: String,
    /// Score the member held when it was removed.
    pub score: f64,
}

/// Trait for sorted-set backends (Redis or in-memory).
///
/// Members of a set are unique and ordered by ascending score, ties broken
/// lexicographically by member. Every method is atomic on its own; callers
/// get no guarantee across calls. Any transport or protocol failure is
/// reported as [`ErrorKind::StoreUnavailable`](crate::error::ErrorKind).
#[async_trait]
pub trait OrderedSetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert `member` with `score` only if it is not already in the set.
    /// Returns `false` without touching the existing score otherwise.
    async fn add_if_absent(&self, key: &str, member: &str, score: f64) -> AppResult<bool>;

    /// Insert `member` or update its score. Returns `true` if it was new.
    async fn add(&self, key: &str, member: &str, score: f64) -> AppResult<bool>;

    /// Zero-based position of `member` in ascending score order.
    async fn rank(&self, key: &str, member: &str) -> AppResult<Option<i64>>;

    /// Remove and return up to `count` lowest-scored members, lowest first.
    async fn pop_lowest(&self, key: &str, count: usize) -> AppResult<Vec<ScoredMember>>;

    /// Number of members in the set; `0` for a missing key.
    async fn cardinality(&self, key: &str) -> AppResult<u64>;

    /// All keys matching a glob `pattern` (e.g., `"users:queue:*:wait"`).
    async fn scan_keys(&self, pattern: &str) -> AppResult<Vec<String>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
