//! Wait/proceed queue model over a sorted-set store.
//!
//! A queue named `q` is two sorted sets: clients waiting in `q`, scored by
//! arrival time, and clients promoted out of `q`, scored by promotion time.
//! Every method here is one store call; nothing spans queues or combines
//! calls atomically.

use std::sync::Arc;

use tracing::warn;

use xflow_core::result::AppResult;
use xflow_core::traits::ordered_set::{OrderedSetStore, ScoredMember};

use crate::keys;

/// Per-queue view over an [`OrderedSetStore`].
#[derive(Debug, Clone)]
pub struct QueueStore {
    store: Arc<dyn OrderedSetStore>,
}

impl QueueStore {
    /// Wrap a sorted-set store.
    pub fn new(store: Arc<dyn OrderedSetStore>) -> Self {
        Self { store }
    }

    /// Add `client` to the wait set unless it is already waiting.
    pub async fn join_wait(&self, queue: &str, client: &str, arrived_at: i64) -> AppResult<bool> {
        self.store
            .add_if_absent(&keys::wait_key(queue), client, arrived_at as f64)
            .await
    }

    /// Zero-based position of `client` in the wait set.
    pub async fn wait_rank(&self, queue: &str, client: &str) -> AppResult<Option<i64>> {
        self.store.rank(&keys::wait_key(queue), client).await
    }

    /// Zero-based position of `client` in the proceed set.
    pub async fn proceed_rank(&self, queue: &str, client: &str) -> AppResult<Option<i64>> {
        self.store.rank(&keys::proceed_key(queue), client).await
    }

    /// Remove up to `count` earliest arrivals from the wait set.
    pub async fn pop_waiting(&self, queue: &str, count: usize) -> AppResult<Vec<ScoredMember>> {
        self.store.pop_lowest(&keys::wait_key(queue), count).await
    }

    /// Record `client` in the proceed set.
    pub async fn mark_proceeded(
        &self,
        queue: &str,
        client: &str,
        promoted_at: i64,
    ) -> AppResult<bool> {
        self.store
            .add(&keys::proceed_key(queue), client, promoted_at as f64)
            .await
    }

    /// Number of clients waiting in `queue`.
    pub async fn waiting_len(&self, queue: &str) -> AppResult<u64> {
        self.store.cardinality(&keys::wait_key(queue)).await
    }

    /// Number of clients promoted out of `queue`.
    pub async fn proceeded_len(&self, queue: &str) -> AppResult<u64> {
        self.store.cardinality(&keys::proceed_key(queue)).await
    }

    /// Names of every queue that currently has a wait set.
    pub async fn discover_queues(&self) -> AppResult<Vec<String>> {
        let keys = self.store.scan_keys(keys::WAIT_SCAN_PATTERN).await?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                let queue = keys::queue_from_wait_key(key);
                if queue.is_none() {
                    warn!(key = %key, "Skipping key outside the wait-set layout");
                }
                queue.map(str::to_string)
            })
            .collect())
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }
}
