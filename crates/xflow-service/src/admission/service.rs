//! Admission service: the business logic of the waiting room.

use std::sync::Arc;

use tracing::{debug, info, warn};

use xflow_core::error::AppError;
use xflow_core::result::AppResult;
use xflow_core::traits::clock::Clock;
use xflow_store::QueueStore;

use super::token::TokenIssuer;

/// Rank reported for a client that is not waiting.
pub const NOT_WAITING: i64 = -1;

/// Registers clients, reports ranks, promotes batches, and issues tokens.
///
/// Holds no queue state of its own; every answer comes from the store.
#[derive(Debug, Clone)]
pub struct AdmissionService {
    /// Wait/proceed queue model.
    queues: QueueStore,
    /// Admission token issuer.
    tokens: TokenIssuer,
    /// Source of arrival and promotion timestamps.
    clock: Arc<dyn Clock>,
}

impl AdmissionService {
    /// Creates a new admission service.
    pub fn new(queues: QueueStore, tokens: TokenIssuer, clock: Arc<dyn Clock>) -> Self {
        Self {
            queues,
            tokens,
            clock,
        }
    }

    /// Adds `client` to the wait line of `queue` and returns its 1-based rank.
    ///
    /// Fails with `AlreadyRegistered` without touching the existing entry if
    /// the client is already waiting.
    pub async fn register(&self, queue: &str, client: &str) -> AppResult<i64> {
        let arrived_at = self.clock.now_epoch_seconds();

        if !self.queues.join_wait(queue, client, arrived_at).await? {
            debug!(queue, client, "Client already waiting");
            return Err(AppError::already_registered(format!(
                "Client '{client}' is already waiting in queue '{queue}'"
            )));
        }

        let rank = to_position(self.queues.wait_rank(queue, client).await?);
        info!(queue, client, rank, "Client registered");
        Ok(rank)
    }

    /// Moves up to `count` earliest arrivals from the wait line into the
    /// proceed set and returns how many were moved.
    ///
    /// An empty wait line promotes nothing. The pop and the inserts are
    /// separate store calls: if an insert fails, the clients already popped
    /// are not put back.
    pub async fn promote(&self, queue: &str, count: u64) -> AppResult<u64> {
        let popped = self
            .queues
            .pop_waiting(queue, usize::try_from(count).unwrap_or(usize::MAX))
            .await?;

        let promoted_at = self.clock.now_epoch_seconds();
        let mut promoted = 0u64;
        for entry in &popped {
            if let Err(e) = self
                .queues
                .mark_proceeded(queue, &entry.member, promoted_at)
                .await
            {
                warn!(
                    queue,
                    promoted,
                    lost = popped.len() as u64 - promoted,
                    "Promotion interrupted after pop: {}",
                    e
                );
                return Err(e);
            }
            promoted += 1;
        }

        if promoted > 0 {
            info!(queue, requested = count, promoted, "Clients promoted");
        }
        Ok(promoted)
    }

    /// Whether `client` has been promoted out of `queue`.
    pub async fn is_admitted(&self, queue: &str, client: &str) -> AppResult<bool> {
        Ok(self.queues.proceed_rank(queue, client).await?.is_some())
    }

    /// 1-based position of `client` in the wait line, or `-1` if not waiting.
    pub async fn rank(&self, queue: &str, client: &str) -> AppResult<i64> {
        Ok(to_position(self.queues.wait_rank(queue, client).await?))
    }

    /// Admission token for `client` in `queue`.
    pub fn issue_token(&self, queue: &str, client: &str) -> String {
        self.tokens.issue(queue, client)
    }

    /// Whether `candidate` matches the token for (`queue`, `client`).
    ///
    /// This does not consult the proceed set: a valid token only shows the
    /// caller holds the token issued for that pair. Combine with
    /// [`is_admitted`](Self::is_admitted) for an admission decision.
    pub fn verify_token(&self, queue: &str, client: &str, candidate: &str) -> bool {
        self.tokens.verify(queue, client, candidate)
    }

    /// Names of every queue with clients waiting.
    pub async fn active_queues(&self) -> AppResult<Vec<String>> {
        self.queues.discover_queues().await
    }

    /// Number of clients waiting in `queue`.
    pub async fn waiting_count(&self, queue: &str) -> AppResult<u64> {
        self.queues.waiting_len(queue).await
    }

    /// Number of clients promoted out of `queue`.
    pub async fn admitted_count(&self, queue: &str) -> AppResult<u64> {
        self.queues.proceeded_len(queue).await
    }

    /// Whether the backing store answers.
    pub async fn store_healthy(&self) -> AppResult<bool> {
        self.queues.health_check().await
    }
}

/// Zero-based store rank to the 1-based position shown to clients.
fn to_position(rank: Option<i64>) -> i64 {
    match rank {
        Some(r) if r >= 0 => r + 1,
        _ => NOT_WAITING,
    }
}
