//! Periodic promotion of every active wait queue.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::watch;
use tokio::time;
use tracing;

use xflow_core::config::SchedulerConfig;
use xflow_service::AdmissionService;

/// What happened to a single queue during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum QueueOutcome {
    /// Promotion ran and moved this many clients.
    Promoted {
        /// Number of clients moved to the proceed set.
        count: u64,
    },
    /// Promotion failed and the queue was skipped for this tick.
    Failed {
        /// Error message.
        error: String,
    },
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickReport {
    /// `true` when the scheduler is disabled and did nothing.
    pub skipped: bool,
    /// Per-queue outcome, keyed by queue name.
    pub queues: BTreeMap<String, QueueOutcome>,
}

impl TickReport {
    /// Clients promoted from `queue` in this tick, if it was processed
    /// successfully.
    pub fn promoted(&self, queue: &str) -> Option<u64> {
        match self.queues.get(queue)? {
            QueueOutcome::Promoted { count } => Some(*count),
            QueueOutcome::Failed { .. } => None,
        }
    }

    /// Clients promoted across all queues.
    pub fn total_promoted(&self) -> u64 {
        self.queues.keys().filter_map(|q| self.promoted(q)).sum()
    }

    /// Number of queues whose promotion failed.
    pub fn failed(&self) -> usize {
        self.queues
            .values()
            .filter(|o| matches!(o, QueueOutcome::Failed { .. }))
            .count()
    }
}

/// Promotes a fixed batch from every active queue at a fixed period.
///
/// Holds the admission service and its own configuration; it never reads
/// ambient state. A disabled scheduler still ticks and logs each skip so
/// that a missing `enabled = true` shows up in the logs.
#[derive(Debug)]
pub struct PromotionScheduler {
    /// Admission service providing discovery and promotion.
    admission: Arc<AdmissionService>,
    /// Scheduler configuration, read once at startup.
    config: SchedulerConfig,
}

impl PromotionScheduler {
    /// Create a new promotion scheduler
    pub fn new(admission: Arc<AdmissionService>, config: SchedulerConfig) -> Self {
        Self { admission, config }
    }

    /// Whether ticks promote anything
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Run one discovery-and-promote pass.
    ///
    /// Queues are promoted concurrently and independently: a failing queue
    /// is logged and recorded in the report without stopping the others.
    pub async fn tick(&self) -> TickReport {
        if !self.config.enabled {
            tracing::info!("Promotion scheduler disabled, skipping tick");
            return TickReport {
                skipped: true,
                ..TickReport::default()
            };
        }

        tracing::info!("Promotion tick started");

        let queues = match self.admission.active_queues().await {
            Ok(queues) => queues,
            Err(e) => {
                tracing::error!("Failed to discover wait queues: {}", e);
                return TickReport::default();
            }
        };

        let batch = self.config.batch_size;
        let results = join_all(queues.into_iter().map(|queue| async move {
            let outcome = match self.admission.promote(&queue, batch).await {
                Ok(count) => {
                    tracing::info!(
                        "Tried {} and allowed {} members of {} queue",
                        batch,
                        count,
                        queue
                    );
                    QueueOutcome::Promoted { count }
                }
                Err(e) => {
                    tracing::warn!("Promotion of queue '{}' failed, skipping: {}", queue, e);
                    QueueOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            (queue, outcome)
        }))
        .await;

        let report = TickReport {
            skipped: false,
            queues: results.into_iter().collect(),
        };

        tracing::debug!(
            queues = report.queues.len(),
            promoted = report.total_promoted(),
            failed = report.failed(),
            "Promotion tick finished"
        );
        report
    }

    /// Start the scheduler loop (runs until the cancel signal is received).
    ///
    /// The first tick fires after the initial delay; each following tick
    /// fires one interval after the previous one finished.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Promotion scheduler started: enabled={}, initial_delay={}ms, interval={}ms, batch_size={}",
            self.config.enabled,
            self.config.initial_delay_ms,
            self.config.interval_ms,
            self.config.batch_size
        );

        let mut delay = self.config.initial_delay();
        loop {
            if !wait_or_cancel(delay, &mut cancel).await {
                break;
            }
            self.tick().await;
            delay = self.config.interval();
        }

        tracing::info!("Promotion scheduler shut down");
    }
}

/// Sleep for `delay`; returns `false` if cancelled first.
async fn wait_or_cancel(delay: Duration, cancel: &mut watch::Receiver<bool>) -> bool {
    if *cancel.borrow() {
        return false;
    }

    tokio::select! {
        _ = time::sleep(delay) => true,
        changed = cancel.changed() => match changed {
            Ok(()) => !*cancel.borrow(),
            // Sender dropped: nobody can ask for shutdown anymore, so stop.
            Err(_) => false,
        },
    }
}
