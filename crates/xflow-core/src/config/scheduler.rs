//! Promotion scheduler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the periodic wait-queue promotion task.
///
/// Read once at startup and handed to the scheduler's constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether ticks promote anything. A disabled scheduler still ticks
    /// and logs that it skipped.
    #[serde(default)]
    pub enabled: bool,
    /// Delay before the first tick, in milliseconds.
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,
    /// Delay between ticks, in milliseconds.
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    /// Maximum number of clients promoted per queue per tick.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
}

impl SchedulerConfig {
    /// Delay before the first tick.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Delay between ticks.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_delay_ms: default_initial_delay(),
            interval_ms: default_interval(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_initial_delay() -> u64 {
    5_000
}

fn default_interval() -> u64 {
    10_000
}

fn default_batch_size() -> u64 {
    3
}
