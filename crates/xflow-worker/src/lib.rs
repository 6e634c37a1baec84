//! Background promotion for X-Flow.
//!
//! This crate provides the [`PromotionScheduler`], a process-wide task that
//! periodically discovers every active wait queue and promotes a bounded
//! batch of clients out of each.

pub mod scheduler;

pub use scheduler::{PromotionScheduler, QueueOutcome, TickReport};
