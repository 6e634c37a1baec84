//! # xflow-store
//!
//! Queue model and sorted-set store backends for X-Flow. Supports two
//! backends:
//!
//! - **memory**: In-process sorted sets sharded with [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis sorted sets using the [redis](https://crates.io/crates/redis) crate
//!
//! The backend is selected at runtime based on configuration. On top of the
//! raw [`OrderedSetStore`](xflow_core::traits::OrderedSetStore) sits
//! [`QueueStore`], which maps a queue name onto its wait and proceed sets.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
pub mod queue;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
pub use queue::QueueStore;
