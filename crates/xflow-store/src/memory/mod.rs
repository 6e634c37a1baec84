//! In-memory sorted-set backend.

pub mod store;

pub use store::MemoryOrderedSetStore;
