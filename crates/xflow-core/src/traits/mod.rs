//! Core traits defined in `xflow-core` and implemented by other crates.

pub mod clock;
pub mod ordered_set;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ordered_set::{OrderedSetStore, ScoredMember};
