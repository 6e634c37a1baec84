//! # xflow-core
//!
//! Core crate for X-Flow. Contains the configuration schemas, the
//! ordered-set store and clock traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other X-Flow crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
