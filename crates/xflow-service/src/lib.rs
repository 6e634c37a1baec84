//! # xflow-service
//!
//! Business logic for the X-Flow waiting room. [`AdmissionService`] is the
//! single place that registers clients, reports their rank, promotes them
//! out of the wait line, and issues the tokens they present afterwards.
//!
//! Services follow constructor injection: the queue store, token issuer and
//! clock are provided at construction time.

pub mod admission;

pub use admission::{AdmissionService, DigestAlgorithm, TokenIssuer};
