//! Wait-line admission: registration, promotion, and tokens.

pub mod service;
pub mod token;

pub use service::AdmissionService;
pub use token::{DigestAlgorithm, TokenIssuer};
