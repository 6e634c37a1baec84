//! Deterministic admission tokens.
//!
//! A token is the hex digest of `"{prefix}{queue}-{client}"`. It carries no
//! expiry and no server-side state; the same pair always yields the same
//! token. Verifying a token only proves the caller knows the (queue, client)
//! pair it was issued for. Whether that client was actually promoted is a
//! separate check against the proceed set.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha512};

use xflow_core::config::TokenConfig;
use xflow_core::error::AppError;
use xflow_core::result::AppResult;

/// Supported token digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256, 64 hex characters.
    Sha256,
    /// SHA-512, 128 hex characters.
    Sha512,
}

impl FromStr for DigestAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(AppError::digest_unavailable(format!(
                "Unsupported token digest algorithm: '{other}'. Supported: sha256, sha512"
            ))),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Sha512 => write!(f, "sha512"),
        }
    }
}

/// Issues and verifies admission tokens.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    prefix: String,
    algorithm: DigestAlgorithm,
}

impl TokenIssuer {
    /// Build an issuer from configuration.
    ///
    /// Fails with `DigestUnavailable` when the configured algorithm is not
    /// supported; callers treat that as fatal at startup.
    pub fn new(config: &TokenConfig) -> AppResult<Self> {
        Ok(Self {
            prefix: config.prefix.clone(),
            algorithm: config.algorithm.parse()?,
        })
    }

    /// Digest algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Token for `client` in `queue`, as lowercase hex.
    pub fn issue(&self, queue: &str, client: &str) -> String {
        let input = format!("{}{queue}-{client}", self.prefix);
        match self.algorithm {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(input.as_bytes())),
        }
    }

    /// Whether `candidate` is the token for `client` in `queue`, ignoring case.
    pub fn verify(&self, queue: &str, client: &str, candidate: &str) -> bool {
        self.issue(queue, client).eq_ignore_ascii_case(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xflow_core::error::ErrorKind;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&TokenConfig::default()).unwrap()
    }

    #[test]
    fn test_known_sha256_token() {
        assert_eq!(
            issuer().issue("sale", "1"),
            "769133492f21d7b78dd3bb7a7a8609876f069c1994006c94c87129e154629729"
        );
        assert_eq!(
            issuer().issue("default", "100"),
            "d333a5d4eb24f3f5cdd767d79b8c01aad3cd73d3537c70dec430455d37afe4b8"
        );
    }

    #[test]
    fn test_token_is_deterministic_and_pair_bound() {
        let tokens = issuer();
        let token = tokens.issue("sale", "1");
        assert_eq!(token, tokens.issue("sale", "1"));
        assert_eq!(token.len(), 64);
        assert_ne!(token, tokens.issue("sale", "2"));
        assert_ne!(token, tokens.issue("sales", "1"));
    }

    #[test]
    fn test_verify_ignores_case() {
        let tokens = issuer();
        let token = tokens.issue("sale", "1");
        assert!(tokens.verify("sale", "1", &token));
        assert!(tokens.verify("sale", "1", &token.to_uppercase()));
        assert!(!tokens.verify("sale", "2", &token));
        assert!(!tokens.verify("sale", "1", ""));
    }

    #[test]
    fn test_sha512() {
        let config = TokenConfig {
            algorithm: "SHA-512".to_string(),
            ..TokenConfig::default()
        };
        let tokens = TokenIssuer::new(&config).unwrap();
        assert_eq!(tokens.algorithm(), DigestAlgorithm::Sha512);
        assert_eq!(
            tokens.issue("sale", "1"),
            "7c142e165b7de554509d4662c68d9d7cf4ae3b4b9136d4e21ffdee592c24bf18295d8482cf6e8dc739bb8b406bf9a0053ab946e2d9288ca001fa06d5fbc2d1ad"
        );
    }

    #[test]
    fn test_unknown_algorithm_is_digest_unavailable() {
        let config = TokenConfig {
            algorithm: "md4".to_string(),
            ..TokenConfig::default()
        };
        let err = TokenIssuer::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DigestUnavailable);
    }
}
