//! Admission token configuration.

use serde::{Deserialize, Serialize};

/// Settings for the deterministic admission token and its cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Fixed prefix hashed in front of `"{queue}-{user_id}"`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Digest algorithm: `"sha256"` or `"sha512"`.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Cookie lifetime in seconds.
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_seconds: i64,
    /// Cookie path.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            algorithm: default_algorithm(),
            cookie_max_age_seconds: default_cookie_max_age(),
            cookie_path: default_cookie_path(),
        }
    }
}

fn default_prefix() -> String {
    "user-queue-".to_string()
}

fn default_algorithm() -> String {
    "sha256".to_string()
}

fn default_cookie_max_age() -> i64 {
    300
}

fn default_cookie_path() -> String {
    "/".to_string()
}
