//! Store key builders for the wait and proceed sets of a queue.
//!
//! The layout is shared with external monitoring tooling and must not
//! change: `users:queue:<name>:wait` and `users:queue:<name>:proceed`.

/// Prefix shared by every queue key.
const PREFIX: &str = "users:queue:";

/// Suffix of a wait-set key.
const WAIT_SUFFIX: &str = ":wait";

/// Suffix of a proceed-set key.
const PROCEED_SUFFIX: &str = ":proceed";

/// Glob matching the wait set of every queue.
pub const WAIT_SCAN_PATTERN: &str = "users:queue:*:wait";

/// Key of the sorted set holding clients waiting in `queue`.
pub fn wait_key(queue: &str) -> String {
    format!("{PREFIX}{queue}{WAIT_SUFFIX}")
}

/// Key of the sorted set holding clients promoted out of `queue`.
pub fn proceed_key(queue: &str) -> String {
    format!("{PREFIX}{queue}{PROCEED_SUFFIX}")
}

/// Recover the queue name from a wait-set key.
///
/// Returns `None` for keys outside the wait-set layout.
pub fn queue_from_wait_key(key: &str) -> Option<&str> {
    key.strip_prefix(PREFIX)?.strip_suffix(WAIT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_and_proceed_keys() {
        assert_eq!(wait_key("sale"), "users:queue:sale:wait");
        assert_eq!(proceed_key("sale"), "users:queue:sale:proceed");
    }

    #[test]
    fn test_queue_from_wait_key() {
        assert_eq!(queue_from_wait_key("users:queue:sale:wait"), Some("sale"));
        assert_eq!(queue_from_wait_key(&wait_key("a:b")), Some("a:b"));
        assert_eq!(queue_from_wait_key("users:queue:sale:proceed"), None);
        assert_eq!(queue_from_wait_key("other:sale:wait"), None);
    }
}
