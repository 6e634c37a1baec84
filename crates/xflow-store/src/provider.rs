//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use xflow_core::config::StoreConfig;
use xflow_core::error::AppError;
use xflow_core::result::AppResult;
use xflow_core::traits::ordered_set::{OrderedSetStore, ScoredMember};

/// Store manager that wraps the configured sorted-set backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store backend.
    inner: Arc<dyn OrderedSetStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn OrderedSetStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis sorted-set store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisOrderedSetStore::new(
                    client,
                    config.redis.scan_count,
                ))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory sorted-set store");
                Arc::new(crate::memory::MemoryOrderedSetStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing backend (for testing).
    pub fn from_provider(provider: Arc<dyn OrderedSetStore>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl OrderedSetStore for StoreManager {
    async fn add_if_absent(&self, key: &str, member: &str, score: f64) -> AppResult<bool> {
        self.inner.add_if_absent(key, member, score).await
    }

    async fn add(&self, key: &str, member: &str, score: f64) -> AppResult<bool> {
        self.inner.add(key, member, score).await
    }

    async fn rank(&self, key: &str, member: &str) -> AppResult<Option<i64>> {
        self.inner.rank(key, member).await
    }

    async fn pop_lowest(&self, key: &str, count: usize) -> AppResult<Vec<ScoredMember>> {
        self.inner.pop_lowest(key, count).await
    }

    async fn cardinality(&self, key: &str) -> AppResult<u64> {
        self.inner.cardinality(key).await
    }

    async fn scan_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        self.inner.scan_keys(pattern).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use xflow_core::error::ErrorKind;

    #[tokio::test]
    async fn test_memory_provider() {
        let config = StoreConfig {
            provider: "memory".to_string(),
            ..StoreConfig::default()
        };
        let store = StoreManager::new(&config).await.unwrap();
        assert!(store.health_check().await.unwrap());
        assert!(store.add_if_absent("k", "m", 1.0).await.unwrap());
        assert_eq!(store.cardinality("k").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = StoreConfig {
            provider: "etcd".to_string(),
            ..StoreConfig::default()
        };
        let err = StoreManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
