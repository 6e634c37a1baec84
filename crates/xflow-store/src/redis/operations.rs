//! Redis sorted-set store implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use xflow_core::error::{AppError, ErrorKind};
use xflow_core::result::AppResult;
use xflow_core::traits::ordered_set::{OrderedSetStore, ScoredMember};

use super::client::RedisClient;

/// Redis-backed sorted-set store.
///
/// Each trait method issues exactly one Redis command, except
/// [`scan_keys`](OrderedSetStore::scan_keys) which walks the `SCAN` cursor.
#[derive(Debug, Clone)]
pub struct RedisOrderedSetStore {
    /// Redis client.
    client: RedisClient,
    /// `COUNT` hint for each `SCAN` page.
    scan_count: usize,
}

impl RedisOrderedSetStore {
    /// Create a new Redis sorted-set store.
    pub fn new(client: RedisClient, scan_count: usize) -> Self {
        Self {
            client,
            scan_count: scan_count.max(1),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::StoreUnavailable, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl OrderedSetStore for RedisOrderedSetStore {
    async fn add_if_absent(&self, key: &str, member: &str, score: f64) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();

        // ZADD key NX score member
        let added: i64 = redis::cmd("ZADD")
            .arg(key)
            .arg("NX")
            .arg(score)
            .arg(member)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(added > 0)
    }

    async fn add(&self, key: &str, member: &str, score: f64) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let added: i64 = conn.zadd(key, member, score).await.map_err(Self::map_err)?;
        Ok(added > 0)
    }

    async fn rank(&self, key: &str, member: &str) -> AppResult<Option<i64>> {
        let mut conn = self.client.conn_mut();
        let rank: Option<i64> = conn.zrank(key, member).await.map_err(Self::map_err)?;
        Ok(rank)
    }

    async fn pop_lowest(&self, key: &str, count: usize) -> AppResult<Vec<ScoredMember>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.client.conn_mut();
        let popped: Vec<(String, f64)> = conn
            .zpopmin(key, zpopmin_count(count))
            .await
            .map_err(Self::map_err)?;

        debug!(key, requested = count, popped = popped.len(), "ZPOPMIN");
        Ok(popped
            .into_iter()
            .map(|(member, score)| ScoredMember { member, score })
            .collect())
    }

    async fn cardinality(&self, key: &str) -> AppResult<u64> {
        let mut conn = self.client.conn_mut();
        let count: u64 = conn.zcard(key).await.map_err(Self::map_err)?;
        Ok(count)
    }

    async fn scan_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let mut conn = self.client.conn_mut();

        // SCAN may return a key more than once across pages.
        let mut keys = BTreeSet::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, page): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(self.scan_count)
                .query_async(&mut conn)
                .await
                .map_err(Self::map_err)?;

            keys.extend(page);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(pattern, count = keys.len(), "Scanned keys");
        Ok(keys.into_iter().collect())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

/// `ZPOPMIN` count argument; Redis rejects negatives, so oversized requests
/// are clamped instead of wrapping.
fn zpopmin_count(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}
