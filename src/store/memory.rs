//! In-Memory Store
//!
//! Shared, thread-safe handle over a [`Keyspace`] implementing [`KeyValueStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{KeyValueStore, Keyspace, SharedStore, StoreStats};

// == Memory Store ==
/// In-process key-value store.
///
/// Cloning is cheap and every clone addresses the same keyspace. Each
/// primitive holds the lock for exactly one keyspace operation, which gives
/// single-key atomicity and per-key append order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    keyspace: Arc<RwLock<Keyspace>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this store as a trait-object handle for the caching layers.
    pub fn shared(&self) -> SharedStore {
        Arc::new(self.clone())
    }

    /// Current keyspace statistics.
    pub async fn stats(&self) -> StoreStats {
        self.keyspace.read().await.stats()
    }

    /// Remaining TTL of a live key.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        self.keyspace.read().await.ttl_remaining(key)
    }

    /// Removes every expired key and returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.keyspace.write().await.cleanup_expired()
    }

    /// Number of keys held, including expired keys not yet purged.
    pub async fn len(&self) -> usize {
        self.keyspace.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keyspace.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        self.keyspace.write().await.incr(key)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: lookups may purge an expired key and update stats
        self.keyspace.write().await.get(key)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.keyspace.write().await.set(key, value, None)
    }

    async fn set_with_expiry(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.keyspace.write().await.set(key, value, Some(ttl))
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<u64> {
        self.keyspace.write().await.rpush(key, value)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        self.keyspace.write().await.lrange(key, start, stop)
    }

    async fn flush(&self) -> Result<()> {
        self.keyspace.write().await.flush();
        Ok(())
    }
}
