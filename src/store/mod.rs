//! Store Module
//!
//! The key-value store collaborator contract plus an in-memory implementation
//! with lazy TTL expiration.

mod entry;
mod keyspace;
mod memory;
mod stats;


use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{StoreEntry, StoredData};
pub use keyspace::Keyspace;
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Key-Value Store ==
/// Primitive operations required from the backing key-value store.
///
/// Every call is a single round-trip and atomic at the level of one key.
/// Implementations must preserve per-key append order for `rpush` under
/// concurrent callers. Backend failures surface as
/// [`CacheError::StoreUnavailable`](crate::error::CacheError::StoreUnavailable).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Atomically increments the integer at `key`, treating a missing key as 0.
    ///
    /// Returns the value after the increment.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Returns the bytes stored at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` at `key`, overwriting any previous value and expiry.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Stores `value` at `key` with a time-to-live.
    async fn set_with_expiry(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Appends `value` to the list at `key` and returns the new length.
    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<u64>;

    /// Returns the inclusive range `start..=stop` of the list at `key`.
    ///
    /// Negative indexes count from the tail, so `(0, -1)` is the full list.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key.
    async fn flush(&self) -> Result<()>;
}

/// Store handle shared by every component that talks to the same keyspace.
pub type SharedStore = Arc<dyn KeyValueStore>;
