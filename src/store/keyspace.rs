//! Keyspace Module
//!
//! Single-owner storage engine: string and list values with lazy TTL expiration.

use std::collections::HashMap;

use tokio::time::Duration;

use crate::error::{CacheError, Result};
use crate::store::{StoreEntry, StoredData, StoreStats};

// == Keyspace ==
/// Map of keys to entries with Redis-like string and list primitives.
///
/// Expired entries are dropped the first time they are touched, so callers
/// never observe a value past its deadline even before a sweep runs.
#[derive(Debug, Default)]
pub struct Keyspace {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
    /// Lookup statistics
    stats: StoreStats,
}

impl Keyspace {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Incr ==
    /// Increments the integer stored at `key`, starting from 0 when absent.
    ///
    /// An existing TTL on the key is preserved.
    pub fn incr(&mut self, key: &str) -> Result<i64> {
        self.purge_if_expired(key);

        let Some(entry) = self.entries.get_mut(key) else {
            self.entries.insert(
                key.to_string(),
                StoreEntry::new(StoredData::Bytes(b"1".to_vec()), None),
            );
            return Ok(1);
        };

        let StoredData::Bytes(bytes) = &mut entry.data else {
            return Err(CacheError::WrongType(key.to_string()));
        };

        let current = std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| {
                CacheError::InvalidRequest(format!("Value at '{}' is not an integer", key))
            })?;
        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::InvalidRequest(format!("Increment of '{}' would overflow", key))
        })?;

        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    // == Get ==
    /// Returns the bytes at `key`, or None if the key is absent or expired.
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        self.purge_if_expired(key);

        match self.entries.get(key).map(|entry| &entry.data) {
            Some(StoredData::Bytes(bytes)) => {
                let value = bytes.clone();
                self.stats.record_hit();
                Ok(Some(value))
            }
            Some(StoredData::List(_)) => Err(CacheError::WrongType(key.to_string())),
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Stores a byte value with optional TTL, replacing any previous entry.
    ///
    /// A zero TTL is rejected rather than creating an entry that is born dead.
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        if ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(CacheError::InvalidRequest(format!(
                "Invalid expire time for '{}'",
                key
            )));
        }

        self.entries.insert(
            key.to_string(),
            StoreEntry::new(StoredData::Bytes(value), ttl),
        );
        Ok(())
    }

    // == Rpush ==
    /// Appends to the list at `key`, creating it when absent.
    ///
    /// Returns the list length after the append.
    pub fn rpush(&mut self, key: &str, value: Vec<u8>) -> Result<u64> {
        self.purge_if_expired(key);

        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::new(StoredData::List(Vec::new()), None));

        match &mut entry.data {
            StoredData::List(items) => {
                items.push(value);
                Ok(items.len() as u64)
            }
            StoredData::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
        }
    }

    // == Lrange ==
    /// Returns the inclusive slice `start..=stop` of the list at `key`.
    ///
    /// A missing key reads as an empty list.
    pub fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        self.purge_if_expired(key);

        match self.entries.get(key).map(|entry| &entry.data) {
            Some(StoredData::List(items)) => Ok(list_range(items, start, stop).to_vec()),
            Some(StoredData::Bytes(_)) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    // == Flush ==
    /// Drops every key. Statistics are kept.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    // == Time To Live ==
    /// Remaining TTL of a live key; None when the key is absent or has no expiry.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(StoreEntry::ttl_remaining)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_keys(self.entries.len());
        stats
    }

    /// Number of keys currently held, including expired keys not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_if_expired(&mut self, key: &str) {
        if self.entries.get(key).is_some_and(StoreEntry::is_expired) {
            self.entries.remove(key);
            self.stats.record_expired(1);
        }
    }
}

/// Resolves Redis-style inclusive indexes against a list.
pub(crate) fn list_range(items: &[Vec<u8>], start: i64, stop: i64) -> &[Vec<u8>] {
    let len = items.len() as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        return &[];
    }
    &items[start as usize..=stop as usize]
}
