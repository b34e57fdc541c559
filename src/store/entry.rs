//! Store Entry Module
//!
//! Defines the structure for individual keyspace entries with TTL support.

use tokio::time::{Duration, Instant};

// == Stored Data ==
/// The value held under a key: a plain byte string or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredData {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

impl StoredData {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredData::Bytes(_) => "string",
            StoredData::List(_) => "list",
        }
    }
}

// == Store Entry ==
/// Represents a single keyspace entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored value
    pub data: StoredData,
    /// Creation instant
    pub created_at: Instant,
    /// Expiration deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// # Arguments
    /// * `data` - The value to store
    /// * `ttl` - Optional time-to-live measured from now
    pub fn new(data: StoredData, ttl: Option<Duration>) -> Self {
        let now = Instant::now();

        Self {
            data,
            created_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant is greater than or equal
    /// to its deadline, so a fully elapsed TTL never yields a live entry.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn bytes(value: &str) -> StoredData {
        StoredData::Bytes(value.as_bytes().to_vec())
    }

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = StoreEntry::new(bytes("test_value"), None);

        assert_eq!(entry.data, bytes("test_value"));
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = StoreEntry::new(bytes("test_value"), Some(Duration::from_secs(60)));

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = StoreEntry::new(bytes("test_value"), Some(Duration::from_secs(10)));

        advance(Duration::from_secs(9)).await;
        assert!(!entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::from_secs(1)));

        advance(Duration::from_secs(1)).await;
        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = StoreEntry {
            data: bytes("test"),
            created_at: now,
            expires_at: Some(now),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_data_kind() {
        assert_eq!(bytes("x").kind(), "string");
        assert_eq!(StoredData::List(vec![]).kind(), "list");
    }
}
