//! Expiring Fetch Cache
//!
//! Counts every fetch attempt per resource and serves repeat fetches from a
//! short-lived cache entry.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::store::SharedStore;

/// Lifetime of a cached resource body unless overridden.
pub const DEFAULT_FETCH_TTL: Duration = Duration::from_secs(10);

/// Store key of the access counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Store key of the cached body for `url`.
pub fn cached_key(url: &str) -> String {
    format!("cached:{}", url)
}

// == Expiring Fetch Cache ==
/// Wraps a [`Fetcher`] with an access counter and a TTL-bound cache entry.
///
/// The counter and the entry are independent: expiry of the entry never
/// resets the counter. Expiry itself is delegated to the store.
pub struct ExpiringFetchCache<F> {
    store: SharedStore,
    fetcher: F,
    ttl: Duration,
}

impl<F: Fetcher> ExpiringFetchCache<F> {
    pub fn new(store: SharedStore, fetcher: F) -> Self {
        Self {
            store,
            fetcher,
            ttl: DEFAULT_FETCH_TTL,
        }
    }

    /// Overrides the cache entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // == Fetch ==
    /// Returns the body of `url`, from cache when a live entry exists.
    ///
    /// The access counter is incremented first, so failed fetches are still
    /// counted. A failed fetch caches nothing.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let accesses = self.store.incr(&count_key(url)).await?;

        let cache_key = cached_key(url);
        if let Some(cached) = self.store.get(&cache_key).await? {
            debug!(url, accesses, "Fetch cache hit");
            return Ok(String::from_utf8(cached)?);
        }

        debug!(url, accesses, "Fetch cache miss");
        let body = self.fetcher.fetch(url).await?;
        self.store
            .set_with_expiry(&cache_key, body.clone().into_bytes(), self.ttl)
            .await?;

        Ok(body)
    }

    // == Access Count ==
    /// Number of fetch attempts recorded for `url`; zero if never fetched.
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.store.get(&count_key(url)).await? {
            Some(raw) => Ok(String::from_utf8(raw)?.parse::<u64>()?),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::time::advance;

    use crate::error::CacheError;
    use crate::store::{KeyValueStore, MemoryStore};

    /// Serves `<url>#<n>` where n counts real fetches; URLs containing
    /// "down" fail.
    #[derive(Clone, Default)]
    struct CountingFetcher {
        fetches: Arc<AtomicUsize>,
    }

    impl CountingFetcher {
        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            if url.contains("down") {
                return Err(CacheError::Fetch(format!("{} unreachable", url)));
            }
            Ok(format!("{}#{}", url, n))
        }
    }

    fn new_cache(store: &MemoryStore) -> ExpiringFetchCache<CountingFetcher> {
        ExpiringFetchCache::new(store.shared(), CountingFetcher::default())
    }

    #[test]
    fn test_keys() {
        assert_eq!(count_key("http://x"), "count:http://x");
        assert_eq!(cached_key("http://x"), "cached:http://x");
    }

    #[tokio::test]
    async fn test_default_ttl() {
        let store = MemoryStore::new();
        let cache = new_cache(&store);

        assert_eq!(cache.ttl(), Duration::from_secs(10));
        assert_eq!(
            cache.with_ttl(Duration::from_secs(3)).ttl(),
            Duration::from_secs(3)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_window_then_refetch() {
        let store = MemoryStore::new();
        let cache = new_cache(&store);

        // t = 0: miss
        assert_eq!(cache.fetch("X").await.unwrap(), "X#1");
        assert_eq!(cache.access_count("X").await.unwrap(), 1);

        // t = 5: hit
        advance(Duration::from_secs(5)).await;
        assert_eq!(cache.fetch("X").await.unwrap(), "X#1");
        assert_eq!(cache.access_count("X").await.unwrap(), 2);
        assert_eq!(cache.fetcher().fetches(), 1);

        // t = 11: expired, fetched again
        advance(Duration::from_secs(6)).await;
        assert_eq!(cache.fetch("X").await.unwrap(), "X#2");
        assert_eq!(cache.access_count("X").await.unwrap(), 3);
        assert_eq!(cache.fetcher().fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_written_with_ttl() {
        let store = MemoryStore::new();
        let cache = new_cache(&store);

        cache.fetch("X").await.unwrap();

        assert_eq!(store.ttl("cached:X").await, Some(DEFAULT_FETCH_TTL));
        assert_eq!(store.ttl("count:X").await, None);
    }

    #[tokio::test]
    async fn test_failure_counts_attempt_and_caches_nothing() {
        let store = MemoryStore::new();
        let cache = new_cache(&store);

        let result = cache.fetch("http://down").await;

        assert!(matches!(result, Err(CacheError::Fetch(_))));
        assert_eq!(cache.access_count("http://down").await.unwrap(), 1);
        assert!(store.ttl("cached:http://down").await.is_none());

        let result = cache.fetch("http://down").await;
        assert!(result.is_err());
        assert_eq!(cache.access_count("http://down").await.unwrap(), 2);
        assert_eq!(cache.fetcher().fetches(), 2);
    }

    #[tokio::test]
    async fn test_resources_are_independent() {
        let store = MemoryStore::new();
        let cache = new_cache(&store);

        cache.fetch("A").await.unwrap();
        cache.fetch("A").await.unwrap();
        cache.fetch("B").await.unwrap();

        assert_eq!(cache.access_count("A").await.unwrap(), 2);
        assert_eq!(cache.access_count("B").await.unwrap(), 1);
        assert_eq!(cache.access_count("C").await.unwrap(), 0);
        assert_eq!(cache.fetcher().fetches(), 2);
    }

    #[tokio::test]
    async fn test_empty_body_is_cached() {
        let store = MemoryStore::new();
        let fetcher = CountingFetcher::default();
        let cache = ExpiringFetchCache::new(store.shared(), fetcher.clone());
        store
            .set_with_expiry("cached:E", Vec::new(), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(cache.fetch("E").await.unwrap(), "");
        assert_eq!(fetcher.fetches(), 0);
    }
}
