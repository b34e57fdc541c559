//! Stored Cache
//!
//! Writes scalar values under freshly generated keys and reads them back,
//! recording every `store` call through the instrumentation layer.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::cache::StoreValue;
use crate::error::Result;
use crate::instrument::{Instrumented, Replay, TrackedOperation};
use crate::store::SharedStore;

/// Tracking identity of [`StoredCache::store`].
pub const STORE_OPERATION: &str = "StoredCache::store";

// == Store Operation ==
/// Base `store` logic: a random UUID v4 key and a single `set`.
pub struct StoreOperation {
    store: SharedStore,
}

#[async_trait]
impl TrackedOperation for StoreOperation {
    type Input = StoreValue;
    type Output = String;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    async fn invoke(&self, input: StoreValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, input.to_bytes()).await?;
        Ok(key)
    }
}

// == Stored Cache ==
/// Cache of scalar values addressed by generated keys.
pub struct StoredCache {
    store: SharedStore,
    recorder: Instrumented<StoreOperation>,
}

impl StoredCache {
    // == Constructors ==
    /// Flushes the store and returns a cache over the now-empty keyspace.
    pub async fn new(store: SharedStore) -> Result<Self> {
        store.flush().await?;
        debug!("Flushed store for new cache");
        Ok(Self::attach(store))
    }

    /// Returns a cache over an existing keyspace without flushing it.
    pub fn attach(store: SharedStore) -> Self {
        let recorder = Instrumented::new(
            store.clone(),
            StoreOperation {
                store: store.clone(),
            },
        );
        Self { store, recorder }
    }

    // == Store ==
    /// Stores `value` under a new random key and returns the key.
    ///
    /// The call is counted and its argument and returned key are appended to
    /// the `StoredCache::store` history.
    pub async fn store(&self, value: impl Into<StoreValue>) -> Result<String> {
        self.recorder.call(value.into()).await
    }

    // == Get ==
    /// Raw bytes stored at `key`, or None when the key does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Looks up `key` and applies `transform` to the raw bytes if present.
    ///
    /// Transform failures are returned as errors, never mapped to None.
    pub async fn get_with<T, F>(&self, key: &str, transform: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key).await?.map(transform).transpose()
    }

    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?)).await
    }

    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?.parse::<i64>()?))
            .await
    }

    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?.parse::<f64>()?))
            .await
    }

    // == Replay ==
    /// History of every recorded `store` call.
    pub async fn replay(&self) -> Result<Replay> {
        self.recorder.replay().await
    }

    pub fn store_handle(&self) -> &SharedStore {
        &self.store
    }
}
