//! kv_replay - Instrumented façade over a key-value store
//!
//! Records call counts and input/output history for store operations so they
//! can be replayed, and caches resource fetches behind a TTL with per-resource
//! access counting.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod instrument;
pub mod store;
pub mod tasks;

pub use cache::{StoreValue, StoredCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::{ExpiringFetchCache, Fetcher, HttpFetcher};
pub use instrument::{replay, Instrumented, Replay, TrackedOperation};
pub use store::{KeyValueStore, MemoryStore, SharedStore};
pub use tasks::spawn_expiry_sweeper;
