//! Fetch Module
//!
//! Resource fetching with per-resource access counting and a TTL-bound cache.
//!
//! # Key Layout
//! - `count:<url>` - access counter, never expires
//! - `cached:<url>` - cached body, expires after the configured TTL

mod expiring;
mod fetcher;

pub use expiring::{cached_key, count_key, ExpiringFetchCache, DEFAULT_FETCH_TTL};
pub use fetcher::{Fetcher, HttpFetcher};
