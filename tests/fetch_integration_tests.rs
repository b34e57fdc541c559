//! Integration Tests for the Expiring Fetch Cache
//!
//! Runs `HttpFetcher` against a local axum origin server that counts the
//! requests it actually serves.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use kv_replay::{CacheError, ExpiringFetchCache, HttpFetcher, MemoryStore};

// == Helper Functions ==

async fn page_handler(State(served): State<Arc<AtomicUsize>>) -> String {
    let n = served.fetch_add(1, Ordering::SeqCst) + 1;
    format!("<html><body>visit {}</body></html>", n)
}

async fn broken_handler() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "origin exploded")
}

/// Starts the origin server on an ephemeral port; returns its base URL and
/// the served-request counter.
async fn spawn_origin() -> (String, Arc<AtomicUsize>) {
    let served = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/page", get(page_handler))
        .route("/broken", get(broken_handler))
        .with_state(served.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), served)
}

fn new_cache(store: &MemoryStore, ttl: Duration) -> ExpiringFetchCache<HttpFetcher> {
    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    ExpiringFetchCache::new(store.shared(), fetcher).with_ttl(ttl)
}

// == Cache Hits and Expiry ==

#[tokio::test]
async fn test_second_fetch_within_ttl_is_served_from_cache() {
    let (base, served) = spawn_origin().await;
    let store = MemoryStore::new();
    let pages = new_cache(&store, Duration::from_secs(10));
    let url = format!("{}/page", base);

    let first = pages.fetch(&url).await.unwrap();
    let second = pages.fetch(&url).await.unwrap();

    assert_eq!(first, "<html><body>visit 1</body></html>");
    assert_eq!(second, first);
    assert_eq!(served.load(Ordering::SeqCst), 1);
    assert_eq!(pages.access_count(&url).await.unwrap(), 2);
}

#[tokio::test]
async fn test_fetch_after_ttl_hits_origin_again() {
    let (base, served) = spawn_origin().await;
    let store = MemoryStore::new();
    let pages = new_cache(&store, Duration::from_secs(1));
    let url = format!("{}/page", base);

    pages.fetch(&url).await.unwrap();
    pages.fetch(&url).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let third = pages.fetch(&url).await.unwrap();

    assert_eq!(third, "<html><body>visit 2</body></html>");
    assert_eq!(served.load(Ordering::SeqCst), 2);
    assert_eq!(pages.access_count(&url).await.unwrap(), 3);
}

// == Failures ==

#[tokio::test]
async fn test_not_found_is_fetch_failure_but_counted() {
    let (base, _) = spawn_origin().await;
    let store = MemoryStore::new();
    let pages = new_cache(&store, Duration::from_secs(10));
    let url = format!("{}/missing", base);

    let result = pages.fetch(&url).await;

    assert!(matches!(result, Err(CacheError::Fetch(_))));
    assert_eq!(pages.access_count(&url).await.unwrap(), 1);
    assert!(store.ttl(&format!("cached:{}", url)).await.is_none());
}

#[tokio::test]
async fn test_server_error_is_not_cached() {
    let (base, _) = spawn_origin().await;
    let store = MemoryStore::new();
    let pages = new_cache(&store, Duration::from_secs(10));
    let url = format!("{}/broken", base);

    assert!(pages.fetch(&url).await.is_err());
    assert!(pages.fetch(&url).await.is_err());

    assert_eq!(pages.access_count(&url).await.unwrap(), 2);
}

#[tokio::test]
async fn test_connection_refused_is_fetch_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = MemoryStore::new();
    let pages = new_cache(&store, Duration::from_secs(10));
    let url = format!("http://{}/page", addr);

    assert!(matches!(
        pages.fetch(&url).await,
        Err(CacheError::Fetch(_))
    ));
    assert_eq!(pages.access_count(&url).await.unwrap(), 1);
}
