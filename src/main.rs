//! kv_replay walkthrough
//!
//! Stores a few values, replays the recorded `store` calls, then optionally
//! exercises the expiring fetch cache against `DEMO_URL`.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kv_replay::{
    spawn_expiry_sweeper, Config, ExpiringFetchCache, HttpFetcher, MemoryStore, StoredCache,
};

/// Entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the in-memory store and start the expiry sweeper
/// 4. Run the store/replay walkthrough
/// 5. Run the web cache walkthrough when `DEMO_URL` is set
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kv_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: fetch_ttl={}s, fetch_timeout={}s, sweep_interval={}s",
        config.fetch_ttl, config.fetch_timeout, config.sweep_interval
    );

    let store = MemoryStore::new();
    let sweeper = spawn_expiry_sweeper(store.clone(), config.sweep_interval);

    // Store and replay
    let cache = StoredCache::new(store.shared()).await?;
    cache.store(1).await?;
    cache.store(2).await?;
    cache.store(42).await?;
    cache.replay().await?.print();

    if let Some(url) = &config.demo_url {
        let pages = ExpiringFetchCache::new(
            store.shared(),
            HttpFetcher::new(config.fetch_timeout())?,
        )
        .with_ttl(config.fetch_ttl());

        let body = pages.fetch(url).await?;
        println!("{}", preview(&body));
        pages.fetch(url).await?;
        println!("{} accessed {} times", url, pages.access_count(url).await?);

        info!("Waiting {}s for the cached page to expire", config.fetch_ttl + 1);
        tokio::time::sleep(config.fetch_ttl() + Duration::from_secs(1)).await;

        let body = pages.fetch(url).await?;
        println!("{}", preview(&body));
        println!("{} accessed {} times", url, pages.access_count(url).await?);
    }

    info!("Store stats: {}", serde_json::to_string(&store.stats().await)?);

    sweeper.abort();
    Ok(())
}

/// First 100 characters of a page body.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(100) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
