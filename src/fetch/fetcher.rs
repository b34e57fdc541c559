//! Resource Fetchers
//!
//! The fetch collaborator contract and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

// == Fetcher ==
/// Retrieves the text body of a resource.
///
/// Network and protocol failures must surface as
/// [`CacheError::Fetch`](crate::error::CacheError::Fetch). Timeouts and
/// cancellation are the implementation's concern.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// Fetches resources over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// GETs `url`; any non-2xx status is a fetch failure.
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!(url, status = %response.status(), "Fetched resource");
        Ok(response.text().await?)
    }
}
