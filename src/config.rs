//! Configuration Module
//!
//! Handles loading runtime configuration from environment variables.

use std::env;
use std::time::Duration;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime in seconds of a cached resource body
    pub fetch_ttl: u64,
    /// HTTP request timeout in seconds for resource fetches
    pub fetch_timeout: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Resource fetched by the web cache walkthrough; skipped when unset
    pub demo_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FETCH_TTL` - Cached body lifetime in seconds (default: 10)
    /// - `FETCH_TIMEOUT` - Fetch timeout in seconds (default: 30)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    /// - `DEMO_URL` - URL for the web cache walkthrough (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            fetch_ttl: env_number("FETCH_TTL").unwrap_or(defaults.fetch_ttl),
            fetch_timeout: env_number("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            sweep_interval: env_number("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            demo_url: env::var("DEMO_URL").ok().filter(|url| !url.is_empty()),
        }
    }

    pub fn fetch_ttl(&self) -> Duration {
        Duration::from_secs(self.fetch_ttl)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_ttl: 10,
            fetch_timeout: 30,
            sweep_interval: 1,
            demo_url: None,
        }
    }
}

/// Parses a positive integer variable; unset, malformed or zero values are ignored.
fn env_number(name: &str) -> Option<u64> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > 0)
}
