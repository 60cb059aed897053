//! HTTP fetch primitive with transient-busy retry
//!
//! The game gateway signals overload inside the response body rather than
//! through HTTP status codes, so the retry condition here is a marker
//! substring in the payload. Any other body, including in-game error text,
//! is a valid mission outcome and is returned as-is.

pub mod headers;

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::FetchConfig;

/// Production game gateway
pub const GAME_URL: &str = "https://dld.qzapp.z.qq.com/qpet/cgi-bin/phonepk";

/// Substring the gateway renders when it wants the caller to retry
pub const BUSY_MARKER: &str = "系统繁忙";

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Request timeout
    #[error("request timeout")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Game fetcher with bounded retry on the transient-busy marker
///
/// One [`Fetcher::get`] call is one logical request: the gateway may answer
/// with the busy page a few times before serving the real response, and the
/// caller only ever sees the final body.
pub struct Fetcher {
    client: Client,
    base_url: String,
    busy_marker: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Create a fetcher from the `[fetch]` configuration section
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            busy_marker: config.busy_marker.clone(),
            max_attempts: config.busy_retry_attempts.max(1),
            retry_delay: config.busy_retry_delay(),
        })
    }

    /// Point the fetcher at a different base URL (mock servers in tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Issue one logical GET with the account cookie
    ///
    /// Retries while the body carries the busy marker, waiting
    /// `retry_delay` between attempts, up to `max_attempts` requests in
    /// total. After the cap the last body is returned even if still busy;
    /// callers detect a persisting busy state from the payload content.
    ///
    /// # Errors
    ///
    /// Transport failures (connection error, timeout, unreadable body)
    /// propagate immediately and are never retried here.
    pub async fn get(&self, cookie: &str, params: &str) -> Result<String, FetchError> {
        let url = format!("{}?{}", self.base_url, params);
        let headers = headers::build_game_headers(cookie);

        let mut body = String::new();
        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self.client.get(&url).headers(headers.clone()).send().await?;
            body = response.text().await?;

            if !body.contains(&self.busy_marker) {
                return Ok(body);
            }
            debug!(params = %params, attempt = attempt + 1, "gateway busy, retrying");
        }

        warn!(
            params = %params,
            attempts = self.max_attempts,
            "gateway still busy after retry cap"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = Fetcher::new(&FetchConfig::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let fetcher = Fetcher::new(&FetchConfig::default())
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(fetcher.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_attempt_cap_never_zero() {
        let config = FetchConfig {
            busy_retry_attempts: 0,
            ..FetchConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();
        assert_eq!(fetcher.max_attempts, 1);
    }
}
