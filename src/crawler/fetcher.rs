//! HTTP fetcher implementation
//!
//! The crawler only needs one capability from the network: given a URL,
//! return the document text or report failure. That capability is the
//! [`Fetcher`] trait; [`HttpFetcher`] is the reqwest-backed implementation
//! used in production, and tests substitute stubs or a mock server.

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Result of a fetch operation
///
/// Failure is data, not an error: the crawl's failure policy (skip subtree,
/// empty content, abort at course rank) is decided by the caller per rank.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the document
    Success {
        /// Document body text
        body: String,
        /// HTTP status code
        status_code: u16,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network-level failure (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// The document body on success, `None` on any failure
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchOutcome::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Capability to fetch a document by URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Fetcher backed by a reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the HTTP client from crawler configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler configuration carrying the user agent and timeout
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Successfully built fetcher
    /// * `Err(reqwest::Error)` - Failed to build the underlying client
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        debug!("Fetching: {}", url);

        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return FetchOutcome::HttpError {
                        status_code: status.as_u16(),
                    };
                }

                match response.text().await {
                    Ok(body) => FetchOutcome::Success {
                        body,
                        status_code: status.as_u16(),
                    },
                    Err(e) => FetchOutcome::NetworkError {
                        error: e.to_string(),
                    },
                }
            }
            Err(e) => {
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                FetchOutcome::NetworkError { error }
            }
        }
    }
}
