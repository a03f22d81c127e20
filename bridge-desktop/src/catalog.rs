//! Catalog providers backed by HTTP or memory.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    CatalogEntry, CatalogProvider,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Fetches the catalog as a JSON array of `{name, artist, url}` objects.
///
/// Requests are retried with exponential backoff on connection failures,
/// `429` and `5xx` responses. Other non-success statuses fail immediately.
pub struct HttpCatalogProvider {
    client: Client,
    listing_url: String,
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl HttpCatalogProvider {
    /// Provider for `listing_url` with a 30 second request timeout.
    pub fn new(listing_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(listing_url, Duration::from_secs(30))
    }

    /// Provider for `listing_url` with a custom request timeout.
    pub fn with_timeout(listing_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("stream-player/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BridgeError::NotAvailable(format!("HTTP client: {e}")))?;

        Ok(Self::with_client(client, listing_url))
    }

    /// Provider using a preconfigured client.
    pub fn with_client(client: Client, listing_url: impl Into<String>) -> Self {
        Self {
            client,
            listing_url: listing_url.into(),
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }

    /// Sets the retry budget. `1` disables retries.
    pub fn with_retries(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.base_delay = base_delay;
        self
    }

    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    async fn fetch_once(&self) -> std::result::Result<Vec<CatalogEntry>, FetchError> {
        let response = self
            .client
            .get(&self.listing_url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Retryable(BridgeError::OperationFailed(
                        "Request timed out".to_string(),
                    ))
                } else if e.is_connect() {
                    FetchError::Retryable(BridgeError::OperationFailed(format!(
                        "Connection failed: {e}"
                    )))
                } else {
                    FetchError::Fatal(BridgeError::OperationFailed(e.to_string()))
                }
            })?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::Retryable(BridgeError::OperationFailed(format!(
                "HTTP {} error",
                status.as_u16()
            ))));
        }
        if !status.is_success() {
            return Err(FetchError::Fatal(BridgeError::OperationFailed(format!(
                "HTTP {} error",
                status.as_u16()
            ))));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Fatal(BridgeError::OperationFailed(e.to_string())))?;
        parse_listing(&body).map_err(FetchError::Fatal)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

enum FetchError {
    Retryable(BridgeError),
    Fatal(BridgeError),
}

/// Parses a catalog listing document.
fn parse_listing(body: &[u8]) -> Result<Vec<CatalogEntry>> {
    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn get_files(&self) -> Result<Vec<CatalogEntry>> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                attempt,
                max_attempts = self.max_attempts,
                url = %self.listing_url,
                "Fetching catalog"
            );

            match self.fetch_once().await {
                Ok(files) => {
                    info!(tracks = files.len(), "Catalog fetched");
                    return Ok(files);
                }
                Err(FetchError::Fatal(error)) => return Err(error),
                Err(FetchError::Retryable(error)) => {
                    if attempt >= self.max_attempts {
                        return Err(error);
                    }
                    let delay = self.backoff(attempt);
                    warn!(
                        error = %error,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Catalog fetch failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Serves a fixed listing, e.g. tracks bundled with the application.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    files: Vec<CatalogEntry>,
}

impl StaticCatalogProvider {
    pub fn new(files: Vec<CatalogEntry>) -> Self {
        Self { files }
    }

    /// Provider for a listing document in the HTTP provider's JSON format.
    pub fn from_json(json: &str) -> Result<Self> {
        parse_listing(json.as_bytes()).map(Self::new)
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn get_files(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.files.clone())
    }
}
