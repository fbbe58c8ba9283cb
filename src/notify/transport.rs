//! HTTP transport used to deliver webhook payloads.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use tracing::debug;

use crate::error::AlertError;

/// Status and body of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a single JSON POST and returns the response.
///
/// Implementations must not retry; one call is one outbound request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts an already serialized JSON body to `url`.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<WebhookResponse, AlertError>;
}

/// Process-wide client used when the caller supplies none.
///
/// Shared and immutable; `reqwest::Client` is safe for concurrent reuse.
static DEFAULT_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Returns the shared default HTTP client.
pub fn default_client() -> &'static reqwest::Client {
    DEFAULT_CLIENT.get_or_init(reqwest::Client::new)
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wraps a caller-configured client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(default_client().clone())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<WebhookResponse, AlertError> {
        debug!(bytes = body.len(), "Posting webhook payload");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        // Drain the body so the connection is released back to the pool.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status, error = %e, "Failed to read webhook response body");
                String::new()
            }
        };

        Ok(WebhookResponse { status, body })
    }
}
