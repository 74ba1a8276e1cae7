//! Article source — raw article JSON from a MediaWiki query API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::BotConfig;
use crate::error::FetchError;

/// Anything that can produce the query-API document for a subject.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the `action=query` document for `subject`.
    async fn fetch(&self, subject: &str) -> Result<Value, FetchError>;
}

/// Build the public link to an article.
///
/// The title is form-urlencoded, so spaces become `+`.
pub fn article_url(base: &str, title: &str) -> String {
    let escaped: String = url::form_urlencoded::byte_serialize(title.as_bytes()).collect();
    format!("{}{}", base, escaped)
}

/// MediaWiki `api.php` client.
pub struct WikipediaClient {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl WikipediaClient {
    /// Create a client; every request is bounded by `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pedia-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self, FetchError> {
        Self::new(config.api_endpoint.clone(), config.fetch_timeout)
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn fetch(&self, subject: &str) -> Result<Value, FetchError> {
        debug!(endpoint = %self.endpoint, subject, "Fetching article");

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("titles", subject),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("redirects", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
