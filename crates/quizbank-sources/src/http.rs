//! HTTP question bank source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use quizbank_core::error::LoadError;
use quizbank_core::traits::QuestionSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches banks over HTTP(S).
///
/// Absolute `http://` or `https://` locators are used as-is; anything else is
/// joined onto the base URL.
pub struct HttpSource {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: Option<String>) -> Result<Self, LoadError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: Option<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            client,
        })
    }

    fn url_for(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return locator.to_string();
        }
        match &self.base_url {
            Some(base) => format!("{base}/{}", locator.trim_start_matches('/')),
            None => locator.to_string(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        let url = self.url_for(locator);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Network(format!("request to {url} timed out"))
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "question bank request failed");
            return Err(LoadError::Http {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))
    }
}
