//! HTTP URL shortener client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use lg_core::services::UrlShortener;

/// Shortener endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenerConfig {
    /// Endpoint receiving a JSON body with the long URL
    pub api_url: String,

    /// API key included in the request body, if the service wants one
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Known response shapes: services disagree on the field name.
#[derive(Debug, Deserialize)]
struct ShortenResponse {
    short_url: Option<String>,
    url: Option<String>,
}

/// Shortener client over `reqwest`.
///
/// Every failure mode collapses to `None`; the access controller treats a
/// missing short link as a degraded collaborator, never a crash.
pub struct HttpShortener {
    client: reqwest::Client,
    config: ShortenerConfig,
}

impl HttpShortener {
    pub fn new(config: ShortenerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl UrlShortener for HttpShortener {
    async fn shorten(&self, long_url: &str) -> Option<String> {
        let body = ShortenRequest {
            url: long_url,
            api_key: self.config.api_key.as_deref(),
        };

        let response = match self.client.post(&self.config.api_url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Shortener request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Shortener returned an error status");
            return None;
        }

        let body: ShortenResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Shortener response was not valid JSON");
                return None;
            }
        };

        let short = body.short_url.or(body.url);
        if short.is_none() {
            tracing::warn!("Shortener response carried no short URL field");
        }
        short
    }
}
