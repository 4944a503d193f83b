//! HTTP client for the producer's `/number` endpoint.

use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;
use url::Url;

use crate::config::{ConfigError, ConsumerConfig};
use crate::consumer::error::FetchError;
use crate::http::NumberResponse;

/// Path of the number endpoint, relative to the producer base URL.
pub const NUMBER_PATH: &str = "number";

/// Anything the poller can fetch a number from.
pub trait NumberSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<u32, FetchError>> + Send;
}

/// Resolve the `/number` endpoint against a producer base URL.
///
/// `http://host:5000` and `http://host:5000/number` resolve to the same
/// endpoint; `http://host/api/` resolves to `http://host/api/number`.
pub fn endpoint_url(base: &str) -> Result<Url, ConfigError> {
    let invalid = |source: url::ParseError| ConfigError::InvalidUrl {
        url: base.to_string(),
        source,
    };
    Url::parse(base)
        .and_then(|url| url.join(NUMBER_PATH))
        .map_err(invalid)
}

/// reqwest-backed [`NumberSource`] with a per-request timeout.
#[derive(Debug, Clone)]
pub struct NumberClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl NumberClient {
    pub fn new(config: &ConsumerConfig) -> Result<Self, ConfigError> {
        let endpoint = endpoint_url(&config.producer_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl NumberSource for NumberClient {
    async fn fetch(&self) -> Result<u32, FetchError> {
        let response = self.http.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let payload: NumberResponse = serde_json::from_slice(&body)?;
        Ok(payload.number)
    }
}
