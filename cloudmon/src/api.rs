//! HTTP client for the metrics service: one snapshot call, one history call
//! per device. Every call is independent; nothing here retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ConfigError;
use crate::types::{DeviceSnapshot, HistoryPoint};

/// Why a single request produced no data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure or any other transport problem.
    #[error("cannot reach metrics service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered, but not with 200.
    #[error("metrics service returned HTTP {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected error: {0}")]
    Other(String),
}

impl FetchError {
    /// True when the service could not be contacted at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }
}

#[derive(Debug, Clone)]
pub struct MetricsClient {
    base: Url,
    timeout: Duration,
    http: Client,
}

impl MetricsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            base,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `{base}/get_metrics`. An empty array means no device has reported yet.
    pub async fn fetch_snapshot(&self) -> Result<Vec<DeviceSnapshot>, FetchError> {
        let url = self.endpoint(&["get_metrics"]);
        self.get_json(url).await
    }

    /// GET `{base}/get_history/{device_id}`, the id encoded as one path segment.
    pub async fn fetch_history(&self, device_id: &str) -> Result<Vec<HistoryPoint>, FetchError> {
        let url = self.endpoint(&["get_history", device_id]);
        self.get_json(url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // parse_base_url rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if e.is_connect() || e.is_request() || e.is_body() {
            FetchError::Transport(e)
        } else {
            FetchError::Other(e.to_string())
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".into()));
    }
    Ok(url)
}
