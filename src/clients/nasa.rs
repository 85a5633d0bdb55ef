//! Client for the NASA open API (APOD, Mars Rover photos, rover manifests).
//!
//! Failures are classified into [`NasaError`] and logged here, once, with a
//! kind-specific message. Callers decide how each kind surfaces to users.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::NasaConfig;
use crate::models::apod::ManifestEnvelope;
use crate::models::photo::PhotosEnvelope;
use crate::models::{ApodRecord, Photo, PhotoQuery, RoverManifest};

#[derive(Debug, Error)]
pub enum NasaError {
    #[error("missing NASA API configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid NASA API URL: {0}")]
    InvalidUrl(String),

    #[error("NASA API rate limit exceeded")]
    RateLimited,

    #[error("NASA API request timed out")]
    Timeout,

    #[error("NASA API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("NASA API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to decode NASA API response: {0}")]
    Decode(String),
}

impl NasaError {
    /// Short label used for logs and the `kind` metric label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingConfig(_) | Self::InvalidUrl(_) => "config",
            Self::RateLimited => "rate_limited",
            Self::Timeout => "timeout",
            Self::Status { .. } => "status",
            Self::Request(_) => "request",
            Self::Decode(_) => "decode",
        }
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::MissingConfig(_) | Self::InvalidUrl(_))
    }
}

impl From<reqwest::Error> for NasaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

#[derive(Clone)]
pub struct NasaClient {
    client: Client,
    settings: NasaConfig,
    timeout: Duration,
}

impl NasaClient {
    /// Creates a client using the configured (clamped) request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: NasaConfig) -> anyhow::Result<Self> {
        let timeout = settings.request_timeout();
        Self::with_timeout(settings, timeout)
    }

    /// Creates a client with an explicit timeout, bypassing the configured
    /// bounds.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(settings: NasaConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("space-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            settings,
            timeout,
        })
    }

    /// Creates a client on top of an existing pooled `reqwest::Client`.
    #[must_use]
    pub fn with_shared_client(client: Client, settings: NasaConfig) -> Self {
        let timeout = settings.request_timeout();
        Self {
            client,
            settings,
            timeout,
        }
    }

    pub async fn fetch_apod(&self) -> Result<ApodRecord, NasaError> {
        let url = self.apod_url()?;
        self.get_json(url, "apod").await
    }

    pub async fn fetch_rover_photos(&self, query: &PhotoQuery) -> Result<Vec<Photo>, NasaError> {
        let url = self.rover_photos_url(query)?;
        let envelope: PhotosEnvelope = self.get_json(url, "mars_photos").await?;

        debug!(
            rover = %query.rover,
            sol = query.sol,
            count = envelope.photos.len(),
            "Fetched rover photos"
        );

        Ok(envelope.photos)
    }

    /// Fetches the result set for `query` and returns the photo at index
    /// `page - 1`, or `None` when the page is out of range.
    pub async fn fetch_photo_at(
        &self,
        query: &PhotoQuery,
        page: u32,
    ) -> Result<Option<Photo>, NasaError> {
        let photos = self.fetch_rover_photos(query).await?;
        let index = page.saturating_sub(1) as usize;
        Ok(photos.into_iter().nth(index))
    }

    pub async fn fetch_manifest(&self, rover: &str) -> Result<RoverManifest, NasaError> {
        let url = self.manifest_url(rover)?;
        let envelope: ManifestEnvelope = self.get_json(url, "rover_manifest").await?;
        Ok(envelope.photo_manifest)
    }

    pub fn apod_url(&self) -> Result<Url, NasaError> {
        let endpoint = self
            .settings
            .apod_endpoint
            .as_deref()
            .ok_or(NasaError::MissingConfig("apod_endpoint"))?;
        self.build_url(endpoint, &[])
    }

    pub fn rover_photos_url(&self, query: &PhotoQuery) -> Result<Url, NasaError> {
        let template = self
            .settings
            .mars_rover_endpoint
            .as_deref()
            .ok_or(NasaError::MissingConfig("mars_rover_endpoint"))?;
        let endpoint = template.replace("{rover}", &query.rover);

        let sol = query.sol.to_string();
        let mut params = vec![("sol", sol.as_str())];
        if let Some(camera) = query.camera.as_deref() {
            params.push(("camera", camera));
        }

        self.build_url(&endpoint, &params)
    }

    pub fn manifest_url(&self, rover: &str) -> Result<Url, NasaError> {
        let template = self
            .settings
            .manifest_endpoint
            .as_deref()
            .ok_or(NasaError::MissingConfig("manifest_endpoint"))?;
        self.build_url(&template.replace("{rover}", rover), &[])
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, NasaError> {
        let base = self
            .settings
            .base_url
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or(NasaError::MissingConfig("base_url"))?;
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(NasaError::MissingConfig("api_key"))?;

        let joined = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined).map_err(|e| NasaError::InvalidUrl(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", api_key);
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, op: &'static str) -> Result<T, NasaError> {
        // The query string carries the API key, keep it out of logs.
        let path = url.path().to_string();
        metrics::counter!("nasa_upstream_requests_total", "op" => op).increment(1);

        let result = self.send(url).await;
        if let Err(e) = &result {
            self.log_failure(op, &path, e);
            metrics::counter!("nasa_upstream_errors_total", "op" => op, "kind" => e.kind())
                .increment(1);
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: Url) -> Result<T, NasaError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NasaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NasaError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| NasaError::Decode(e.to_string()))
    }

    fn log_failure(&self, op: &str, path: &str, err: &NasaError) {
        match err {
            NasaError::RateLimited => {
                warn!(op, path, "NASA API rate limit reached, try again later");
            }
            NasaError::Timeout => {
                warn!(op, path, timeout = ?self.timeout, "NASA API request timed out");
            }
            NasaError::MissingConfig(field) => {
                error!(op, field, "NASA API is not configured");
            }
            other => {
                error!(op, path, error = %other, "Error fetching data from NASA API");
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
