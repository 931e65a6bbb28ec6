//! HTTP geolocation provider for ip-api compatible endpoints.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::provider::{GeoError, GeoProvider, location_from_body};

/// Default endpoint template; `{ip}` is replaced with the client address.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json/{ip}";

/// Geolocation provider backed by an HTTP JSON API.
///
/// Each lookup is bounded by the client timeout so a slow upstream cannot
/// stall redirects; a timeout is reported as [`GeoError::Timeout`].
pub struct IpApiProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiProvider {
    /// Creates a provider for `endpoint`, which must contain `{ip}`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn url_for(&self, ip: &str) -> String {
        self.endpoint.replace("{ip}", ip)
    }
}

fn request_error(e: reqwest::Error) -> GeoError {
    if e.is_timeout() {
        GeoError::Timeout
    } else {
        GeoError::Request(e.to_string())
    }
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    async fn lookup(&self, ip: &str) -> Result<String, GeoError> {
        let response = self
            .client
            .get(self.url_for(ip))
            .send()
            .await
            .map_err(request_error)?;

        if response.status() != StatusCode::OK {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body = response.text().await.map_err(request_error)?;

        location_from_body(&body)
    }
}
