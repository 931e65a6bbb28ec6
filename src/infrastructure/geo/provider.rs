//! Geolocation provider trait and error types.

use async_trait::async_trait;
use serde::Deserialize;

/// Location string used when the provider knows nothing about an address.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Errors from a geolocation lookup.
///
/// Never surfaced to HTTP clients: the redirect pipeline downgrades every
/// failure to [`UNKNOWN_LOCATION`].
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("Not an IP address: {0}")]
    InvalidIp(String),

    #[error("Geo lookup request failed: {0}")]
    Request(String),

    #[error("Geo lookup timed out")]
    Timeout,

    #[error("Geo API returned status {0}")]
    Status(u16),

    #[error("Failed to parse geo API response: {0}")]
    Parse(String),
}

/// Source of location strings for public IP addresses.
///
/// # Implementations
///
/// - [`crate::infrastructure::geo::IpApiProvider`] - HTTP lookup against an ip-api style endpoint
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Resolves `ip` to `"{city}, {country}"`, or [`UNKNOWN_LOCATION`] when
    /// the provider has no data for it.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] on network, status, or parse failures.
    async fn lookup(&self, ip: &str) -> Result<String, GeoError>;
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Turns a geo API JSON body into a location string.
///
/// # Errors
///
/// Returns [`GeoError::Parse`] if the body is not a JSON object.
pub fn location_from_body(body: &str) -> Result<String, GeoError> {
    let data: GeoResponse =
        serde_json::from_str(body).map_err(|e| GeoError::Parse(e.to_string()))?;

    let city = data.city.unwrap_or_default();
    let country = data.country.unwrap_or_default();

    if city.is_empty() && country.is_empty() {
        return Ok(UNKNOWN_LOCATION.to_string());
    }

    Ok(format!("{city}, {country}"))
}
