//! Destination URL validation.
//!
//! Destinations are stored in the serialized form `url` produces, which is
//! always a valid `Location` header value.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is a well-formed absolute HTTP(S) URL with a host and
/// returns its serialized form.
///
/// Parsing drops ASCII tab and newline characters and percent-encodes other
/// control characters, lowercases the scheme and host, and adds a `/` path to
/// bare origins. Rejects relative references and schemes such as `javascript:`, `data:` or
/// `file:` that must never be the target of a redirect.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] when no host is present.
pub fn validate_destination_url(input: &str) -> Result<String, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url.to_string()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
