//! DTOs for link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a short link.
///
/// Custom code rules (length 2-20, `[A-Za-z0-9_-]`) are enforced by the link
/// service so the API and other callers share one validator.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL (must be an absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional custom short code; an empty string means "generate one".
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub short_code: String,
    pub short_url: String,
}
