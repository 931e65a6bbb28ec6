//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::application::services::ClientInfo;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code (case-insensitive)
/// 2. Increment the link's click counter
/// 3. Classify the client from `User-Agent`
/// 4. Geolocate the client IP through the TTL cache
/// 5. Record the click event
/// 6. Return 301 Moved Permanently
///
/// Steps 2-5 never block the redirect: failures are logged and the click is
/// recorded as far as possible (e.g. with location `"unknown"`).
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 if the lookup itself fails or the stored URL cannot be sent as
/// a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let client = ClientInfo {
        ip: client_ip(&headers, addr, state.behind_proxy),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    };

    let outcome = state.redirect_service.redirect(&code, client).await?;

    let location = HeaderValue::try_from(outcome.original_url.as_str()).map_err(|e| {
        tracing::error!(code = %code, error = %e, "Stored URL is not a valid Location header");
        AppError::store(
            "Stored URL cannot be used as a redirect target",
            json!({ "code": code }),
        )
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
