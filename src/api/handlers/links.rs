//! Handler for link creation endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse};
use crate::domain::entities::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "custom_code": "my-link"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "my-link",
///   "short_url": "http://localhost:8080/my-link"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a malformed URL or custom code
/// - 401 when no caller identity is attached
/// - 409 when the custom code is taken
pub async fn create_link_handler(
    State(state): State<AppState>,
    caller: Option<Extension<CallerIdentity>>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let created = state
        .link_service
        .create_link(
            caller.map(|Extension(identity)| identity),
            payload.original_url,
            payload.custom_code,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            short_code: created.link.code,
            short_url: created.short_url,
        }),
    ))
}
