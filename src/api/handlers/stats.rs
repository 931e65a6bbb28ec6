//! Handler for link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves aggregated click analytics for a short link.
///
/// # Endpoint
///
/// `GET /api/links/{code}/stats`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "abc123",
///   "original_url": "https://example.com",
///   "click_count": 3,
///   "total_clicks": 3,
///   "devices": { "pc": 2, "smartphone": 1 },
///   "browsers": { "Chrome": 2, "Safari": 1 },
///   "locations": { "Berlin, Germany": 1, "unknown": 2 }
/// }
/// ```
///
/// A link without clicks returns zero totals and empty maps.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let analytics = state.stats_service.get_stats(&code).await?;

    Ok(Json(StatsResponse::from(analytics)))
}
