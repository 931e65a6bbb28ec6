//! Repository trait for click events and their aggregates.

use std::collections::BTreeMap;

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only aggregate over all click events of one link.
///
/// Computed on demand and never persisted. Group maps are keyed by the
/// classification value and ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total_clicks: i64,
    pub devices: BTreeMap<String, i64>,
    pub browsers: BTreeMap<String, i64>,
    pub locations: BTreeMap<String, i64>,
}

impl AnalyticsSummary {
    /// Returns true if no clicks were recorded.
    pub fn is_empty(&self) -> bool {
        self.total_clicks == 0
    }
}

/// Repository interface for the click event log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Appends a click event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn save(&self, event: NewClickEvent) -> Result<ClickEvent, AppError>;

    /// Aggregates all click events of a link.
    ///
    /// A link without clicks yields an empty summary, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn aggregate(&self, link_id: i64) -> Result<AnalyticsSummary, AppError>;
}
