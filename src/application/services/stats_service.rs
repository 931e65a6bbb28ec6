//! Click analytics read path.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{AnalyticsRepository, AnalyticsSummary, LinkRepository};
use crate::error::AppError;
use serde_json::json;

/// Analytics for one link: its metadata plus the aggregated click log.
#[derive(Debug, Clone)]
pub struct LinkAnalytics {
    pub link: Link,
    pub summary: AnalyticsSummary,
}

/// Service for retrieving per-link click analytics.
///
/// Aggregates are grouped counts by device type, browser and location.
/// A link that was never clicked yields an empty summary.
pub struct StatsService<L, A>
where
    L: LinkRepository + ?Sized,
    A: AnalyticsRepository + ?Sized,
{
    link_repository: Arc<L>,
    analytics_repository: Arc<A>,
}

impl<L, A> StatsService<L, A>
where
    L: LinkRepository + ?Sized,
    A: AnalyticsRepository + ?Sized,
{
    /// Creates a new statistics service.
    pub fn new(link_repository: Arc<L>, analytics_repository: Arc<A>) -> Self {
        Self {
            link_repository,
            analytics_repository,
        }
    }

    /// Retrieves aggregated analytics for a short code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_stats(&self, code: &str) -> Result<LinkAnalytics, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let summary = self.analytics_repository.aggregate(link.id).await?;

        Ok(LinkAnalytics { link, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockAnalyticsRepository, MockLinkRepository};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn stored_link() -> Link {
        Link::new(
            5,
            1,
            "https://example.com".to_string(),
            "stats1".to_string(),
            3,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_get_stats_aggregates() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_code()
            .withf(|code| code == "STATS1")
            .times(1)
            .returning(|_| Ok(Some(stored_link())));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_aggregate()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| {
                Ok(AnalyticsSummary {
                    total_clicks: 3,
                    devices: BTreeMap::from([("pc".to_string(), 2), ("smartphone".to_string(), 1)]),
                    browsers: BTreeMap::from([("Chrome".to_string(), 3)]),
                    locations: BTreeMap::from([("unknown".to_string(), 3)]),
                })
            });

        let service = StatsService::new(Arc::new(links), Arc::new(analytics));

        let stats = service.get_stats("STATS1").await.unwrap();

        assert_eq!(stats.link.code, "stats1");
        assert_eq!(stats.summary.total_clicks, 3);
        assert_eq!(stats.summary.devices.get("pc"), Some(&2));
        assert_eq!(stats.summary.browsers.get("Chrome"), Some(&3));
    }

    #[tokio::test]
    async fn test_get_stats_zero_clicks_is_not_an_error() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_code()
            .returning(|_| Ok(Some(stored_link())));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_aggregate()
            .returning(|_| Ok(AnalyticsSummary::default()));

        let service = StatsService::new(Arc::new(links), Arc::new(analytics));

        let stats = service.get_stats("stats1").await.unwrap();

        assert!(stats.summary.is_empty());
        assert_eq!(stats.summary.total_clicks, 0);
        assert!(stats.summary.devices.is_empty());
        assert!(stats.summary.browsers.is_empty());
        assert!(stats.summary.locations.is_empty());
    }

    #[tokio::test]
    async fn test_get_stats_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_code().returning(|_| Ok(None));

        let mut analytics = MockAnalyticsRepository::new();
        analytics.expect_aggregate().times(0);

        let service = StatsService::new(Arc::new(links), Arc::new(analytics));

        let result = service.get_stats("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_stats_store_error() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_code()
            .returning(|_| Ok(Some(stored_link())));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_aggregate()
            .returning(|_| Err(AppError::store("Database error", json!({}))));

        let service = StatsService::new(Arc::new(links), Arc::new(analytics));

        let result = service.get_stats("stats1").await;

        assert!(matches!(result, Err(AppError::Store { .. })));
    }
}
