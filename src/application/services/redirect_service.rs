//! Redirect pipeline: lookup, counting, classification, geolocation, analytics.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::entities::NewClickEvent;
use crate::domain::repositories::{AnalyticsRepository, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::geo::{GeoCache, UNKNOWN_LOCATION};
use crate::utils::user_agent::classify;

/// Client metadata captured from the redirect request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

/// Result of a redirect that found its link.
///
/// The redirect is always issued once the link exists; the flags report
/// which bookkeeping steps degraded along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectOutcome {
    pub original_url: String,
    pub location: String,
    pub click_counted: bool,
    pub click_recorded: bool,
}

/// Service resolving short codes for redirects and recording the visit.
///
/// Only the lookup can fail the request. Counter increment, geolocation and
/// click persistence failures are logged and the redirect proceeds.
pub struct RedirectService<L, A>
where
    L: LinkRepository + ?Sized,
    A: AnalyticsRepository + ?Sized,
{
    link_repository: Arc<L>,
    analytics_repository: Arc<A>,
    geo_cache: Arc<GeoCache>,
}

impl<L, A> RedirectService<L, A>
where
    L: LinkRepository + ?Sized,
    A: AnalyticsRepository + ?Sized,
{
    /// Creates a new redirect service.
    pub fn new(
        link_repository: Arc<L>,
        analytics_repository: Arc<A>,
        geo_cache: Arc<GeoCache>,
    ) -> Self {
        Self {
            link_repository,
            analytics_repository,
            geo_cache,
        }
    }

    /// Resolves `code` and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown; nothing is
    /// counted or recorded in that case.
    ///
    /// Returns [`AppError::Store`] if the lookup itself fails.
    pub async fn redirect(
        &self,
        code: &str,
        client: ClientInfo,
    ) -> Result<RedirectOutcome, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let click_counted = match self.link_repository.increment_clicks(&link.code).await {
            Ok(()) => true,
            Err(e) => {
                warn!(code = %link.code, error = %e, "Failed to increment click counter, redirecting anyway");
                false
            }
        };

        let profile = classify(&client.user_agent);

        let location = match self.geo_cache.resolve(&client.ip).await {
            Ok(location) => location,
            Err(e) => {
                warn!(ip = %client.ip, error = %e, "Geolocation failed");
                UNKNOWN_LOCATION.to_string()
            }
        };

        let event = NewClickEvent {
            link_id: link.id,
            ip: client.ip,
            user_agent: client.user_agent,
            location: location.clone(),
            device_type: profile.device_type,
            os: profile.os,
            browser: profile.browser,
            clicked_at: Utc::now(),
        };

        let click_recorded = match self.analytics_repository.save(event).await {
            Ok(saved) => {
                debug!(code = %link.code, click_id = saved.id, "Click recorded");
                true
            }
            Err(e) => {
                error!(code = %link.code, error = %e, "Failed to record click, redirecting anyway");
                false
            }
        };

        Ok(RedirectOutcome {
            original_url: link.original_url,
            location,
            click_counted,
            click_recorded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::{MockAnalyticsRepository, MockLinkRepository};
    use crate::infrastructure::geo::{DEFAULT_TTL, GeoError, MockGeoProvider};

    const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    fn stored_link() -> Link {
        Link::new(
            42,
            7,
            "https://example.com".to_string(),
            "AbC123".to_string(),
            0,
            Utc::now(),
        )
    }

    fn geo(mock: MockGeoProvider) -> Arc<GeoCache> {
        Arc::new(GeoCache::new(Arc::new(mock), DEFAULT_TTL))
    }

    fn failing_geo() -> Arc<GeoCache> {
        let mut mock = MockGeoProvider::new();
        mock.expect_lookup().returning(|_| Err(GeoError::Timeout));
        geo(mock)
    }

    fn client(ip: &str) -> ClientInfo {
        ClientInfo {
            ip: ip.to_string(),
            user_agent: CHROME_UA.to_string(),
        }
    }

    fn link_repo_found() -> MockLinkRepository {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code()
            .returning(|_| Ok(Some(stored_link())));
        mock
    }

    #[tokio::test]
    async fn test_redirect_records_full_click() {
        let mut links = link_repo_found();
        links
            .expect_increment_clicks()
            .withf(|code| code == "AbC123")
            .times(1)
            .returning(|_| Ok(()));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .withf(|e| {
                e.link_id == 42
                    && e.ip == "203.0.113.5"
                    && e.location == "Paris, France"
                    && e.device_type == "pc"
                    && e.browser == "Chrome"
                    && e.user_agent.starts_with("Mozilla/5.0")
            })
            .times(1)
            .returning(|e| Ok(e.into_event(1)));

        let mut provider = MockGeoProvider::new();
        provider
            .expect_lookup()
            .times(1)
            .returning(|_| Ok("Paris, France".to_string()));

        let service = RedirectService::new(Arc::new(links), Arc::new(analytics), geo(provider));

        let outcome = service.redirect("abc123", client("203.0.113.5")).await.unwrap();

        assert_eq!(
            outcome,
            RedirectOutcome {
                original_url: "https://example.com".to_string(),
                location: "Paris, France".to_string(),
                click_counted: true,
                click_recorded: true,
            }
        );
    }

    #[tokio::test]
    async fn test_redirect_unknown_code_has_no_side_effects() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_code().returning(|_| Ok(None));
        links.expect_increment_clicks().times(0);

        let mut analytics = MockAnalyticsRepository::new();
        analytics.expect_save().times(0);

        // No lookup expectations: geolocation must not run.
        let service = RedirectService::new(
            Arc::new(links),
            Arc::new(analytics),
            geo(MockGeoProvider::new()),
        );

        let result = service.redirect("unknown-code", client("203.0.113.5")).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_redirect_lookup_store_error_is_fatal() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_code()
            .returning(|_| Err(AppError::store("Database error", json!({}))));

        let service = RedirectService::new(
            Arc::new(links),
            Arc::new(MockAnalyticsRepository::new()),
            geo(MockGeoProvider::new()),
        );

        let result = service.redirect("abc123", client("203.0.113.5")).await;

        assert!(matches!(result, Err(AppError::Store { .. })));
    }

    #[tokio::test]
    async fn test_redirect_survives_increment_failure() {
        let mut links = link_repo_found();
        links
            .expect_increment_clicks()
            .returning(|_| Err(AppError::store("Database error", json!({}))));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .times(1)
            .returning(|e| Ok(e.into_event(1)));

        let service = RedirectService::new(Arc::new(links), Arc::new(analytics), failing_geo());

        let outcome = service.redirect("abc123", client("203.0.113.5")).await.unwrap();

        assert_eq!(outcome.original_url, "https://example.com");
        assert!(!outcome.click_counted);
        assert!(outcome.click_recorded);
    }

    #[tokio::test]
    async fn test_redirect_survives_analytics_failure() {
        let mut links = link_repo_found();
        links.expect_increment_clicks().returning(|_| Ok(()));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .times(1)
            .returning(|_| Err(AppError::store("Database error", json!({}))));

        let service = RedirectService::new(Arc::new(links), Arc::new(analytics), failing_geo());

        let outcome = service.redirect("abc123", client("203.0.113.5")).await.unwrap();

        assert_eq!(outcome.original_url, "https://example.com");
        assert!(outcome.click_counted);
        assert!(!outcome.click_recorded);
    }

    #[tokio::test]
    async fn test_redirect_geo_failure_records_unknown_location() {
        let mut links = link_repo_found();
        links.expect_increment_clicks().returning(|_| Ok(()));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .withf(|e| e.location == UNKNOWN_LOCATION)
            .times(1)
            .returning(|e| Ok(e.into_event(1)));

        let service = RedirectService::new(Arc::new(links), Arc::new(analytics), failing_geo());

        let outcome = service.redirect("abc123", client("203.0.113.5")).await.unwrap();

        assert_eq!(outcome.location, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_redirect_invalid_client_ip_records_unknown_location() {
        let mut links = link_repo_found();
        links.expect_increment_clicks().returning(|_| Ok(()));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .withf(|e| e.location == UNKNOWN_LOCATION && e.ip == "garbage")
            .times(1)
            .returning(|e| Ok(e.into_event(1)));

        let service = RedirectService::new(
            Arc::new(links),
            Arc::new(analytics),
            geo(MockGeoProvider::new()),
        );

        let outcome = service.redirect("abc123", client("garbage")).await.unwrap();

        assert_eq!(outcome.location, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_redirect_loopback_is_localhost_without_lookup() {
        let mut links = link_repo_found();
        links.expect_increment_clicks().returning(|_| Ok(()));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .withf(|e| e.location == "localhost")
            .returning(|e| Ok(e.into_event(1)));

        let service = RedirectService::new(
            Arc::new(links),
            Arc::new(analytics),
            geo(MockGeoProvider::new()),
        );

        let outcome = service.redirect("abc123", client("127.0.0.1")).await.unwrap();

        assert_eq!(outcome.location, "localhost");
    }

    #[tokio::test]
    async fn test_redirect_empty_user_agent_is_unknown() {
        let mut links = link_repo_found();
        links.expect_increment_clicks().returning(|_| Ok(()));

        let mut analytics = MockAnalyticsRepository::new();
        analytics
            .expect_save()
            .withf(|e| e.device_type == "unknown" && e.os == "unknown" && e.browser == "unknown")
            .times(1)
            .returning(|e| Ok(e.into_event(1)));

        let service = RedirectService::new(Arc::new(links), Arc::new(analytics), failing_geo());

        let result = service
            .redirect(
                "abc123",
                ClientInfo {
                    ip: "203.0.113.5".to_string(),
                    user_agent: String::new(),
                },
            )
            .await;

        assert!(result.is_ok());
    }
}
