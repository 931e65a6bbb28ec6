//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RedirectService, StatsService};
use crate::domain::repositories::{AnalyticsRepository, LinkRepository, TokenRepository};
use crate::infrastructure::geo::GeoCache;

pub type SharedLinkService = Arc<LinkService<dyn LinkRepository>>;
pub type SharedRedirectService = Arc<RedirectService<dyn LinkRepository, dyn AnalyticsRepository>>;
pub type SharedStatsService = Arc<StatsService<dyn LinkRepository, dyn AnalyticsRepository>>;
pub type SharedAuthService = Arc<AuthService<dyn TokenRepository>>;

/// Services and settings shared across requests.
///
/// Services hold trait objects so the same router can run against PostgreSQL
/// repositories in production and mocks in tests.
#[derive(Clone)]
pub struct AppState {
    pub link_service: SharedLinkService,
    pub redirect_service: SharedRedirectService,
    pub stats_service: SharedStatsService,
    pub auth_service: SharedAuthService,
    pub geo_cache: Arc<GeoCache>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the client address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires services over the given repositories and geolocation cache.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        analytics_repository: Arc<dyn AnalyticsRepository>,
        token_repository: Arc<dyn TokenRepository>,
        geo_cache: Arc<GeoCache>,
        settings: StateSettings,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                link_repository.clone(),
                settings.base_url,
            )),
            redirect_service: Arc::new(RedirectService::new(
                link_repository.clone(),
                analytics_repository.clone(),
                geo_cache.clone(),
            )),
            stats_service: Arc::new(StatsService::new(link_repository, analytics_repository)),
            auth_service: Arc::new(AuthService::new(
                token_repository,
                settings.token_signing_secret,
            )),
            geo_cache,
            behind_proxy: settings.behind_proxy,
        }
    }
}

/// Plain settings the state needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub base_url: String,
    pub token_signing_secret: String,
    pub behind_proxy: bool,
}
