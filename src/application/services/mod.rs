//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;
pub mod redirect_service;
pub mod stats_service;

pub use auth_service::AuthService;
pub use link_service::{CreatedLink, LinkService};
pub use redirect_service::{ClientInfo, RedirectOutcome, RedirectService};
pub use stats_service::{LinkAnalytics, StatsService};
