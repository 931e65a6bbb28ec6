//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and retrieval
//! - [`services::redirect_service::RedirectService`] - Redirect pipeline with click recording
//! - [`services::stats_service::StatsService`] - Per-link click analytics
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
