//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, lookups, and click counters
//! - [`PgAnalyticsRepository`] - Click event log and grouped aggregates
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`PgUserRepository`] - User accounts

pub mod pg_analytics_repository;
pub mod pg_link_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
