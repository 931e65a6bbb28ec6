//! Repository trait definitions for the domain layer.
//!
//! These traits are the contracts of the external collaborators the core
//! depends on. Concrete implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage, lookups, and click counters
//! - [`AnalyticsRepository`] - Click event log and aggregates
//! - [`TokenRepository`] - API token authentication
//! - [`UserRepository`] - User accounts
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod analytics_repository;
pub mod link_repository;
pub mod token_repository;
pub mod user_repository;

pub use analytics_repository::{AnalyticsRepository, AnalyticsSummary};
pub use link_repository::LinkRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
