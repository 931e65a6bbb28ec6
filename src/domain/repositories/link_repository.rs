//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// All code lookups are case-insensitive. Implementations must enforce code
/// uniqueness at the storage layer so that a concurrent insert of the same
/// code fails with [`AppError::CodeConflict`] even after a passing
/// [`exists_code`](Self::exists_code) pre-check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link with a zero click counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code is already taken under
    /// case-insensitive comparison.
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, ignoring case.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Increments the click counter of the link with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Checks whether a code is already in use, ignoring case.
    ///
    /// This is the existence oracle handed to the short-code generator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn exists_code(&self, code: &str) -> Result<bool, AppError>;

    /// Verifies that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
