//! User entity owning short links and API tokens.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// Users are created by operators through the `admin` CLI; the HTTP surface
/// only ever sees the opaque user id resolved from an API token.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// Identity of the authenticated caller, attached to requests by the auth
/// middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: i64,
}
