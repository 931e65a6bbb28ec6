//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::CallerIdentity;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 keyed by `secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. The `admin` CLI uses the
/// same function when issuing tokens, so both sides must share the secret.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Resolves a token to the user that owns it. An attacker with read-only
/// access to the database cannot verify or forge tokens without the
/// server-side secret.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns the caller it belongs to.
    ///
    /// On success, updates the token's `last_used_at` timestamp; failure to
    /// do so does not fail authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] if the token is unknown or revoked.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user_id = self
            .repository
            .find_owner(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthenticated(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(user_id, error = %e, "Failed to update token last_used_at");
        }

        Ok(CallerIdentity { user_id })
    }
}
