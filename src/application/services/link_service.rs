//! Link creation service.

use std::sync::Arc;

use crate::domain::entities::{CallerIdentity, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{MAX_GENERATION_ATTEMPTS, generate_unique, validate_custom_code};
use crate::utils::url_validator::validate_destination_url;
use serde_json::json;

/// A freshly created link together with its fully qualified short URL.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: Link,
    pub short_url: String,
}

/// Service for creating and retrieving shortened links.
///
/// Handles URL validation, code generation/validation and uniqueness. The
/// store's case-insensitive unique index is the final arbiter: the existence
/// pre-check only avoids needless insert failures.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` prefixes every short URL, e.g. `https://s.example.com`.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link owned by the caller.
    ///
    /// # Code Assignment
    ///
    /// - If `custom_code` is provided, validates it and uses it verbatim (case preserved)
    /// - Otherwise, generates a random 6-character code, regenerating if the
    ///   insert loses a race for the same code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] if there is no caller.
    ///
    /// Returns [`AppError::InvalidInput`] if:
    /// - URL is not an absolute HTTP(S) URL
    /// - Custom code violates the length or charset rules
    ///
    /// Returns [`AppError::CodeConflict`] if the custom code is already taken.
    ///
    /// Returns [`AppError::Generation`] if no unused code could be generated.
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn create_link(
        &self,
        caller: Option<CallerIdentity>,
        original_url: String,
        custom_code: Option<String>,
    ) -> Result<CreatedLink, AppError> {
        let caller = caller.ok_or_else(|| {
            AppError::unauthenticated(
                "Authentication required",
                json!({ "reason": "Missing caller identity" }),
            )
        })?;

        let original_url = validate_destination_url(&original_url).map_err(|e| {
            AppError::invalid_input("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let link = match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => {
                self.create_with_custom_code(caller, original_url, custom)
                    .await?
            }
            None => self.create_with_generated_code(caller, original_url).await?,
        };

        tracing::info!(code = %link.code, user_id = link.user_id, "Short link created");

        let short_url = self.short_url(&link.code);
        Ok(CreatedLink { link, short_url })
    }

    async fn create_with_custom_code(
        &self,
        caller: CallerIdentity,
        original_url: String,
        custom: String,
    ) -> Result<Link, AppError> {
        validate_custom_code(&custom)?;

        if self.link_repository.exists_code(&custom).await? {
            return Err(AppError::conflict(
                "Custom code already exists",
                json!({ "code": custom }),
            ));
        }

        self.link_repository
            .create(NewLink {
                user_id: caller.user_id,
                original_url,
                code: custom,
            })
            .await
    }

    async fn create_with_generated_code(
        &self,
        caller: CallerIdentity,
        original_url: String,
    ) -> Result<Link, AppError> {
        let repository = &self.link_repository;

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_unique(|code| async move { repository.exists_code(&code).await })
                .await?;

            let result = repository
                .create(NewLink {
                    user_id: caller.user_id,
                    original_url: original_url.clone(),
                    code: code.clone(),
                })
                .await;

            match result {
                Err(AppError::CodeConflict { .. }) => {
                    tracing::debug!(code = %code, "Generated code taken concurrently, regenerating");
                }
                other => return other,
            }
        }

        Err(AppError::generation(
            "Failed to generate unique code",
            json!({ "reason": "Insert kept conflicting", "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Checks that the link store answers queries.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}
