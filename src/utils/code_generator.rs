//! Short code generation and validation utilities.
//!
//! Generated codes are 6 characters drawn from the URL-safe base64 alphabet
//! (`A-Z a-z 0-9 - _`) using the operating system's random source. Custom
//! codes supplied by users are validated separately and never generated.

use std::future::Future;

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Random bytes drawn per code; 6 bytes encode to 8 base64 characters.
const CODE_LENGTH_BYTES: usize = 6;

/// Upper bound on generate-and-check rounds before giving up.
///
/// With 64^6 possible codes a collision streak this long only happens with a
/// broken existence oracle.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

const CUSTOM_CODE_MIN_LEN: usize = 2;
const CUSTOM_CODE_MAX_LEN: usize = 20;

/// First path segments claimed by fixed routes; a link under one of these
/// could never be reached through `GET /{code}`.
pub const RESERVED_CODES: &[&str] = &["api", "health"];

/// Returns true if `c` belongs to the URL-safe code alphabet.
pub fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Returns true if `code` collides with a fixed route, ignoring ASCII case.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Generates a cryptographically secure random short code.
///
/// # Errors
///
/// Returns [`AppError::Generation`] if the system random source fails.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::generation(
            "Failed to generate short code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(CODE_LENGTH);
    Ok(code)
}

/// Generates a code that the existence oracle reports as unused.
///
/// Loops generate → check → retry on collision. Stops after
/// [`MAX_GENERATION_ATTEMPTS`] collisions so that a misbehaving oracle cannot
/// hang the caller.
///
/// # Errors
///
/// Returns [`AppError::Generation`] if the random source fails, the existence
/// check fails, or every attempt collided.
pub async fn generate_unique<F, Fut>(mut exists: F) -> Result<String, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let code = generate_code()?;

        if is_reserved(&code) {
            continue;
        }

        let taken = exists(code.clone()).await.map_err(|e| {
            AppError::generation(
                "Failed to check short code uniqueness",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if !taken {
            return Ok(code);
        }

        tracing::debug!(code = %code, "Generated short code collided, retrying");
    }

    Err(AppError::generation(
        "Failed to generate unique code",
        json!({ "reason": "Too many collisions", "attempts": MAX_GENERATION_ATTEMPTS }),
    ))
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 2-20 characters
/// - Allowed characters: letters (any case), digits, `_`, `-`
/// - Not one of [`RESERVED_CODES`], in any case
///
/// Case is preserved; uniqueness is checked separately against the store.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("My_Link-2024").is_ok());
/// assert!(validate_custom_code("x").is_err());        // Too short
/// assert!(validate_custom_code("promo!").is_err());   // Bad character
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    let len = code.chars().count();
    if !(CUSTOM_CODE_MIN_LEN..=CUSTOM_CODE_MAX_LEN).contains(&len) {
        return Err(AppError::invalid_input(
            "Custom code must be 2-20 characters",
            json!({ "provided_length": len }),
        ));
    }

    if !code.chars().all(is_code_char) {
        return Err(AppError::invalid_input(
            "Custom code can only contain letters, digits, underscores, and hyphens",
            json!({ "code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::invalid_input(
            "Custom code is reserved",
            json!({ "code": code, "reserved": RESERVED_CODES }),
        ));
    }

    Ok(())
}
