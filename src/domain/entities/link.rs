//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by a user.
///
/// The short code is unique under case-insensitive comparison; the stored
/// value keeps the casing it was created with. `click_count` only ever grows
/// and is incremented by the redirect path.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub original_url: String,
    pub code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        user_id: i64,
        original_url: String,
        code: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            original_url,
            code,
            click_count,
            created_at,
        }
    }

    /// Returns true if `code` refers to this link, ignoring ASCII case.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }
}

/// Input data for creating a new link.
///
/// The click counter starts at zero and the creation time is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub user_id: i64,
    pub original_url: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            7,
            "https://example.com".to_string(),
            "aB3_x-".to_string(),
            0,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.user_id, 7);
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.code, "aB3_x-");
        assert_eq!(link.click_count, 0);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_matches_code_ignores_case() {
        let link = Link::new(
            1,
            1,
            "https://example.com".to_string(),
            "PromoCode".to_string(),
            3,
            Utc::now(),
        );

        assert!(link.matches_code("promocode"));
        assert!(link.matches_code("PROMOCODE"));
        assert!(!link.matches_code("promo"));
    }
}
