//! Click event entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// One recorded visit to a short link with derived client metadata.
///
/// Created once per successful redirect and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ClickEvent {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub location: String,
    pub device_type: String,
    pub os: String,
    pub browser: String,
    pub clicked_at: DateTime<Utc>,
}

/// Input data for recording a click event.
///
/// `clicked_at` is captured by the redirect pipeline when the request is
/// handled, not when the row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClickEvent {
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub location: String,
    pub device_type: String,
    pub os: String,
    pub browser: String,
    pub clicked_at: DateTime<Utc>,
}

impl NewClickEvent {
    /// Attaches the generated row id, producing the persisted event.
    pub fn into_event(self, id: i64) -> ClickEvent {
        ClickEvent {
            id,
            link_id: self.link_id,
            ip: self.ip,
            user_agent: self.user_agent,
            location: self.location,
            device_type: self.device_type,
            os: self.os,
            browser: self.browser,
            clicked_at: self.clicked_at,
        }
    }
}
