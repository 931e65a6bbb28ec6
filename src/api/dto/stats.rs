//! DTOs for link analytics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::services::LinkAnalytics;

/// Aggregated analytics for one short link.
///
/// `click_count` is the link's redirect counter; `total_clicks` counts the
/// recorded click events. They differ when a counter increment or a click
/// write degraded during a redirect.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub total_clicks: i64,
    pub devices: BTreeMap<String, i64>,
    pub browsers: BTreeMap<String, i64>,
    pub locations: BTreeMap<String, i64>,
}

impl From<LinkAnalytics> for StatsResponse {
    fn from(analytics: LinkAnalytics) -> Self {
        let LinkAnalytics { link, summary } = analytics;

        Self {
            short_code: link.code,
            original_url: link.original_url,
            click_count: link.click_count,
            total_clicks: summary.total_clicks,
            devices: summary.devices,
            browsers: summary.browsers,
            locations: summary.locations,
        }
    }
}
