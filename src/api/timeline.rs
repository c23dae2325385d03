//! Timeline Endpoints

use serde::Deserialize;

use super::{check_error, get_text};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::{TimelineData, TimelineGroup, TimelineItem};
use crate::url_state::{encode_pairs, FilterState};

pub const TIMELINE_PATH: &str = "/api/timeline";
pub const SAMPLE_PATH: &str = "/api/sample";

#[derive(Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    items: Vec<TimelineItem>,
    #[serde(default)]
    groups: Vec<TimelineGroup>,
    #[serde(default)]
    error: Option<String>,
}

/// `/api/timeline` with every non-empty filter as a query parameter
pub fn timeline_url(config: &DashboardConfig, filter: &FilterState) -> String {
    format!("{}?{}", config.endpoint(TIMELINE_PATH), encode_pairs(&filter.params()))
}

pub fn sample_url(config: &DashboardConfig) -> String {
    config.endpoint(SAMPLE_PATH)
}

pub async fn fetch_timeline(url: &str) -> Result<TimelineData, DashboardError> {
    let body = get_text(url).await?;
    decode_timeline(&body)
}

pub fn decode_timeline(body: &str) -> Result<TimelineData, DashboardError> {
    let response: TimelineResponse = serde_json::from_str(body)?;
    check_error(response.error)?;
    Ok(TimelineData { items: response.items, groups: response.groups })
}
