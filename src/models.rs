//! Frontend Models
//!
//! Data structures matching the backend API payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Project data structure (matches `/api/projects`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

impl Project {
    /// Button label: `"<key> - <name>"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.key, self.name)
    }
}

/// Server-side dimension used to bucket items into groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupBy {
    #[default]
    Project,
    Assignee,
}

impl GroupBy {
    pub const ALL: [GroupBy; 2] = [GroupBy::Project, GroupBy::Assignee];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupBy::Project => "project",
            GroupBy::Assignee => "assignee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Project => "Project",
            GroupBy::Assignee => "Assignee",
        }
    }

    /// Unknown values fall back to the default grouping
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "assignee" => GroupBy::Assignee,
            _ => GroupBy::Project,
        }
    }
}

/// One bar in the chart (matches backend `items[]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub group: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Everything else the backend attaches (status, priority, url, overlay, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimelineItem {
    pub fn start_at(&self) -> Option<NaiveDateTime> {
        self.start.as_deref().and_then(parse_timestamp)
    }

    pub fn end_at(&self) -> Option<NaiveDateTime> {
        self.end.as_deref().and_then(parse_timestamp)
    }

    /// Label shown in the table: content, or the id when there is none
    pub fn label(&self) -> &str {
        if self.content.is_empty() { &self.id } else { &self.content }
    }
}

/// A lane the items are organized into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGroup {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// `order`, `project`, `level` and whatever else the grouping adds
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `/api/timeline` and `/api/sample`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub items: Vec<TimelineItem>,
    #[serde(default)]
    pub groups: Vec<TimelineGroup>,
}

/// Parse the date formats the backend emits: `YYYY-MM-DD`, naive ISO
/// date-times and RFC 3339. Plain dates map to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// True when `raw` is a bare calendar date without a time part
pub fn is_plain_date(raw: &str) -> bool {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").is_ok()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_accept_numbers() {
        let item: TimelineItem =
            serde_json::from_str(r#"{"id": 42, "group": "SR", "content": "SR-42"}"#).unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.group, "SR");
        assert_eq!(item.start, None);
    }

    #[test]
    fn test_item_label_falls_back_to_id() {
        let item: TimelineItem = serde_json::from_str(r#"{"id": "SR-1", "group": 1}"#).unwrap();
        assert_eq!(item.label(), "SR-1");
        assert_eq!(item.group, "1");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-03"), Some(midnight));
        assert_eq!(
            parse_timestamp("2024-01-03T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap().and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            parse_timestamp("2024-01-03T10:30:00+09:00"),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap().and_hms_opt(1, 30, 0)
        );
        assert_eq!(parse_timestamp("soon"), None);
    }

    #[test]
    fn test_group_by_parse() {
        assert_eq!(GroupBy::parse("assignee"), GroupBy::Assignee);
        assert_eq!(GroupBy::parse("project"), GroupBy::Project);
        assert_eq!(GroupBy::parse("epic"), GroupBy::Project);
        assert_eq!(GroupBy::parse(""), GroupBy::Project);
    }

    #[test]
    fn test_backend_fields_survive_round_trip() {
        let body = r##"{
            "items": [{"id": "SR-1", "group": "SR_EPIC_1", "content": "Login", "start": "2024-01-01",
                       "color": "#3b82f6", "status": "In Progress", "priority": "High",
                       "url": "https://jira.example/browse/SR-1", "overlay": {"note": "blocked"}}],
            "groups": [{"id": "SR_EPIC_1", "title": "SR | Epic", "order": 2, "project": "SR", "level": 1}]
        }"##;
        let data: TimelineData = serde_json::from_str(body).unwrap();
        assert_eq!(data.items[0].extra["status"], "In Progress");
        assert_eq!(data.groups[0].extra["order"], 2);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["items"][0]["status"], "In Progress");
        assert_eq!(json["items"][0]["overlay"]["note"], "blocked");
        assert_eq!(json["groups"][0]["order"], 2);
        assert_eq!(json["groups"][0]["level"], 1);
        // known fields are not duplicated into the extras
        assert!(!data.items[0].extra.contains_key("color"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let data: TimelineData = serde_json::from_str("{}").unwrap();
        assert!(data.items.is_empty());
        assert!(data.groups.is_empty());
    }
}
