//! URL State Codec
//!
//! Filter state <-> query string. Encoding follows
//! `application/x-www-form-urlencoded` so links match what browsers produce.

use chrono::NaiveDate;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::JsValue;

use crate::models::GroupBy;

/// Everything except `*-._` and alphanumerics
const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_');

const DATE_FORMAT: &str = "%Y-%m-%d";

/// User-selected filters, shared by the controls, the loader and the URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected project keys, in button order once projects are loaded
    pub projects: Vec<String>,
    pub group_by: GroupBy,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub user_owner: Option<String>,
}

impl FilterState {
    /// Comma-joined project keys (the hidden `#projects` value)
    pub fn projects_csv(&self) -> String {
        self.projects.join(",")
    }

    /// Canonical parameter list: empty values omitted, `group_by` always present
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.projects.is_empty() {
            params.push(("projects", self.projects_csv()));
        }
        params.push(("group_by", self.group_by.as_str().to_string()));
        if let Some(date) = self.from_date {
            params.push(("from_date", date.format(DATE_FORMAT).to_string()));
        }
        if let Some(date) = self.to_date {
            params.push(("to_date", date.format(DATE_FORMAT).to_string()));
        }
        if let Some(owner) = self.user_owner.as_deref().filter(|o| !o.trim().is_empty()) {
            params.push(("user_owner", owner.trim().to_string()));
        }
        params
    }
}

/// Parse a `location.search` string (leading `?` optional)
pub fn parse_query(search: &str) -> FilterState {
    let pairs = decode_pairs(search);
    let get = |name: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    };

    FilterState {
        projects: get("projects").or_else(|| get("project")).map(split_keys).unwrap_or_default(),
        group_by: get("group_by").map(GroupBy::parse).unwrap_or_default(),
        from_date: get("from_date").and_then(parse_date),
        to_date: get("to_date").and_then(parse_date),
        user_owner: get("user_owner").map(str::to_string),
    }
}

/// Serialize to a query string without the leading `?`
pub fn to_query(state: &FilterState) -> String {
    encode_pairs(&state.params())
}

/// Project keys from a `projects`/`project` value
pub fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub(crate) fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, FORM).to_string().replace("%20", "+")
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " ")).decode_utf8_lossy().into_owned()
}

fn decode_pairs(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

// ========================
// Browser bindings
// ========================

fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Filter state encoded in the current page URL
pub fn restore() -> FilterState {
    parse_query(&current_search())
}

/// Replace the address bar query without navigating or adding history
pub fn persist(state: &FilterState) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
    let url = format!("{}?{}", path, to_query(state));
    window.history()?.replace_state_with_url(&JsValue::NULL, "", Some(&url))?;
    log::debug!("persisted filter state to {}", url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let state = parse_query("?projects=SR%2CAB&group_by=assignee&from_date=2024-01-01&to_date=2024-02-01");
        assert_eq!(state.projects, vec!["SR", "AB"]);
        assert_eq!(state.group_by, GroupBy::Assignee);
        assert_eq!(state.from_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(state.to_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(state.user_owner, None);
    }

    #[test]
    fn test_project_alias_and_defaults() {
        let state = parse_query("project=SR");
        assert_eq!(state.projects, vec!["SR"]);
        assert_eq!(state.group_by, GroupBy::Project);
        assert_eq!(state.from_date, None);

        // an empty `projects` does not hide `project`
        let state = parse_query("projects=&project=AB");
        assert_eq!(state.projects, vec!["AB"]);

        assert_eq!(parse_query(""), FilterState::default());
    }

    #[test]
    fn test_keys_are_trimmed_and_empties_dropped() {
        let state = parse_query("projects=+SR+,,AB,");
        assert_eq!(state.projects, vec!["SR", "AB"]);
    }

    #[test]
    fn test_invalid_dates_are_ignored() {
        let state = parse_query("from_date=yesterday&to_date=2024-13-40");
        assert_eq!(state.from_date, None);
        assert_eq!(state.to_date, None);
    }

    #[test]
    fn test_group_by_is_always_written() {
        assert_eq!(to_query(&FilterState::default()), "group_by=project");
    }

    #[test]
    fn test_canonical_query() {
        let state = FilterState {
            projects: vec!["SR".into(), "AB".into()],
            group_by: GroupBy::Assignee,
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            to_date: None,
            user_owner: Some("kim min".into()),
        };
        assert_eq!(
            to_query(&state),
            "projects=SR%2CAB&group_by=assignee&from_date=2024-01-01&user_owner=kim+min"
        );
        assert_eq!(parse_query(&to_query(&state)), state);
    }

    #[test]
    fn test_blank_owner_is_omitted() {
        let state = FilterState { user_owner: Some("  ".into()), ..Default::default() };
        assert_eq!(to_query(&state), "group_by=project");
    }
}
