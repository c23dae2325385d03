//! Dashboard Configuration
//!
//! Optional JSON embedded in the host page:
//!
//! ```html
//! <script id="dashboard-config" type="application/json">
//!   { "api_base": "", "log_level": "debug" }
//! </script>
//! ```

use log::LevelFilter;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Upper bound for either side of the initial chart window
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every `/api/...` path
    pub api_base: String,
    pub log_level: String,
    /// Days shown before today in the initial chart window
    pub window_days_before: i64,
    /// Days shown after today in the initial chart window
    pub window_days_after: i64,
    /// Paint sample data on page load
    pub load_sample_on_start: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: "info".to_string(),
            window_days_before: 14,
            window_days_after: 45,
            load_sample_on_start: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str::<Self>(raw).map(Self::clamped)
    }

    fn clamped(mut self) -> Self {
        self.window_days_before = self.window_days_before.clamp(0, MAX_WINDOW_DAYS);
        self.window_days_after = self.window_days_after.clamp(0, MAX_WINDOW_DAYS);
        self
    }

    /// Read the config element from the page. Falls back to defaults; the
    /// returned warning is logged once the logger is up.
    pub fn from_page() -> (Self, Option<String>) {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            None => (Self::default(), None),
            Some(raw) => match Self::from_json(&raw) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(format!("ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e))),
            },
        }
    }

    pub fn level(&self) -> LevelFilter {
        console_logger::parse_level(&self.log_level)
    }

    /// Absolute-or-relative URL for an API path such as `/api/sample`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{"api_base": "http://localhost:5001/", "log_level": "debug"}"#).unwrap();
        assert_eq!(config.api_base, "http://localhost:5001/");
        assert_eq!(config.level(), LevelFilter::Debug);
        assert_eq!(config.window_days_before, 14);
        assert_eq!(config.window_days_after, 45);
        assert!(config.load_sample_on_start);
    }

    #[test]
    fn test_blank_config_is_default() {
        assert_eq!(DashboardConfig::from_json("  \n").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(DashboardConfig::from_json("{ api_base: ").is_err());
    }

    #[test]
    fn test_window_days_are_clamped() {
        let config =
            DashboardConfig::from_json(r#"{"window_days_before": 9223372036854775807, "window_days_after": -3}"#).unwrap();
        assert_eq!(config.window_days_before, MAX_WINDOW_DAYS);
        assert_eq!(config.window_days_after, 0);
    }

    #[test]
    fn test_endpoint_joins_base() {
        let mut config = DashboardConfig::default();
        assert_eq!(config.endpoint("/api/sample"), "/api/sample");
        config.api_base = "http://localhost:5001/".to_string();
        assert_eq!(config.endpoint("/api/projects"), "http://localhost:5001/api/projects");
    }
}
