//! Timeline Rendering
//!
//! A chart is drawn through a [`ChartPort`]. The vis-timeline port is the
//! normal path; the table port takes over when the page has the `vis`
//! namespace but no `vis.Timeline`.

mod table;
mod vis;

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use leptos::prelude::*;
use leptos_vis_timeline::LibraryStatus;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::TimelineData;
use crate::url_state::FilterState;

pub use table::{build_sections, TablePort, TableSection, TimelineTable};
pub use vis::{standalone_chart, VisTimelinePort};

/// Initial visible range of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ViewWindow {
    /// Midnight `before` days ago through midnight `after` days ahead.
    /// Offsets that leave chrono's range collapse onto today.
    pub fn around(today: NaiveDate, before: i64, after: i64) -> Self {
        let midnight = today.and_time(chrono::NaiveTime::MIN);
        let days = |n: i64| Days::new(u64::try_from(n).unwrap_or(0));
        Self {
            start: midnight.checked_sub_days(days(before)).unwrap_or(midnight),
            end: midnight.checked_add_days(days(after)).unwrap_or(midnight),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::around(Local::now().date_naive(), config.window_days_before, config.window_days_after)
    }
}

/// Something that can draw timeline data
pub trait ChartPort {
    fn name(&self) -> &'static str;

    /// Build the view for `data`. Every call produces a fresh chart.
    ///
    /// `on_rendered` runs once the chart is actually on screen and never
    /// runs when drawing fails.
    fn render(&self, data: TimelineData, window: ViewWindow, on_rendered: Callback<()>) -> AnyView;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Vis,
    Table,
}

impl PortKind {
    pub fn port(self) -> Box<dyn ChartPort> {
        match self {
            PortKind::Vis => Box::new(VisTimelinePort),
            PortKind::Table => Box::new(TablePort),
        }
    }
}

/// Pick the port for what the page has loaded
pub fn choose_port(status: LibraryStatus) -> Result<PortKind, DashboardError> {
    match status {
        LibraryStatus::Missing => Err(DashboardError::LibraryMissing),
        LibraryStatus::NamespaceOnly => {
            log::warn!("vis.Timeline is not defined, falling back to the HTML table");
            Ok(PortKind::Table)
        }
        LibraryStatus::Ready => Ok(PortKind::Vis),
    }
}

/// What the `#app` container currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PaneState {
    #[default]
    Idle,
    Loading(String),
    Failed(String),
    NoData,
    Chart {
        data: TimelineData,
        port: PortKind,
        /// Filters to write to the URL once the chart has drawn
        persist_on_render: Option<FilterState>,
    },
}

impl PaneState {
    /// Data currently on screen, if any
    pub fn data(&self) -> Option<&TimelineData> {
        match self {
            PaneState::Chart { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Decide how freshly loaded data is presented
pub fn present(data: TimelineData, status: LibraryStatus) -> PaneState {
    if data.items.is_empty() {
        log::info!("timeline response has no items");
        return PaneState::NoData;
    }
    log::info!("rendering {} items in {} groups", data.items.len(), data.groups.len());
    match choose_port(status) {
        Ok(port) => PaneState::Chart { data, port, persist_on_render: None },
        Err(e) => {
            log::error!("{}", e);
            PaneState::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimelineGroup, TimelineItem};

    fn sample_data() -> TimelineData {
        TimelineData {
            items: vec![TimelineItem {
                id: "SR-1".into(),
                group: "SR".into(),
                content: "Login".into(),
                title: None,
                start: Some("2024-01-01".into()),
                end: None,
                color: None,
                extra: Default::default(),
            }],
            groups: vec![TimelineGroup { id: "SR".into(), title: "SR".into(), content: None, extra: Default::default() }],
        }
    }

    #[test]
    fn test_namespace_without_timeline_uses_table() {
        let port = choose_port(LibraryStatus::NamespaceOnly).unwrap();
        assert_eq!(port, PortKind::Table);
        assert_eq!(port.port().name(), "table");
        assert_eq!(choose_port(LibraryStatus::Ready).unwrap().port().name(), "vis-timeline");
    }

    #[test]
    fn test_missing_library_is_a_failure() {
        assert!(matches!(choose_port(LibraryStatus::Missing), Err(DashboardError::LibraryMissing)));
        assert!(matches!(present(sample_data(), LibraryStatus::Missing), PaneState::Failed(_)));
    }

    #[test]
    fn test_empty_items_show_no_data_before_probing() {
        let data = TimelineData { items: vec![], ..sample_data() };
        assert_eq!(present(data, LibraryStatus::Missing), PaneState::NoData);
    }

    #[test]
    fn test_present_keeps_data() {
        let pane = present(sample_data(), LibraryStatus::Ready);
        assert_eq!(pane.data().map(|d| d.items.len()), Some(1));
    }

    #[test]
    fn test_window_around_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = ViewWindow::around(today, 14, 45);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_window_out_of_range_does_not_panic() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let midnight = today.and_hms_opt(0, 0, 0).unwrap();
        let window = ViewWindow::around(today, i64::MAX, -5);
        assert_eq!(window.start, midnight);
        assert_eq!(window.end, midnight);
    }
}
