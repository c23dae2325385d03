//! UI Components
//!
//! Leptos components for the dashboard header and chart pane.

mod project_selector;
mod filter_bar;
mod timeline_pane;

pub use project_selector::ProjectSelector;
pub use filter_bar::FilterBar;
pub use timeline_pane::TimelinePane;
