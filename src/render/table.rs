//! Table Port
//!
//! Plain HTML fallback: one table per group, one row per item.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use leptos::prelude::*;

use super::{ChartPort, ViewWindow};
use crate::models::TimelineData;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub duration_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSection {
    pub title: String,
    pub rows: Vec<TableRow>,
}

/// Whole days covered by `start..=end`: `ceil((end - start) / day) + 1`
pub fn duration_days(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<i64> {
    let (start, end) = (start?, end?);
    let ms = (end - start).num_milliseconds() as f64;
    Some((ms / MS_PER_DAY).ceil() as i64 + 1)
}

/// Sections in group order. Items pointing at an unknown group are dropped
/// and groups without items are skipped.
pub fn build_sections(data: &TimelineData) -> Vec<TableSection> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sections: Vec<TableSection> = Vec::new();
    for group in &data.groups {
        match index.get(group.id.as_str()) {
            Some(&i) => sections[i].title = group.title.clone(),
            None => {
                index.insert(group.id.as_str(), sections.len());
                sections.push(TableSection { title: group.title.clone(), rows: Vec::new() });
            }
        }
    }

    let mut dropped = 0usize;
    for item in &data.items {
        let Some(&i) = index.get(item.group.as_str()) else {
            dropped += 1;
            continue;
        };
        let (start, end) = (item.start_at(), item.end_at());
        sections[i].rows.push(TableRow {
            label: item.label().to_string(),
            start,
            end,
            duration_days: duration_days(start, end),
        });
    }
    if dropped > 0 {
        log::debug!("table view skipped {} items without a matching group", dropped);
    }

    sections.retain(|s| !s.rows.is_empty());
    sections
}

fn format_day(at: Option<NaiveDateTime>) -> String {
    match at {
        Some(at) => {
            let date = js_sys::Date::new_with_year_month_day(at.year() as u32, at.month0() as i32, at.day() as i32);
            String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED))
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

fn format_duration(days: Option<i64>) -> String {
    match days {
        Some(1) => "1 day".to_string(),
        Some(n) => format!("{} days", n),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Grouped table rendering of timeline data
#[component]
pub fn TimelineTable(sections: Vec<TableSection>) -> impl IntoView {
    view! {
        <div class="table-timeline">
            <h2 class="table-timeline-title">"Timeline Dashboard"</h2>
            {sections.into_iter().map(|section| view! {
                <section class="table-section">
                    <h3>{section.title}</h3>
                    <div class="table-scroll">
                        <table class="timeline-table">
                            <thead>
                                <tr>
                                    <th>"Issue"</th>
                                    <th>"Start"</th>
                                    <th>"End"</th>
                                    <th>"Duration"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {section.rows.into_iter().map(|row| view! {
                                    <tr>
                                        <td class="cell-issue">{row.label}</td>
                                        <td class="cell-date">{format_day(row.start)}</td>
                                        <td class="cell-date">{format_day(row.end)}</td>
                                        <td class="cell-duration">{format_duration(row.duration_days)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                </section>
            }).collect_view()}
        </div>
    }
}

/// HTML table fallback. Unlike the chart, it hides items whose group is
/// not in `groups`.
pub struct TablePort;

impl ChartPort for TablePort {
    fn name(&self) -> &'static str {
        "table"
    }

    fn render(&self, data: TimelineData, _window: ViewWindow, on_rendered: Callback<()>) -> AnyView {
        let sections = build_sections(&data);
        log::info!("rendering table fallback with {} sections", sections.len());
        let view = view! { <TimelineTable sections=sections /> }.into_any();
        // plain markup cannot fail to draw
        on_rendered.run(());
        view
    }
}
