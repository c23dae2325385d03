//! vis-timeline Port
//!
//! Maps timeline records onto the item/group/options model of `vis.Timeline`.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_vis_timeline::{build_timeline, mount_when_ready, TimelineSetup};
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::{JsCast, JsValue};

use super::{ChartPort, ViewWindow};
use crate::error::DashboardError;
use crate::models::{is_plain_date, TimelineData, TimelineGroup, TimelineItem};

const DAY_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;
const JS_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";
const NOW_MARKER: &str = "now";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisItem {
    pub id: String,
    pub group: String,
    pub content: String,
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub style: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisGroup {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Carries `order`, which vis sorts groups by
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisMargin {
    pub item: u32,
    pub axis: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisTimeAxis {
    pub scale: &'static str,
    pub step: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisOptions {
    pub stack: bool,
    pub orientation: &'static str,
    pub multiselect: bool,
    pub show_current_time: bool,
    pub zoom_key: &'static str,
    pub margin: VisMargin,
    pub min: String,
    pub max: String,
    pub time_axis: VisTimeAxis,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub height: &'static str,
    pub auto_resize: bool,
    pub vertical_scroll: bool,
    pub horizontal_scroll: bool,
    pub zoomable: bool,
    pub moveable: bool,
    pub selectable: bool,
    pub editable: bool,
    pub show_major_labels: bool,
    pub show_minor_labels: bool,
    pub show_week_scale: bool,
    pub item_height_ratio: f64,
    pub item_margin: u32,
    pub group_height_mode: &'static str,
    pub group_height: u32,
    pub show_group_labels: bool,
}

/// Chart item for one record. Plain-date ends run through 23:59:59 so a
/// bar covers its whole last day.
pub fn to_vis_item(item: &TimelineItem) -> VisItem {
    let style = match item.color.as_deref().filter(|c| !c.is_empty()) {
        Some(color) => format!("background-color:{0};border-color:{0};color:#111;font-weight:500;", color),
        None => "font-weight:500;".to_string(),
    };
    VisItem {
        id: item.id.clone(),
        group: item.group.clone(),
        content: item.content.clone(),
        title: item
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| item.content.clone()),
        start: item.start.clone().filter(|s| !s.is_empty()),
        end: item.end.as_deref().filter(|e| !e.is_empty()).map(end_of_day),
        style,
        extra: item.extra.clone(),
    }
}

pub fn to_vis_group(group: &TimelineGroup) -> VisGroup {
    VisGroup {
        id: group.id.clone(),
        title: group.title.clone(),
        content: group.content.clone().unwrap_or_else(|| group.title.clone()),
        extra: group.extra.clone(),
    }
}

pub fn vis_options(window: &ViewWindow) -> VisOptions {
    VisOptions {
        stack: false,
        orientation: "top",
        multiselect: false,
        show_current_time: true,
        zoom_key: "ctrlKey",
        margin: VisMargin { item: 4, axis: 12 },
        min: window.start.format(JS_DATETIME).to_string(),
        max: window.end.format(JS_DATETIME).to_string(),
        time_axis: VisTimeAxis { scale: "day", step: 1 },
        zoom_min: DAY_MS,
        zoom_max: DAY_MS * 365.0,
        height: "100%",
        auto_resize: true,
        vertical_scroll: true,
        horizontal_scroll: true,
        zoomable: true,
        moveable: true,
        selectable: false,
        editable: false,
        show_major_labels: true,
        show_minor_labels: true,
        show_week_scale: true,
        item_height_ratio: 0.7,
        item_margin: 1,
        group_height_mode: "fixed",
        group_height: 40,
        show_group_labels: true,
    }
}

/// Everything a page needs to draw the chart without this app
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandaloneChart {
    pub items: Vec<VisItem>,
    pub groups: Vec<VisGroup>,
    pub options: VisOptions,
}

pub fn standalone_chart(data: &TimelineData, window: &ViewWindow) -> StandaloneChart {
    StandaloneChart {
        items: data.items.iter().map(to_vis_item).collect(),
        groups: data.groups.iter().map(to_vis_group).collect(),
        options: vis_options(window),
    }
}

fn end_of_day(raw: &str) -> String {
    if is_plain_date(raw) {
        format!("{}T23:59:59", raw.trim())
    } else {
        raw.to_string()
    }
}

/// Flattened extras go through a map, so maps must come out as plain objects
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, DashboardError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| DashboardError::Chart(e.to_string()))
}

fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn timeline_setup(data: &TimelineData, window: &ViewWindow) -> Result<TimelineSetup, DashboardError> {
    let chart = standalone_chart(data, window);
    Ok(TimelineSetup {
        items: to_js(&chart.items)?,
        groups: to_js(&chart.groups)?,
        options: to_js(&chart.options)?,
        now_marker: Some(NOW_MARKER.to_string()),
    })
}

/// Draws through `vis.Timeline`. Items whose group is unknown are still
/// handed to the library.
pub struct VisTimelinePort;

impl ChartPort for VisTimelinePort {
    fn name(&self) -> &'static str {
        "vis-timeline"
    }

    fn render(&self, data: TimelineData, window: ViewWindow, on_rendered: Callback<()>) -> AnyView {
        let host = NodeRef::<Div>::new();
        let (failure, set_failure) = signal(None::<String>);

        mount_when_ready(host, move |el| {
            let built = timeline_setup(&data, &window)
                .and_then(|setup| build_timeline(el, &setup).map_err(|e| DashboardError::Chart(describe_js(&e))));
            match built {
                Ok(_) => {
                    log::info!("timeline created with {} items", data.items.len());
                    on_rendered.run(());
                }
                Err(e) => {
                    log::error!("{}", e);
                    set_failure.set(Some(e.to_string()));
                }
            }
        });

        view! {
            <div class="timeline-host" node_ref=host></div>
            {move || failure.get().map(|msg| view! { <div class="error-message">{msg}</div> })}
        }
        .into_any()
    }
}
