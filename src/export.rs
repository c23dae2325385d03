//! Timeline Export
//!
//! Saves the displayed timeline through a Blob download, either as the raw
//! JSON view or as a self-contained HTML page that draws it with vis.

use wasm_bindgen::{JsCast, JsValue};

use crate::models::TimelineData;
use crate::render::{standalone_chart, ViewWindow};

const DATA_PLACEHOLDER: &str = "__TIMELINE_DATA__";

const HTML_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Timeline</title>
  <link rel="stylesheet" href="https://unpkg.com/vis-timeline@latest/styles/vis-timeline-graph2d.min.css" />
  <style>
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }
    #app { height: calc(100vh - 45px); }
    .vis-item.vis-range { border-radius: 6px; }
    .header { padding: 10px 12px; border-bottom: 1px solid #e5e7eb; display: flex; align-items: center; gap: 12px; }
    .badge { font-size: 12px; background: #eef2ff; color: #3730a3; padding: 2px 8px; border-radius: 999px; }
  </style>
</head>
<body>
  <div class="header">
    <strong>Read-only Timeline</strong>
    <span class="badge">Local overlays applied</span>
  </div>
  <div id="app"></div>
  <script src="https://unpkg.com/vis-data@latest/peer/umd/vis-data.min.js"></script>
  <script src="https://unpkg.com/vis-timeline@latest/peer/umd/vis-timeline-graph2d.min.js"></script>
  <script>
    const chart = __TIMELINE_DATA__;
    const timeline = new vis.Timeline(
      document.getElementById('app'),
      new vis.DataSet(chart.items),
      new vis.DataSet(chart.groups),
      chart.options
    );
    timeline.addCustomTime(new Date(), 'now');
  </script>
</body>
</html>
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => "timeline.json",
            ExportFormat::Html => "timeline.html",
        }
    }

    fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html;charset=utf-8",
        }
    }
}

pub fn to_json(data: &TimelineData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Standalone page with the chart inlined. `</` is escaped so no field can
/// close the script element early.
pub fn to_html(data: &TimelineData, window: &ViewWindow) -> Result<String, serde_json::Error> {
    let chart = serde_json::to_string(&standalone_chart(data, window))?;
    Ok(HTML_TEMPLATE.replace(DATA_PLACEHOLDER, &chart.replace("</", "<\\/")))
}

pub fn render(format: ExportFormat, data: &TimelineData, window: &ViewWindow) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Json => to_json(data),
        ExportFormat::Html => to_html(data, window),
    }
}

pub fn download(format: ExportFormat, data: &TimelineData, window: &ViewWindow) -> Result<(), JsValue> {
    let contents = render(format, data, window).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&contents));
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(format.mime_type());
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &props)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(format.file_name());
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
