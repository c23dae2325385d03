//! Leptos vis-timeline Bindings
//!
//! Thin bindings for the global `vis` namespace that the page loads from
//! `vis-data` / `vis-timeline`, plus a helper to build a chart once a Leptos
//! node has been mounted.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `vis.DataSet`
    #[wasm_bindgen(js_namespace = vis)]
    pub type DataSet;

    #[wasm_bindgen(constructor, js_namespace = vis, catch)]
    pub fn new(data: &JsValue) -> Result<DataSet, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    /// `vis.Timeline`
    #[wasm_bindgen(js_namespace = vis)]
    pub type Timeline;

    #[wasm_bindgen(constructor, js_namespace = vis, catch)]
    pub fn new(
        container: &web_sys::HtmlElement,
        items: &DataSet,
        groups: &DataSet,
        options: &JsValue,
    ) -> Result<Timeline, JsValue>;

    #[wasm_bindgen(method, js_name = addCustomTime)]
    pub fn add_custom_time(this: &Timeline, time: &js_sys::Date, id: &str) -> JsValue;
}

/// What the page currently exposes of the charting library
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LibraryStatus {
    /// No `vis` global at all
    Missing,
    /// `vis` exists but `vis.Timeline` is not a constructor
    NamespaceOnly,
    /// `vis.Timeline` is callable
    Ready,
}

impl LibraryStatus {
    /// Inspect `globalThis.vis`. Only meaningful inside a browser.
    pub fn detect() -> Self {
        let vis = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("vis"))
            .unwrap_or(JsValue::UNDEFINED);
        if vis.is_undefined() || vis.is_null() {
            return Self::from_presence(false, false);
        }
        let timeline = js_sys::Reflect::get(&vis, &JsValue::from_str("Timeline"))
            .unwrap_or(JsValue::UNDEFINED);
        Self::from_presence(true, timeline.is_function())
    }

    pub fn from_presence(namespace: bool, timeline: bool) -> Self {
        match (namespace, timeline) {
            (false, _) => LibraryStatus::Missing,
            (true, false) => LibraryStatus::NamespaceOnly,
            (true, true) => LibraryStatus::Ready,
        }
    }
}

/// Everything `vis.Timeline` needs, already converted to JS values
pub struct TimelineSetup {
    pub items: JsValue,
    pub groups: JsValue,
    pub options: JsValue,
    /// Id of an extra custom-time marker placed at "now"
    pub now_marker: Option<String>,
}

/// Construct a fresh timeline inside `container`
pub fn build_timeline(container: &web_sys::HtmlElement, setup: &TimelineSetup) -> Result<Timeline, JsValue> {
    let items = DataSet::new(&setup.items)?;
    let groups = DataSet::new(&setup.groups)?;
    let timeline = Timeline::new(container, &items, &groups, &setup.options)?;
    if let Some(id) = &setup.now_marker {
        let _ = timeline.add_custom_time(&js_sys::Date::new_0(), id);
    }
    Ok(timeline)
}

/// Run `on_mount` with the host element as soon as Leptos has attached it.
///
/// The host is cleared first so that a re-run never stacks two charts.
pub fn mount_when_ready<F>(host: NodeRef<Div>, on_mount: F)
where
    F: Fn(&web_sys::HtmlElement) + 'static,
{
    Effect::new(move |_| {
        if let Some(el) = host.get() {
            el.set_inner_html("");
            on_mount(&el);
        }
    });
}
