//! Timeline Pane Component
//!
//! The `#app` container: placeholders, inline errors, or the chart drawn by
//! the chosen port.

use leptos::prelude::*;

use crate::context::use_dashboard;
use crate::loader::write_address_bar;
use crate::render::{PaneState, ViewWindow};
use crate::store::DashboardStateStoreFields;

#[component]
pub fn TimelinePane() -> impl IntoView {
    let ctx = use_dashboard();

    view! {
        <div id="app" class="timeline-pane">
            {move || match ctx.store.pane().get() {
                PaneState::Idle => view! {
                    <div class="placeholder">"Pick projects and press Load."</div>
                }.into_any(),
                PaneState::Loading(msg) => view! { <div class="loading">{msg}</div> }.into_any(),
                PaneState::Failed(msg) => view! { <div class="error-message">{msg}</div> }.into_any(),
                PaneState::NoData => view! {
                    <div class="no-data">"No data. Check the selected projects or widen the date range."</div>
                }.into_any(),
                PaneState::Chart { data, port, persist_on_render } => {
                    let window = ViewWindow::from_config(&ctx.config());
                    let on_rendered = Callback::new(move |_: ()| {
                        if let Some(filter) = &persist_on_render {
                            write_address_bar(filter);
                        }
                    });
                    port.port().render(data, window, on_rendered)
                }
            }}
        </div>
    }
}
