//! Timeline Dashboard App
//!
//! Header with filters on top, chart pane below.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{FilterBar, TimelinePane};
use crate::config::DashboardConfig;
use crate::context::DashboardContext;
use crate::store::DashboardState;
use crate::url_state;

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    // Filters start from whatever the URL carries
    let filter = url_state::restore();
    log::debug!("restored filters from URL: {:?}", filter);
    let load_sample_on_start = config.load_sample_on_start;

    let ctx = DashboardContext::new(Store::new(DashboardState::new(filter)), config);
    provide_context(ctx);

    // Initial fetches on mount
    Effect::new(move |_| {
        ctx.load_projects();
        if load_sample_on_start {
            ctx.load_sample();
        }
    });

    view! {
        <div class="dashboard-layout">
            <header class="dashboard-header">
                <FilterBar />
            </header>
            <main class="dashboard-main">
                <TimelinePane />
            </main>
        </div>
    }
}
