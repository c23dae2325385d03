//! Project Selector Component
//!
//! Toggle buttons for every project plus the hidden `#projects` input that
//! mirrors the selection.

use leptos::prelude::*;

use crate::context::use_dashboard;
use crate::models::Project;
use crate::store::{CatalogStatus, DashboardStateStoreFields};

/// One toggle button
#[component]
fn ProjectButton(project: Project) -> impl IntoView {
    let ctx = use_dashboard();
    let key = project.key.clone();
    let is_selected = {
        let key = key.clone();
        move || ctx.store.selection().with(|sel| sel.is_selected(&key))
    };

    view! {
        <button
            class=move || if is_selected() { "project-btn selected" } else { "project-btn" }
            data-key=project.key.clone()
            title=project.name.clone()
            on:click=move |_| ctx.toggle_project(&key)
        >
            {project.label()}
        </button>
    }
}

/// Project filter with select-all / clear-all
#[component]
pub fn ProjectSelector() -> impl IntoView {
    let ctx = use_dashboard();
    // only rebuild the buttons when the list itself changes
    let projects = Memo::new(move |_| ctx.store.selection().with(|sel| sel.projects().to_vec()));

    view! {
        <div class="project-filter">
            <div class="project-filter-actions">
                <span class="filter-label">"Projects"</span>
                <button id="select-all" class="link-btn" on:click=move |_| ctx.select_all_projects()>
                    "Select all"
                </button>
                <button id="clear-all" class="link-btn" on:click=move |_| ctx.clear_all_projects()>
                    "Clear"
                </button>
            </div>
            <div id="project-buttons" class="project-buttons">
                {move || match ctx.store.catalog().get() {
                    CatalogStatus::Loading => view! {
                        <span class="project-hint">"Loading projects..."</span>
                    }.into_any(),
                    CatalogStatus::Failed(msg) => view! {
                        <div class="project-error">{format!("Failed to load projects: {}", msg)}</div>
                    }.into_any(),
                    CatalogStatus::Ready => projects
                        .get()
                        .into_iter()
                        .map(|project| view! { <ProjectButton project=project /> })
                        .collect_view()
                        .into_any(),
                }}
            </div>
            <input
                type="hidden"
                id="projects"
                prop:value=move || ctx.store.filter().with(|f| f.projects_csv())
            />
        </div>
    }
}
