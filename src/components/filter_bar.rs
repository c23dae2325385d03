//! Filter Bar Component
//!
//! Grouping, date range and owner controls plus the load, sample and
//! export actions.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::components::ProjectSelector;
use crate::context::use_dashboard;
use crate::export::ExportFormat;
use crate::models::GroupBy;
use crate::store::DashboardStateStoreFields;
use crate::url_state::{parse_date, FilterState};

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Whether the `<option>` for `group_by` should be the live selection
fn shows_grouping(filter: &FilterState, group_by: GroupBy) -> bool {
    filter.group_by == group_by
}

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_dashboard();
    let nothing_to_export = move || ctx.store.pane().with(|pane| pane.data().is_none());

    view! {
        <div class="filter-bar">
            <ProjectSelector />

            <div class="filter-controls">
                <label>
                    "Group "
                    <select
                        id="group_by"
                        on:change=move |ev| ctx.set_group_by(GroupBy::parse(&event_target_value(&ev)))
                    >
                        {GroupBy::ALL.iter().map(|&group_by| view! {
                            <option
                                value=group_by.as_str()
                                prop:selected=move || ctx.store.filter().with(|f| shows_grouping(f, group_by))
                            >
                                {group_by.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </label>
                <label>
                    "From "
                    <input
                        id="from_date"
                        type="date"
                        prop:value=move || ctx.store.filter().with(|f| date_value(f.from_date))
                        on:change=move |ev| ctx.set_from_date(parse_date(&event_target_value(&ev)))
                    />
                </label>
                <label>
                    "To "
                    <input
                        id="to_date"
                        type="date"
                        prop:value=move || ctx.store.filter().with(|f| date_value(f.to_date))
                        on:change=move |ev| ctx.set_to_date(parse_date(&event_target_value(&ev)))
                    />
                </label>
                <label>
                    "Owner "
                    <input
                        id="user_owner"
                        type="text"
                        placeholder="optional"
                        prop:value=move || ctx.store.filter().with(|f| f.user_owner.clone().unwrap_or_default())
                        on:change=move |ev| ctx.set_user_owner(event_target_value(&ev))
                    />
                </label>

                <button id="load" class="primary-btn" on:click=move |_| ctx.load()>"Load"</button>
                <button id="sample" on:click=move |_| ctx.load_sample()>"Sample Data"</button>
                <button id="export" disabled=nothing_to_export on:click=move |_| ctx.export(ExportFormat::Json)>
                    "Export JSON"
                </button>
                <button id="export-html" disabled=nothing_to_export on:click=move |_| ctx.export(ExportFormat::Html)>
                    "Export HTML"
                </button>
                <span class="filter-note">"Read-only · Local overlays"</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_option_follows_filter() {
        let mut filter = FilterState::default();
        assert!(shows_grouping(&filter, GroupBy::Project));
        filter.group_by = GroupBy::Assignee;
        assert!(shows_grouping(&filter, GroupBy::Assignee));
        assert!(!shows_grouping(&filter, GroupBy::Project));
    }

    #[test]
    fn test_date_value_for_inputs() {
        assert_eq!(date_value(NaiveDate::from_ymd_opt(2024, 1, 5)), "2024-01-05");
        assert_eq!(date_value(None), "");
    }
}
