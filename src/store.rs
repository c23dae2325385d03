//! Global Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::render::PaneState;
use crate::selection::ProjectSelection;
use crate::url_state::FilterState;

/// Progress of the `/api/projects` request
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Failed(String),
    Ready,
}

/// Global dashboard state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// Filters the next load will use; mirrored into the URL after success
    pub filter: FilterState,
    pub catalog: CatalogStatus,
    /// Project buttons and which of them are on
    pub selection: ProjectSelection,
    /// Contents of the `#app` container
    pub pane: PaneState,
}

impl DashboardState {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

// ========================
// Store Helper Functions
// ========================

/// Replace the project list, re-applying `keep` as the selection
pub fn store_set_projects(store: &DashboardStore, mut selection: ProjectSelection, keep: &[String]) {
    selection.restore(keep);
    let keys = selection.selected_keys();
    store.selection().set(selection);
    store.filter().write().projects = keys;
    store.catalog().set(CatalogStatus::Ready);
}

/// Mutate the selection and re-derive the filter's project list
pub fn store_update_selection(store: &DashboardStore, change: impl FnOnce(&mut ProjectSelection)) {
    let keys = {
        let field = store.selection();
        let mut selection = field.write();
        change(&mut *selection);
        selection.selected_keys()
    };
    store.filter().write().projects = keys;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    fn make_selection(keys: &[&str]) -> ProjectSelection {
        ProjectSelection::new(
            keys.iter()
                .map(|k| Project { key: k.to_string(), name: format!("{} project", k) })
                .collect(),
        )
    }

    fn url_filter(keys: &[&str]) -> FilterState {
        FilterState { projects: keys.iter().map(|k| k.to_string()).collect(), ..Default::default() }
    }

    fn filter_projects(store: &DashboardStore) -> Vec<String> {
        store.filter().get_untracked().projects
    }

    fn composite(store: &DashboardStore) -> String {
        store.selection().with_untracked(|sel| sel.composite())
    }

    #[test]
    fn test_set_projects_narrows_url_keys_to_buttons() {
        Owner::new().with(|| {
            let filter = url_filter(&["ZZ", "AB", "SR"]);
            let keep = filter.projects.clone();
            let store = Store::new(DashboardState::new(filter));
            assert_eq!(store.catalog().get_untracked(), CatalogStatus::Loading);

            store_set_projects(&store, make_selection(&["SR", "AB", "CD"]), &keep);

            // button order, unknown ZZ dropped
            assert_eq!(filter_projects(&store), vec!["SR", "AB"]);
            assert_eq!(composite(&store), store.filter().get_untracked().projects_csv());
            assert_eq!(store.catalog().get_untracked(), CatalogStatus::Ready);
        });
    }

    #[test]
    fn test_selection_changes_keep_filter_in_step() {
        Owner::new().with(|| {
            let store = Store::new(DashboardState::new(FilterState::default()));
            store_set_projects(&store, make_selection(&["SR", "AB", "CD"]), &[]);
            assert!(filter_projects(&store).is_empty());

            store_update_selection(&store, |sel| sel.toggle("CD"));
            store_update_selection(&store, |sel| sel.toggle("SR"));
            assert_eq!(filter_projects(&store), vec!["SR", "CD"]);
            assert_eq!(composite(&store), "SR,CD");

            store_update_selection(&store, |sel| sel.toggle("SR"));
            assert_eq!(filter_projects(&store), vec!["CD"]);

            store_update_selection(&store, ProjectSelection::select_all);
            assert_eq!(filter_projects(&store), vec!["SR", "AB", "CD"]);
            assert_eq!(composite(&store), store.filter().get_untracked().projects_csv());

            store_update_selection(&store, ProjectSelection::clear_all);
            assert!(filter_projects(&store).is_empty());
            assert_eq!(composite(&store), "");
        });
    }
}
