//! Dashboard Context
//!
//! Shared state and actions provided via Leptos Context API.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::config::DashboardConfig;
use crate::export::{self, ExportFormat};
use crate::loader::{self, LoadSequencer, LoadTicket};
use crate::models::GroupBy;
use crate::render::ViewWindow;
use crate::selection::ProjectSelection;
use crate::store::{store_update_selection, DashboardStateStoreFields, DashboardStore};

/// Dashboard-wide handles provided via context
#[derive(Clone, Copy)]
pub struct DashboardContext {
    /// Reactive dashboard state
    pub store: DashboardStore,
    config: StoredValue<DashboardConfig>,
    /// Generation counter for timeline loads
    loads: StoredValue<LoadSequencer>,
}

impl DashboardContext {
    pub fn new(store: DashboardStore, config: DashboardConfig) -> Self {
        Self {
            store,
            config: StoredValue::new(config),
            loads: StoredValue::new(LoadSequencer::default()),
        }
    }

    pub fn config(&self) -> DashboardConfig {
        self.config.get_value()
    }

    pub fn begin_load(&self) -> LoadTicket {
        self.loads.with_value(|seq| seq.begin())
    }

    // ------------------------
    // Loading
    // ------------------------

    pub fn load(&self) {
        loader::load(*self);
    }

    pub fn load_sample(&self) {
        loader::load_sample(*self);
    }

    pub fn load_projects(&self) {
        loader::load_projects(*self);
    }

    // ------------------------
    // Project selection
    // ------------------------

    pub fn toggle_project(&self, key: &str) {
        store_update_selection(&self.store, |sel| sel.toggle(key));
    }

    pub fn select_all_projects(&self) {
        store_update_selection(&self.store, ProjectSelection::select_all);
    }

    pub fn clear_all_projects(&self) {
        store_update_selection(&self.store, ProjectSelection::clear_all);
    }

    // ------------------------
    // Filters
    // ------------------------

    pub fn set_group_by(&self, group_by: GroupBy) {
        self.store.filter().write().group_by = group_by;
    }

    pub fn set_from_date(&self, date: Option<NaiveDate>) {
        self.store.filter().write().from_date = date;
    }

    pub fn set_to_date(&self, date: Option<NaiveDate>) {
        self.store.filter().write().to_date = date;
    }

    pub fn set_user_owner(&self, owner: String) {
        let owner = owner.trim().to_string();
        self.store.filter().write().user_owner = if owner.is_empty() { None } else { Some(owner) };
    }

    // ------------------------
    // Export
    // ------------------------

    /// Download whatever timeline is on screen
    pub fn export(&self, format: ExportFormat) {
        let Some(data) = self.store.pane().with_untracked(|pane| pane.data().cloned()) else {
            log::warn!("nothing to export");
            return;
        };
        let window = ViewWindow::from_config(&self.config());
        match export::download(format, &data, &window) {
            Ok(()) => log::info!("exported {} items to {}", data.items.len(), format.file_name()),
            Err(e) => log::error!("export failed: {:?}", e),
        }
    }
}

/// Get the dashboard context
pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>().expect("DashboardContext should be provided")
}
