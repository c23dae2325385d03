//! Timeline Data Loader
//!
//! Fetches timeline data for the `#app` pane. Every load takes a ticket from
//! a [`LoadSequencer`]; a response that is no longer the newest is dropped so
//! it can neither repaint the pane nor rewrite the URL.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_vis_timeline::LibraryStatus;

use crate::api;
use crate::context::DashboardContext;
use crate::error::DashboardError;
use crate::models::TimelineData;
use crate::render::{self, PaneState};
use crate::selection::ProjectSelection;
use crate::store::{store_set_projects, CatalogStatus, DashboardStateStoreFields};
use crate::url_state::{self, FilterState};

#[derive(Clone, Debug, Default)]
pub struct LoadSequencer {
    latest: Arc<AtomicU64>,
}

impl LoadSequencer {
    /// Start a new load; every earlier ticket becomes stale
    pub fn begin(&self) -> LoadTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { generation, latest: Arc::clone(&self.latest) }
    }
}

#[derive(Clone, Debug)]
pub struct LoadTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    /// `/api/timeline` with the current filters
    Filtered,
    /// `/api/sample`
    Sample,
}

impl LoadKind {
    fn loading_message(self) -> &'static str {
        match self {
            LoadKind::Filtered => "Loading data...",
            LoadKind::Sample => "Loading sample data...",
        }
    }

    fn failure_message(self, err: &DashboardError) -> String {
        match self {
            LoadKind::Filtered => format!("An error occurred while loading data: {}", err),
            LoadKind::Sample => format!("An error occurred while loading sample data: {}", err),
        }
    }
}

impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadKind::Filtered => write!(f, "timeline load"),
            LoadKind::Sample => write!(f, "sample load"),
        }
    }
}

/// What a finished request does to the page
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A newer load was started meanwhile
    Stale,
    Settled {
        pane: PaneState,
        /// Write the filters to the URL right away. A chart pane instead
        /// carries them until it has drawn.
        persist: bool,
    },
}

/// Turn a finished request into pane state. Only successful filtered loads
/// touch the URL, and a chart only does so after it has drawn.
pub fn settle(
    kind: LoadKind,
    result: Result<TimelineData, DashboardError>,
    current: bool,
    status: LibraryStatus,
    filter: &FilterState,
) -> Outcome {
    if !current {
        return Outcome::Stale;
    }
    match result {
        Ok(data) => {
            let mut pane = render::present(data, status);
            let persist = match (&mut pane, kind) {
                (PaneState::Chart { persist_on_render, .. }, LoadKind::Filtered) => {
                    *persist_on_render = Some(filter.clone());
                    false
                }
                (_, LoadKind::Filtered) => true,
                (_, LoadKind::Sample) => false,
            };
            Outcome::Settled { pane, persist }
        }
        Err(e) => {
            log::error!("{} failed: {}", kind, e);
            Outcome::Settled { pane: PaneState::Failed(kind.failure_message(&e)), persist: false }
        }
    }
}

/// Load `/api/timeline` for the current filters
pub fn load(ctx: DashboardContext) {
    let config = ctx.config();
    let filter = ctx.store.filter().get_untracked();
    let url = api::timeline_url(&config, &filter);
    run(ctx, LoadKind::Filtered, url, filter);
}

/// Load `/api/sample`; never touches the URL
pub fn load_sample(ctx: DashboardContext) {
    let url = api::sample_url(&ctx.config());
    run(ctx, LoadKind::Sample, url, FilterState::default());
}

fn run(ctx: DashboardContext, kind: LoadKind, url: String, filter: FilterState) {
    let ticket = ctx.begin_load();
    log::info!("{} #{}: GET {}", kind, ticket.generation(), url);
    ctx.store.pane().set(PaneState::Loading(kind.loading_message().to_string()));

    spawn_local(async move {
        let result = api::fetch_timeline(&url).await;
        match settle(kind, result, ticket.is_current(), LibraryStatus::detect(), &filter) {
            Outcome::Stale => {
                log::debug!("{} #{} superseded, dropping response", kind, ticket.generation());
            }
            Outcome::Settled { pane, persist } => {
                ctx.store.pane().set(pane);
                if persist {
                    write_address_bar(&filter);
                }
            }
        }
    });
}

/// Persist `filter` to the URL; failures are only logged
pub fn write_address_bar(filter: &FilterState) {
    if let Err(e) = url_state::persist(filter) {
        log::warn!("could not update the address bar: {:?}", e);
    }
}

/// Load the project buttons, then re-apply the selection from the URL
pub fn load_projects(ctx: DashboardContext) {
    let config = ctx.config();
    ctx.store.catalog().set(CatalogStatus::Loading);

    spawn_local(async move {
        match api::list_projects(&config).await {
            Ok(projects) => {
                log::info!("loaded {} projects", projects.len());
                let from_url = url_state::restore().projects;
                store_set_projects(&ctx.store, ProjectSelection::new(projects), &from_url);
            }
            Err(e) => {
                log::error!("project list failed: {}", e);
                ctx.store.catalog().set(CatalogStatus::Failed(e.to_string()));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimelineGroup, TimelineItem};

    fn one_item() -> TimelineData {
        TimelineData {
            items: vec![TimelineItem {
                id: "SR-1".into(),
                group: "SR".into(),
                content: "Login".into(),
                title: None,
                start: Some("2024-01-01".into()),
                end: Some("2024-01-03".into()),
                color: None,
                extra: Default::default(),
            }],
            groups: vec![TimelineGroup { id: "SR".into(), title: "SR".into(), content: None, extra: Default::default() }],
        }
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let seq = LoadSequencer::default();
        let first = seq.begin();
        assert!(first.is_current());
        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.generation(), first.generation() + 1);
    }

    fn owner_filter() -> FilterState {
        FilterState { projects: vec!["SR".into()], user_owner: Some("kim".into()), ..Default::default() }
    }

    #[test]
    fn test_failed_load_never_persists() {
        let err = DashboardError::Status { status: 502 };
        match settle(LoadKind::Filtered, Err(err), true, LibraryStatus::Ready, &owner_filter()) {
            Outcome::Settled { pane: PaneState::Failed(msg), persist } => {
                assert!(!persist);
                assert!(msg.contains("502"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let err = DashboardError::Application("bad jql".into());
        let outcome = settle(LoadKind::Filtered, Err(err), true, LibraryStatus::Ready, &owner_filter());
        assert!(matches!(outcome, Outcome::Settled { persist: false, .. }));
    }

    #[test]
    fn test_chart_persists_only_after_drawing() {
        // the chart writes the URL itself once drawn
        for status in [LibraryStatus::Ready, LibraryStatus::NamespaceOnly] {
            match settle(LoadKind::Filtered, Ok(one_item()), true, status, &owner_filter()) {
                Outcome::Settled { pane: PaneState::Chart { persist_on_render, data, .. }, persist } => {
                    assert!(!persist);
                    assert_eq!(persist_on_render, Some(owner_filter()));
                    assert_eq!(data.items.len(), 1);
                }
                other => panic!("unexpected outcome: {:?}", other),
            }
        }
    }

    #[test]
    fn test_filtered_load_without_chart_persists_now() {
        let empty = TimelineData::default();
        let outcome = settle(LoadKind::Filtered, Ok(empty), true, LibraryStatus::Ready, &owner_filter());
        assert_eq!(outcome, Outcome::Settled { pane: PaneState::NoData, persist: true });

        // the fetch itself worked even though nothing can draw it
        let outcome = settle(LoadKind::Filtered, Ok(one_item()), true, LibraryStatus::Missing, &owner_filter());
        assert!(matches!(outcome, Outcome::Settled { pane: PaneState::Failed(_), persist: true }));
    }

    #[test]
    fn test_sample_load_does_not_persist() {
        let outcome = settle(LoadKind::Sample, Ok(one_item()), true, LibraryStatus::Ready, &FilterState::default());
        match outcome {
            Outcome::Settled { pane: PaneState::Chart { persist_on_render, .. }, persist } => {
                assert!(!persist);
                assert_eq!(persist_on_render, None);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let seq = LoadSequencer::default();
        let old = seq.begin();
        let _new = seq.begin();
        let outcome = settle(LoadKind::Filtered, Ok(one_item()), old.is_current(), LibraryStatus::Ready, &owner_filter());
        assert_eq!(outcome, Outcome::Stale);
    }
}
