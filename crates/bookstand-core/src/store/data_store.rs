// ── Central reactive data store ──
//
// Holds the latest library snapshot and the UI state. Snapshots are only
// ever replaced wholesale; readers get a cheap `Arc` that stays consistent
// for as long as they hold it. Changes are broadcast via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::UiState;
use crate::model::{BookFilter, Route, Snapshot, StatusFilter};

pub struct DataStore {
    snapshot: watch::Sender<Arc<Snapshot>>,
    ui: watch::Sender<UiState>,
}

impl DataStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        let (ui, _) = watch::channel(UiState::default());
        Self { snapshot, ui }
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    /// Swap in a freshly fetched snapshot. No partial merge exists.
    pub fn replace(&self, snapshot: Snapshot) {
        debug!(
            books = snapshot.books.len(),
            shelves = snapshot.shelves.len(),
            "store snapshot replaced"
        );
        self.snapshot.send_replace(Arc::new(snapshot));
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot.subscribe()
    }

    /// When the current snapshot was fetched; `None` before the first load.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot.borrow().fetched_at
    }

    // ── UI state ─────────────────────────────────────────────────────

    pub fn ui(&self) -> UiState {
        self.ui.borrow().clone()
    }

    pub fn set_route(&self, route: Route) {
        self.ui.send_modify(|ui| ui.route = route);
    }

    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        self.ui.send_modify(|ui| ui.filter.search = term);
    }

    pub fn set_status_filter(&self, status: StatusFilter) {
        self.ui.send_modify(|ui| ui.filter.status = status);
    }

    pub fn clear_filter(&self) {
        self.ui.send_modify(|ui| ui.filter = BookFilter::default());
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
