//! App core for Tabshell.
//!
//! Central struct owning every manager plus the persistence writer. All
//! state flows through here; there are no ambient globals, so tests can
//! stand up as many independent `App`s as they like.

use tracing::debug;

use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::download_manager::DownloadManager;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::tab_store::{TabStore, TabStoreTrait};
use crate::services::navigation_resolver::{self, Resolution};
use crate::services::persistence::{load_state, DebouncedStateWriter, StateStore};
use crate::types::settings::Settings;
use crate::types::state::BrowserState;

/// Central application struct holding all managers and the state writer.
pub struct App {
    pub tab_store: TabStore,
    pub bookmark_manager: BookmarkManager,
    pub history_manager: HistoryManager,
    pub download_manager: DownloadManager,
    pub settings: Settings,
    writer: DebouncedStateWriter,
}

impl App {
    /// Creates an App from whatever state the store holds. A missing or
    /// corrupt payload starts fresh; either way the shell comes up with at
    /// least one tab.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        let state = load_state(store.as_ref()).unwrap_or_default();
        Self::from_state(state, DebouncedStateWriter::new(store))
    }

    /// Like `new` but with a caller-supplied writer; tests use this to
    /// shrink the debounce window.
    pub fn with_writer(writer: DebouncedStateWriter) -> Self {
        let state = load_state(writer.store()).unwrap_or_default();
        Self::from_state(state, writer)
    }

    fn from_state(state: BrowserState, writer: DebouncedStateWriter) -> Self {
        let mut app = Self {
            tab_store: TabStore::restore(state.tabs, state.active_tab_id, state.tab_id_counter),
            bookmark_manager: BookmarkManager::from_entries(state.bookmarks),
            history_manager: HistoryManager::from_entries(state.history),
            download_manager: DownloadManager::from_entries(state.downloads),
            settings: state.settings,
            writer,
        };
        app.ensure_tab();
        app
    }

    /// Guarantees at least one open tab; returns the active tab id.
    pub fn ensure_tab(&mut self) -> Option<String> {
        if self.tab_store.tab_count() == 0 {
            let home = self.settings.home_url.clone();
            let id = self.tab_store.create_tab(Some(&home), None);
            self.schedule_save();
            return id;
        }
        self.tab_store.active_tab_id().map(str::to_string)
    }

    /// Resolves raw omnibox input and, unless rejected, navigates the
    /// target tab (the active tab when `tab_id` is `None`) and records the
    /// visit in global history. Internal `about:` pages are not recorded.
    ///
    /// Returns `None` when the target tab does not exist; nothing was
    /// navigated, recorded, or saved in that case.
    pub fn navigate_input(&mut self, tab_id: Option<&str>, raw: &str) -> Option<Resolution> {
        let resolution = navigation_resolver::resolve(raw, self.settings.search_engine);
        let url = match &resolution {
            Resolution::Url(u) | Resolution::Search(u) => u.clone(),
            Resolution::Rejected(reason) => {
                debug!(input = raw, reason = %reason.message(), "navigation rejected");
                return Some(resolution);
            }
        };
        let target = match tab_id {
            Some(id) => id.to_string(),
            None => self.ensure_tab()?,
        };
        if !self.tab_store.navigate(&target, &url) {
            debug!(tab_id = %target, "navigation target does not exist");
            return None;
        }
        if !url.starts_with("about:") {
            self.history_manager.record_visit(&url, &url);
        }
        self.schedule_save();
        Some(resolution)
    }

    /// The full persisted state, assembled from the live managers.
    pub fn snapshot(&self) -> BrowserState {
        BrowserState {
            tabs: self.tab_store.tabs_snapshot(),
            active_tab_id: self.tab_store.active_tab_id().map(str::to_string),
            tab_id_counter: self.tab_store.next_tab_id(),
            bookmarks: self.bookmark_manager.snapshot(),
            history: self.history_manager.snapshot(),
            downloads: self.download_manager.snapshot(),
            settings: self.settings.clone(),
        }
    }

    /// Queues a debounced write of the current state.
    pub fn schedule_save(&mut self) {
        match serde_json::to_string(&self.snapshot()) {
            Ok(payload) => self.writer.schedule(payload),
            Err(e) => debug!(error = %e, "state serialization failed, skipping save"),
        }
    }

    /// Replaces the whole state from a raw payload, as `state.write` does.
    pub fn replace_state(&mut self, state: BrowserState) {
        self.tab_store = TabStore::restore(state.tabs, state.active_tab_id, state.tab_id_counter);
        self.bookmark_manager = BookmarkManager::from_entries(state.bookmarks);
        self.history_manager = HistoryManager::from_entries(state.history);
        self.download_manager = DownloadManager::from_entries(state.downloads);
        self.settings = state.settings;
        self.ensure_tab();
        self.schedule_save();
    }

    /// Debounce pump; the event loop calls this after every request.
    pub fn tick(&mut self) {
        self.writer.flush_due();
    }

    /// Shutdown sequence: force any pending write to disk.
    pub fn shutdown(&mut self) {
        self.writer.flush();
    }

    pub fn writer(&self) -> &DebouncedStateWriter {
        &self.writer
    }

    pub fn add_bookmark(&mut self, url: &str, title: &str, icon: Option<&str>) -> bool {
        let added = self.bookmark_manager.add_bookmark(url, title, icon);
        if added {
            self.schedule_save();
        }
        added
    }

    pub fn remove_bookmark(&mut self, url: &str) -> bool {
        let removed = self.bookmark_manager.remove_bookmark(url);
        if removed {
            self.schedule_save();
        }
        removed
    }
}
