use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::types::tab::Tab;

/// Default cap on open tabs; `create_tab` refuses past it.
pub const DEFAULT_MAX_TABS: usize = 50;

/// Trait defining the tab store interface.
pub trait TabStoreTrait {
    fn create_tab(&mut self, url: Option<&str>, title: Option<&str>) -> Option<String>;
    fn close_tab(&mut self, tab_id: &str) -> bool;
    fn switch_tab(&mut self, tab_id: &str) -> bool;
    fn duplicate_tab(&mut self, tab_id: &str) -> Option<String>;
    fn toggle_pin(&mut self, tab_id: &str) -> bool;
    fn create_child(&mut self, parent_id: &str, title: &str, url: Option<&str>) -> Option<String>;
    fn sync_link(&mut self, source_id: &str, target_parent_id: Option<&str>) -> Option<String>;
    fn navigate(&mut self, tab_id: &str, url: &str) -> bool;
    fn go_back(&mut self, tab_id: &str) -> Option<String>;
    fn go_forward(&mut self, tab_id: &str) -> Option<String>;
    fn close_other_tabs(&mut self, tab_id: &str) -> bool;
    fn update_title(&mut self, tab_id: &str, title: &str) -> bool;
    fn update_url(&mut self, tab_id: &str, url: &str) -> bool;
    fn update_favicon(&mut self, tab_id: &str, icon: &str) -> bool;
    fn mark_load_failed(&mut self, tab_id: &str) -> bool;
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn get_all_tabs(&self) -> Vec<&Tab>;
    fn get_active_tab(&self) -> Option<&Tab>;
    fn active_tab_id(&self) -> Option<&str>;
    fn tab_count(&self) -> usize;
    fn tab_order(&self) -> &[String];
}

/// In-memory tab store: the collection of open tabs plus the active pointer.
///
/// Tabs live in `tabs`; `tab_order` carries display order (a parent's
/// subtree stays contiguous). Ids come from a monotonic counter and are
/// never reused within a session or across restores.
pub struct TabStore {
    tabs: Vec<Tab>,
    tab_order: Vec<String>,
    active_tab_id: Option<String>,
    next_tab_id: u64,
    max_tabs: usize,
}

impl TabStore {
    pub fn new() -> Self {
        Self::with_max_tabs(DEFAULT_MAX_TABS)
    }

    pub fn with_max_tabs(max_tabs: usize) -> Self {
        Self {
            tabs: Vec::new(),
            tab_order: Vec::new(),
            active_tab_id: None,
            next_tab_id: 1,
            max_tabs,
        }
    }

    /// Rebuilds a store from persisted parts, sanitizing dangling
    /// references so store invariants hold even for hand-edited state.
    pub fn restore(tabs: Vec<Tab>, active_tab_id: Option<String>, tab_id_counter: u64) -> Self {
        let mut store = Self::new();
        let ids: HashSet<String> = tabs.iter().map(|t| t.id.clone()).collect();

        for mut tab in tabs {
            if let Some(parent) = &tab.parent_id {
                if !ids.contains(parent) {
                    tab.parent_id = None;
                }
            }
            tab.child_ids.retain(|c| ids.contains(c));
            let dangling_sync = match &tab.synced_with_id {
                Some(rep) => !ids.contains(rep) || *rep == tab.id,
                None => false,
            };
            if dangling_sync {
                tab.synced_with_id = None;
            }
            store.tab_order.push(tab.id.clone());
            store.tabs.push(tab);
        }

        // Flatten persisted sync chains back to a star: every follower
        // must point at a representative that is not itself a follower,
        // however deep the persisted chain is.
        let links: HashMap<String, String> = store
            .tabs
            .iter()
            .filter_map(|t| t.synced_with_id.clone().map(|rep| (t.id.clone(), rep)))
            .collect();
        for tab in &mut store.tabs {
            if tab.synced_with_id.is_none() {
                continue;
            }
            let rep = Self::sync_root(&tab.id, &links);
            if rep == tab.id {
                tab.synced_with_id = None;
            } else {
                tab.synced_with_id = Some(rep);
            }
        }

        store.active_tab_id = match active_tab_id {
            Some(id) if ids.contains(&id) => Some(id),
            _ => store.tab_order.first().cloned(),
        };

        // Never reuse an id, even if the persisted counter lagged.
        let max_seen = store
            .tabs
            .iter()
            .filter_map(|t| t.id.strip_prefix("tab-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        store.next_tab_id = tab_id_counter.max(max_seen + 1);
        store
    }

    pub fn next_tab_id(&self) -> u64 {
        self.next_tab_id
    }

    /// Tabs in display order, cloned for serialization.
    pub fn tabs_snapshot(&self) -> Vec<Tab> {
        self.get_all_tabs().into_iter().cloned().collect()
    }

    /// The sync group of a tab: its representative plus every follower of
    /// that representative. A tab with no sync link is its own group.
    pub fn sync_group(&self, tab_id: &str) -> Vec<String> {
        let Some(tab) = self.get_tab(tab_id) else {
            return Vec::new();
        };
        let rep = tab.synced_with_id.clone().unwrap_or_else(|| tab_id.to_string());
        let mut group = vec![rep.clone()];
        for t in &self.tabs {
            if t.synced_with_id.as_deref() == Some(rep.as_str()) {
                group.push(t.id.clone());
            }
        }
        group
    }

    /// Follows a persisted sync-link chain to its end. A cycle elects its
    /// smallest member, so every tab trapped in it agrees on the same
    /// representative and the walk always terminates.
    fn sync_root(start: &str, links: &HashMap<String, String>) -> String {
        let mut path = vec![start.to_string()];
        let mut current = start.to_string();
        while let Some(next) = links.get(&current) {
            if let Some(pos) = path.iter().position(|id| id == next) {
                let cycle = &path[pos..];
                return cycle.iter().min().cloned().unwrap_or_else(|| next.clone());
            }
            path.push(next.clone());
            current = next.clone();
        }
        current
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn alloc_id(&mut self) -> String {
        let id = format!("tab-{}", self.next_tab_id);
        self.next_tab_id += 1;
        id
    }

    fn find_tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn find_order_index(&self, tab_id: &str) -> Option<usize> {
        self.tab_order.iter().position(|id| id == tab_id)
    }

    fn get_tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    /// A tab and all its descendants, depth-first.
    fn subtree_ids(&self, tab_id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![tab_id.to_string()];
        while let Some(id) = stack.pop() {
            if let Some(tab) = self.get_tab(&id) {
                out.push(id);
                for child in tab.child_ids.iter().rev() {
                    stack.push(child.clone());
                }
            }
        }
        out
    }

    /// Order position just past a tab's contiguous subtree block.
    fn subtree_end(&self, tab_id: &str) -> usize {
        match self.find_order_index(tab_id) {
            Some(pos) => pos + self.subtree_ids(tab_id).len(),
            None => self.tab_order.len(),
        }
    }

    fn at_capacity(&self) -> bool {
        if self.tabs.len() >= self.max_tabs {
            warn!(max = self.max_tabs, "tab limit reached, refusing to create tab");
            true
        } else {
            false
        }
    }

    /// Removes a set of tabs, fixing the active pointer and clearing sync
    /// links that pointed at a removed representative.
    fn remove_tabs(&mut self, removed: &HashSet<String>, reselect_from: usize) {
        self.tabs.retain(|t| !removed.contains(&t.id));
        self.tab_order.retain(|id| !removed.contains(id));
        for tab in &mut self.tabs {
            if let Some(rep) = &tab.synced_with_id {
                if removed.contains(rep) {
                    tab.synced_with_id = None;
                }
            }
        }
        let active_gone = self
            .active_tab_id
            .as_ref()
            .map(|id| removed.contains(id))
            .unwrap_or(false);
        if active_gone {
            self.active_tab_id = if self.tab_order.is_empty() {
                None
            } else {
                let idx = reselect_from.min(self.tab_order.len() - 1);
                Some(self.tab_order[idx].clone())
            };
        }
    }

    /// Copies a tab's navigation state (url, history, cursor) to the rest
    /// of its sync group. Star fan-out through the representative only, so
    /// mutually-synced tabs cannot ping-pong.
    fn propagate_sync(&mut self, tab_id: &str) {
        let Some(src) = self.get_tab(tab_id) else { return };
        let (url, history, index) = (src.url.clone(), src.history.clone(), src.history_index);
        for member in self.sync_group(tab_id) {
            if member == tab_id {
                continue;
            }
            if let Some(tab) = self.get_tab_mut(&member) {
                tab.url = url.clone();
                tab.history = history.clone();
                tab.history_index = index;
            }
        }
    }
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStoreTrait for TabStore {
    /// Create a new tab. Returns `None` (after logging) at the tab cap.
    ///
    /// The tab becomes active if it is the first tab or the caller passed
    /// an explicit URL.
    fn create_tab(&mut self, url: Option<&str>, title: Option<&str>) -> Option<String> {
        if self.at_capacity() {
            return None;
        }
        let id = self.alloc_id();
        let tab = Tab::new(
            id.clone(),
            url.unwrap_or("").to_string(),
            title.unwrap_or("New Tab").to_string(),
            Self::now(),
        );
        self.tabs.push(tab);
        self.tab_order.push(id.clone());
        if self.active_tab_id.is_none() || url.is_some() {
            self.active_tab_id = Some(id.clone());
        }
        Some(id)
    }

    /// Close a tab and, recursively, all of its descendants.
    ///
    /// If the active tab was removed the new active tab is the one now
    /// sitting at `min(original_index, len - 1)` of the remaining order;
    /// closing the last tab leaves the store empty with no active tab.
    fn close_tab(&mut self, tab_id: &str) -> bool {
        let Some(order_idx) = self.find_order_index(tab_id) else {
            return false;
        };
        let removed: HashSet<String> = self.subtree_ids(tab_id).into_iter().collect();

        if let Some(parent_id) = self.get_tab(tab_id).and_then(|t| t.parent_id.clone()) {
            if let Some(parent) = self.get_tab_mut(&parent_id) {
                parent.child_ids.retain(|c| c != tab_id);
            }
        }
        self.remove_tabs(&removed, order_idx);
        true
    }

    /// Set the active pointer. No-op (returning false) for unknown ids.
    fn switch_tab(&mut self, tab_id: &str) -> bool {
        if self.find_tab_index(tab_id).is_none() {
            return false;
        }
        self.active_tab_id = Some(tab_id.to_string());
        true
    }

    /// Duplicate a tab: same url/title, fresh history, never pinned.
    /// The duplicate lands right after the source's subtree block.
    fn duplicate_tab(&mut self, tab_id: &str) -> Option<String> {
        if self.at_capacity() {
            return None;
        }
        let source = self.get_tab(tab_id)?;
        let (url, title) = (source.url.clone(), source.title.clone());
        let insert_pos = self.subtree_end(tab_id);
        let id = self.alloc_id();
        let tab = Tab::new(id.clone(), url, title, Self::now());
        self.tabs.push(tab);
        self.tab_order.insert(insert_pos, id.clone());
        Some(id)
    }

    /// Flip the pinned flag. Ordering and the active pointer are untouched.
    fn toggle_pin(&mut self, tab_id: &str) -> bool {
        match self.get_tab_mut(tab_id) {
            Some(tab) => {
                tab.pinned = !tab.pinned;
                true
            }
            None => false,
        }
    }

    /// Create a tab nested under `parent_id`. Returns `None` if the parent
    /// does not exist or the cap is reached.
    fn create_child(&mut self, parent_id: &str, title: &str, url: Option<&str>) -> Option<String> {
        if self.at_capacity() || self.find_tab_index(parent_id).is_none() {
            return None;
        }
        let insert_pos = self.subtree_end(parent_id);
        let id = self.alloc_id();
        let mut tab = Tab::new(
            id.clone(),
            url.unwrap_or("").to_string(),
            title.to_string(),
            Self::now(),
        );
        tab.parent_id = Some(parent_id.to_string());
        self.tabs.push(tab);
        self.tab_order.insert(insert_pos, id.clone());
        if let Some(parent) = self.get_tab_mut(parent_id) {
            parent.child_ids.push(id.clone());
        }
        Some(id)
    }

    /// Create a tab that mirrors `source_id`'s navigation state.
    ///
    /// Sync groups are kept star-shaped: if the source is already a
    /// follower the new tab links to the source's representative, never to
    /// the source itself.
    fn sync_link(&mut self, source_id: &str, target_parent_id: Option<&str>) -> Option<String> {
        if self.at_capacity() {
            return None;
        }
        let source = self.get_tab(source_id)?;
        let rep_id = source
            .synced_with_id
            .clone()
            .unwrap_or_else(|| source_id.to_string());
        let rep = self.get_tab(&rep_id)?;
        let (url, title, history, index) = (
            rep.url.clone(),
            format!("{} (sync)", rep.title),
            rep.history.clone(),
            rep.history_index,
        );

        let parent_id = target_parent_id.filter(|p| self.find_tab_index(p).is_some());
        let insert_pos = match parent_id {
            Some(p) => self.subtree_end(p),
            None => self.tab_order.len(),
        };

        let id = self.alloc_id();
        let mut tab = Tab::new(id.clone(), url, title, Self::now());
        tab.history = history;
        tab.history_index = index;
        tab.synced_with_id = Some(rep_id);
        tab.parent_id = parent_id.map(str::to_string);
        self.tabs.push(tab);
        self.tab_order.insert(insert_pos, id.clone());
        if let Some(p) = parent_id {
            if let Some(parent) = self.get_tab_mut(p) {
                parent.child_ids.push(id.clone());
            }
        }
        Some(id)
    }

    /// Append `url` to the tab's history and mirror the result across the
    /// tab's whole sync group.
    fn navigate(&mut self, tab_id: &str, url: &str) -> bool {
        match self.get_tab_mut(tab_id) {
            Some(tab) => {
                tab.navigate(url);
                self.propagate_sync(tab_id);
                true
            }
            None => false,
        }
    }

    fn go_back(&mut self, tab_id: &str) -> Option<String> {
        let url = self.get_tab_mut(tab_id)?.go_back()?.to_string();
        self.propagate_sync(tab_id);
        Some(url)
    }

    fn go_forward(&mut self, tab_id: &str) -> Option<String> {
        let url = self.get_tab_mut(tab_id)?.go_forward()?.to_string();
        self.propagate_sync(tab_id);
        Some(url)
    }

    /// Close everything except the target's subtree and pinned subtrees.
    fn close_other_tabs(&mut self, tab_id: &str) -> bool {
        if self.find_tab_index(tab_id).is_none() {
            return false;
        }
        let mut kept: HashSet<String> = self.subtree_ids(tab_id).into_iter().collect();
        let pinned: Vec<String> = self
            .tabs
            .iter()
            .filter(|t| t.pinned)
            .map(|t| t.id.clone())
            .collect();
        for id in pinned {
            kept.extend(self.subtree_ids(&id));
        }
        let removed: HashSet<String> = self
            .tab_order
            .iter()
            .filter(|id| !kept.contains(*id))
            .cloned()
            .collect();
        // Detach surviving children whose parent is going away.
        for tab in &mut self.tabs {
            if let Some(parent) = &tab.parent_id {
                if removed.contains(parent) {
                    tab.parent_id = None;
                }
            }
            tab.child_ids.retain(|c| !removed.contains(c));
        }
        self.remove_tabs(&removed, 0);
        self.active_tab_id = Some(tab_id.to_string());
        true
    }

    fn update_title(&mut self, tab_id: &str, title: &str) -> bool {
        match self.get_tab_mut(tab_id) {
            Some(tab) => {
                tab.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Location-committed event from the rendering surface (redirects and
    /// such): rewrites the current history entry instead of pushing.
    fn update_url(&mut self, tab_id: &str, url: &str) -> bool {
        match self.get_tab_mut(tab_id) {
            Some(tab) => {
                tab.url = url.to_string();
                if tab.history.is_empty() {
                    tab.history.push(url.to_string());
                    tab.history_index = 0;
                } else {
                    let idx = tab.history_index.min(tab.history.len() - 1);
                    tab.history[idx] = url.to_string();
                }
                true
            }
            None => false,
        }
    }

    fn update_favicon(&mut self, tab_id: &str, icon: &str) -> bool {
        match self.get_tab_mut(tab_id) {
            Some(tab) => {
                tab.favicon = Some(icon.to_string());
                true
            }
            None => false,
        }
    }

    fn mark_load_failed(&mut self, tab_id: &str) -> bool {
        match self.get_tab_mut(tab_id) {
            Some(tab) => {
                tab.title = "Failed to load".to_string();
                true
            }
            None => false,
        }
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn get_all_tabs(&self) -> Vec<&Tab> {
        self.tab_order
            .iter()
            .filter_map(|id| self.tabs.iter().find(|t| t.id == *id))
            .collect()
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab_id
            .as_ref()
            .and_then(|id| self.tabs.iter().find(|t| t.id == *id))
    }

    fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn tab_order(&self) -> &[String] {
        &self.tab_order
    }
}
