//! Global visit history: one entry per URL, bounded, oldest evicted first.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::history::HistoryEntry;

/// Default cap on global history entries.
pub const DEFAULT_MAX_HISTORY: usize = 200;

/// Trait defining global-history operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str, title: &str);
    fn search_history(&self, query: &str) -> Vec<&HistoryEntry>;
    /// Entries ordered most-recently-visited first.
    fn list_history(&self) -> Vec<&HistoryEntry>;
    fn delete_entry(&mut self, url: &str) -> bool;
    fn clear_all(&mut self);
    fn entry_count(&self) -> usize;
}

pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut mgr = Self::new();
        for e in entries {
            if !mgr.entries.iter().any(|x| x.url == e.url) {
                mgr.entries.push(e);
            }
        }
        mgr.evict_over_capacity();
        mgr
    }

    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn evict_over_capacity(&mut self) {
        while self.entries.len() > self.max_entries {
            let oldest = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.last_visited)
                .map(|(i, _)| i);
            match oldest {
                Some(i) => {
                    self.entries.remove(i);
                }
                None => break,
            }
        }
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManagerTrait for HistoryManager {
    /// Records a visit. Revisiting a known URL updates its timestamp and
    /// title and increments the count instead of duplicating the entry.
    fn record_visit(&mut self, url: &str, title: &str) {
        let now = Self::now();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.url == url) {
            entry.visit_count += 1;
            entry.last_visited = now;
            entry.title = title.to_string();
            return;
        }
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            title: title.to_string(),
            last_visited: now,
            visit_count: 1,
        });
        self.evict_over_capacity();
    }

    fn search_history(&self, query: &str) -> Vec<&HistoryEntry> {
        let q = query.to_lowercase();
        let mut hits: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&q) || e.url.to_lowercase().contains(&q))
            .collect();
        hits.sort_by(|a, b| b.last_visited.cmp(&a.last_visited));
        hits
    }

    fn list_history(&self) -> Vec<&HistoryEntry> {
        let mut all: Vec<&HistoryEntry> = self.entries.iter().collect();
        all.sort_by(|a, b| b.last_visited.cmp(&a.last_visited));
        all
    }

    fn delete_entry(&mut self, url: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.url != url);
        self.entries.len() != before
    }

    fn clear_all(&mut self) {
        self.entries.clear();
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
