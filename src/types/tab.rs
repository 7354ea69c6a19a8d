use serde::{Deserialize, Serialize};

/// Per-tab history is bounded; oldest entries are evicted first.
pub const MAX_TAB_HISTORY: usize = 100;

/// Represents one browsing context: a tab with its own URL, title, and history.
///
/// `parent_id`/`child_ids` model nested tabs. `synced_with_id`, when set,
/// names the sync-group representative whose navigation state this tab
/// mirrors; it never references the tab itself and never another follower.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: String,
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
    pub pinned: bool,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub child_ids: Vec<String>,
    #[serde(default)]
    pub synced_with_id: Option<String>,
    pub history: Vec<String>,
    pub history_index: usize,
    pub created_at: i64,
}

impl Tab {
    /// An empty URL means "show start page" and seeds no history entry.
    pub fn new(id: String, url: String, title: String, created_at: i64) -> Self {
        let history = if url.is_empty() { Vec::new() } else { vec![url.clone()] };
        Self {
            id,
            url,
            title,
            favicon: None,
            pinned: false,
            parent_id: None,
            child_ids: Vec::new(),
            synced_with_id: None,
            history,
            history_index: 0,
            created_at,
        }
    }

    /// Navigate to a URL: truncate forward history, cap the list, append.
    ///
    /// Navigating to the URL already at the cursor is skipped so reloads
    /// don't pile up duplicate entries.
    pub fn navigate(&mut self, url: &str) {
        if self.history.get(self.history_index).map(String::as_str) == Some(url) {
            self.url = url.to_string();
            return;
        }
        if self.history_index + 1 < self.history.len() {
            self.history.truncate(self.history_index + 1);
        }
        if self.history.len() >= MAX_TAB_HISTORY {
            let to_remove = self.history.len() + 1 - MAX_TAB_HISTORY;
            self.history.drain(0..to_remove);
            self.history_index = self.history_index.saturating_sub(to_remove);
        }
        self.history.push(url.to_string());
        self.history_index = self.history.len() - 1;
        self.url = url.to_string();
    }

    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    pub fn go_back(&mut self) -> Option<&str> {
        if self.can_go_back() {
            self.history_index -= 1;
            self.url = self.history[self.history_index].clone();
            Some(&self.url)
        } else {
            None
        }
    }

    pub fn go_forward(&mut self) -> Option<&str> {
        if self.can_go_forward() {
            self.history_index += 1;
            self.url = self.history[self.history_index].clone();
            Some(&self.url)
        } else {
            None
        }
    }
}
