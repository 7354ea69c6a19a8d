use serde::{Deserialize, Serialize};

/// A single entry in the global visit history, keyed by URL.
///
/// Distinct from per-tab history: revisiting a URL updates `last_visited`
/// and bumps `visit_count` instead of appending a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub last_visited: i64,
    pub visit_count: u32,
}
