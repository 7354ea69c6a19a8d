use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::download::Download;
use super::history::HistoryEntry;
use super::settings::Settings;
use super::tab::Tab;

/// The complete persisted shell state, serialized as one JSON blob.
///
/// Every field defaults so partial or older payloads still deserialize;
/// missing sections simply come back empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserState {
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub active_tab_id: Option<String>,
    #[serde(default)]
    pub tab_id_counter: u64,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub downloads: Vec<Download>,
    #[serde(default)]
    pub settings: Settings,
}

/// A selectable rendering engine exposed by the host shell.
/// Serialized out over RPC only, never read back.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BrowserEngine {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The engines the host shell can embed. Static; selection is a setting.
pub const BROWSER_ENGINES: &[BrowserEngine] = &[
    BrowserEngine {
        id: "chromium",
        name: "Chromium",
        description: "Fast and modern",
    },
    BrowserEngine {
        id: "firefox",
        name: "Firefox",
        description: "Privacy-focused",
    },
    BrowserEngine {
        id: "webkit",
        name: "WebKit",
        description: "Lightweight",
    },
];
