// Tabshell state managers
// Managers handle stateful collections: tabs, bookmarks, history, downloads.

pub mod bookmark_manager;
pub mod download_manager;
pub mod history_manager;
pub mod tab_store;
