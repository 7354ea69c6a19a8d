//! RPC method handler for the Tabshell JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches JSON-RPC method calls to the managers via
//! the `App` struct. Rejected navigation is data (`{"ok":false,...}`),
//! not a protocol error; protocol errors are reserved for bad requests.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::managers::tab_store::TabStoreTrait;
use crate::services::navigation_resolver::Resolution;
use crate::types::bookmark::Bookmark;
use crate::types::download::DownloadStatus;
use crate::types::history::HistoryEntry;
use crate::types::state::{BrowserState, BROWSER_ENGINES};
use crate::types::tab::Tab;

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn bool_param(params: &Value, key: &str) -> Result<bool, String> {
    params
        .get(key)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| format!("missing {}", key))
}

fn tab_json(tab: &Tab) -> Value {
    json!({
        "id": tab.id,
        "url": tab.url,
        "title": tab.title,
        "favicon": tab.favicon,
        "pinned": tab.pinned,
        "parent_id": tab.parent_id,
        "child_ids": tab.child_ids,
        "synced_with_id": tab.synced_with_id,
        "can_go_back": tab.can_go_back(),
        "can_go_forward": tab.can_go_forward(),
    })
}

fn bookmark_json(b: &Bookmark) -> Value {
    json!({"url": b.url, "title": b.title, "icon": b.icon, "created_at": b.created_at})
}

fn history_json(h: &HistoryEntry) -> Value {
    json!({
        "url": h.url,
        "title": h.title,
        "last_visited": h.last_visited,
        "visit_count": h.visit_count,
    })
}

fn parse_download_status(params: &Value) -> Result<DownloadStatus, String> {
    match str_param(params, "status")? {
        "pending" => Ok(DownloadStatus::Pending),
        "in_progress" => Ok(DownloadStatus::InProgress),
        "completed" => Ok(DownloadStatus::Completed),
        "failed" => {
            let error = params
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error");
            Ok(DownloadStatus::Failed(error.to_string()))
        }
        other => Err(format!("unknown status: {}", other)),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Tabs ───
        "tab.list" => {
            let tabs: Vec<Value> = app.tab_store.get_all_tabs().into_iter().map(tab_json).collect();
            Ok(json!({"tabs": tabs, "active_tab_id": app.tab_store.active_tab_id()}))
        }
        "tab.open" => {
            let url = params.get("url").and_then(|v| v.as_str());
            let title = params.get("title").and_then(|v| v.as_str());
            match app.tab_store.create_tab(url, title) {
                Some(id) => {
                    app.schedule_save();
                    Ok(json!({"id": id}))
                }
                None => Err("tab limit reached".to_string()),
            }
        }
        "tab.close" => {
            let id = str_param(params, "id")?;
            let closed = app.tab_store.close_tab(id);
            if closed {
                app.schedule_save();
            }
            Ok(json!({"ok": closed, "active_tab_id": app.tab_store.active_tab_id()}))
        }
        "tab.switch" => {
            let id = str_param(params, "id")?;
            let switched = app.tab_store.switch_tab(id);
            if switched {
                app.schedule_save();
            }
            Ok(json!({"ok": switched}))
        }
        "tab.duplicate" => {
            let id = str_param(params, "id")?;
            match app.tab_store.duplicate_tab(id) {
                Some(new_id) => {
                    app.schedule_save();
                    Ok(json!({"id": new_id}))
                }
                None => Err("unable to duplicate tab".to_string()),
            }
        }
        "tab.toggle_pin" => {
            let id = str_param(params, "id")?;
            let ok = app.tab_store.toggle_pin(id);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }
        "tab.child" => {
            let parent_id = str_param(params, "parent_id")?;
            let title = str_param(params, "title")?;
            let url = params.get("url").and_then(|v| v.as_str());
            match app.tab_store.create_child(parent_id, title, url) {
                Some(id) => {
                    app.schedule_save();
                    Ok(json!({"id": id}))
                }
                None => Err("unable to create nested tab".to_string()),
            }
        }
        "tab.sync_link" => {
            let source_id = str_param(params, "source_id")?;
            let parent_id = params.get("parent_id").and_then(|v| v.as_str());
            match app.tab_store.sync_link(source_id, parent_id) {
                Some(id) => {
                    app.schedule_save();
                    Ok(json!({"id": id}))
                }
                None => Err("unable to create synced tab".to_string()),
            }
        }
        "tab.navigate" => {
            let input = str_param(params, "input")?;
            let tab_id = params.get("id").and_then(|v| v.as_str()).map(str::to_string);
            match app.navigate_input(tab_id.as_deref(), input) {
                Some(Resolution::Url(url)) | Some(Resolution::Search(url)) => {
                    Ok(json!({"ok": true, "url": url}))
                }
                Some(Resolution::Rejected(reason)) => {
                    Ok(json!({"ok": false, "reason": reason.message()}))
                }
                None => Err("tab not found".to_string()),
            }
        }
        "tab.back" => {
            let id = str_param(params, "id")?;
            let url = app.tab_store.go_back(id);
            if url.is_some() {
                app.schedule_save();
            }
            Ok(json!({"url": url}))
        }
        "tab.forward" => {
            let id = str_param(params, "id")?;
            let url = app.tab_store.go_forward(id);
            if url.is_some() {
                app.schedule_save();
            }
            Ok(json!({"url": url}))
        }
        "tab.active" => Ok(app
            .tab_store
            .get_active_tab()
            .map(tab_json)
            .unwrap_or(Value::Null)),
        "tab.ensure" => match app.ensure_tab() {
            Some(id) => Ok(json!({"id": id})),
            None => Err("unable to create tab".to_string()),
        },
        "tab.close_others" => {
            let id = str_param(params, "id")?;
            let ok = app.tab_store.close_other_tabs(id);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }

        // ─── Render-surface events ───
        "tab.title_updated" => {
            let id = str_param(params, "id")?;
            let title = str_param(params, "title")?;
            let ok = app.tab_store.update_title(id, title);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }
        "tab.url_committed" => {
            let id = str_param(params, "id")?;
            let url = str_param(params, "url")?;
            let ok = app.tab_store.update_url(id, url);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }
        "tab.favicon_updated" => {
            let id = str_param(params, "id")?;
            let icon = str_param(params, "icon")?;
            let ok = app.tab_store.update_favicon(id, icon);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }
        "tab.load_failed" => {
            let id = str_param(params, "id")?;
            let ok = app.tab_store.mark_load_failed(id);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }

        // ─── Bookmarks ───
        "bookmark.add" => {
            let url = str_param(params, "url")?;
            let title = str_param(params, "title")?;
            let icon = params.get("icon").and_then(|v| v.as_str());
            Ok(json!({"ok": app.add_bookmark(url, title, icon)}))
        }
        "bookmark.remove" => {
            let url = str_param(params, "url")?;
            Ok(json!({"ok": app.remove_bookmark(url)}))
        }
        "bookmark.list" => {
            let arr: Vec<Value> = app
                .bookmark_manager
                .list_bookmarks()
                .iter()
                .map(bookmark_json)
                .collect();
            Ok(json!(arr))
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            let arr: Vec<Value> = app
                .bookmark_manager
                .search_bookmarks(query)
                .into_iter()
                .map(bookmark_json)
                .collect();
            Ok(json!(arr))
        }

        // ─── Global history ───
        "history.list" => {
            let arr: Vec<Value> = app
                .history_manager
                .list_history()
                .into_iter()
                .map(history_json)
                .collect();
            Ok(json!(arr))
        }
        "history.search" => {
            let query = str_param(params, "query")?;
            let arr: Vec<Value> = app
                .history_manager
                .search_history(query)
                .into_iter()
                .map(history_json)
                .collect();
            Ok(json!(arr))
        }
        "history.delete" => {
            let url = str_param(params, "url")?;
            let ok = app.history_manager.delete_entry(url);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }
        "history.clear" => {
            app.history_manager.clear_all();
            app.schedule_save();
            Ok(json!({"ok": true}))
        }

        // ─── Downloads ───
        "download.add" => {
            let url = str_param(params, "url")?;
            let filename = str_param(params, "filename")?;
            let id = app.download_manager.add(url, filename);
            app.schedule_save();
            Ok(json!({"id": id}))
        }
        "download.set_status" => {
            let id = str_param(params, "id")?;
            let status = parse_download_status(params)?;
            let ok = app.download_manager.set_status(id, status);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }
        "download.list" => {
            let arr = serde_json::to_value(app.download_manager.list())
                .map_err(|e| e.to_string())?;
            Ok(arr)
        }
        "download.remove" => {
            let id = str_param(params, "id")?;
            let ok = app.download_manager.remove(id);
            if ok {
                app.schedule_save();
            }
            Ok(json!({"ok": ok}))
        }

        // ─── Settings ───
        "settings.get" => serde_json::to_value(&app.settings).map_err(|e| e.to_string()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings.set_value(key, value).map_err(|e| e.to_string())?;
            app.schedule_save();
            Ok(json!({"ok": true}))
        }

        // ─── Rendering engines ───
        "engines.list" => serde_json::to_value(BROWSER_ENGINES).map_err(|e| e.to_string()),
        "engines.get_selected" => Ok(json!({"id": app.settings.selected_engine})),
        "engines.set_selected" => {
            let id = str_param(params, "id")?;
            if !BROWSER_ENGINES.iter().any(|e| e.id == id) {
                return Err(format!("unknown engine: {}", id));
            }
            app.settings.selected_engine = Some(id.to_string());
            app.schedule_save();
            Ok(json!({"ok": true}))
        }

        // ─── Preferences ───
        "prefs.get" => Ok(json!({
            "ad_blocking_enabled": app.settings.ad_blocking_enabled,
            "center_search_on_new_tab": app.settings.center_search_on_new_tab,
        })),
        "prefs.set_ad_blocking" => {
            app.settings.ad_blocking_enabled = bool_param(params, "enabled")?;
            app.schedule_save();
            Ok(json!({"ok": true}))
        }
        "prefs.set_center_search" => {
            app.settings.center_search_on_new_tab = bool_param(params, "enabled")?;
            app.schedule_save();
            Ok(json!({"ok": true}))
        }

        // ─── Onboarding ───
        "onboarding.has_completed" => Ok(json!({"completed": app.settings.onboarding_completed})),
        "onboarding.complete" => {
            app.settings.onboarding_completed = true;
            app.schedule_save();
            Ok(json!({"ok": true}))
        }

        // ─── Raw state ───
        "state.read" => serde_json::to_value(app.snapshot()).map_err(|e| e.to_string()),
        "state.write" => {
            let state_val = params.get("state").cloned().ok_or("missing state")?;
            let state: BrowserState =
                serde_json::from_value(state_val).map_err(|e| format!("invalid state: {}", e))?;
            app.replace_state(state);
            Ok(json!({"ok": true}))
        }

        // ─── Generic config ───
        "config.get" => {
            let key = str_param(params, "key")?;
            app.settings
                .get_value(key)
                .ok_or_else(|| format!("unknown key: {}", key))
        }
        "config.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings.set_value(key, value).map_err(|e| e.to_string())?;
            app.schedule_save();
            Ok(json!({"ok": true}))
        }

        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
