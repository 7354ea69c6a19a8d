//! Tabshell — console demo.
//!
//! Walks the state core through its paces against an in-memory store:
//! tabs, omnibox resolution, bookmarks, history, and persistence.

use tabshell::app::App;
use tabshell::managers::bookmark_manager::BookmarkManagerTrait;
use tabshell::managers::history_manager::HistoryManagerTrait;
use tabshell::managers::tab_store::TabStoreTrait;
use tabshell::services::navigation_resolver::{resolve, Resolution};
use tabshell::services::persistence::MemoryStateStore;
use tabshell::types::settings::SearchEngine;

fn section(name: &str) {
    println!("───────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!();
    println!("Tabshell v{} — demo mode", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::new(Box::new(MemoryStateStore::new()));

    section("Omnibox resolution");
    for input in [
        "github.com",
        "rust programming",
        "javascript:alert(1)",
        "about:newtab",
    ] {
        match resolve(input, SearchEngine::Google) {
            Resolution::Url(url) => println!("  {:24} -> url    {}", input, url),
            Resolution::Search(url) => println!("  {:24} -> search {}", input, url),
            Resolution::Rejected(r) => println!("  {:24} -> rejected ({})", input, r.message()),
        }
    }
    println!();

    section("Tabs");
    let first = app.ensure_tab().unwrap();
    app.navigate_input(Some(&first), "https://example.com");
    let child = app
        .tab_store
        .create_child(&first, "Notes", Some("https://example.com/notes"))
        .unwrap();
    let synced = app.tab_store.sync_link(&first, None).unwrap();
    app.navigate_input(Some(&first), "https://example.com/page2");
    println!("  {} tabs open", app.tab_store.tab_count());
    for tab in app.tab_store.get_all_tabs() {
        println!(
            "  {:8} url={:32} parent={:?} synced={:?}",
            tab.id, tab.url, tab.parent_id, tab.synced_with_id
        );
    }
    let mirrored = app.tab_store.get_tab(&synced).unwrap();
    assert_eq!(mirrored.url, "https://example.com/page2");
    let back = app.tab_store.go_back(&first);
    println!("  back on {} -> {:?}", first, back);
    app.tab_store.close_tab(&child);
    println!("  closed {} -> {} tabs remain", child, app.tab_store.tab_count());
    println!();

    section("Bookmarks and history");
    app.add_bookmark("https://example.com", "Example", None);
    app.add_bookmark("https://example.com", "Example again", None);
    println!("  {} bookmark(s) (duplicate ignored)", app.bookmark_manager.list_bookmarks().len());
    for entry in app.history_manager.list_history() {
        println!("  visited {:32} x{}", entry.url, entry.visit_count);
    }
    println!();

    section("Persistence");
    app.shutdown();
    let state = app.snapshot();
    println!(
        "  persisted {} tabs, counter at {}, active {:?}",
        state.tabs.len(),
        state.tab_id_counter,
        state.active_tab_id
    );
    println!();
    println!("Done.");
}
