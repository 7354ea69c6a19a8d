use tabshell::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use tabshell::types::bookmark::Bookmark;

#[test]
fn test_add_and_list() {
    let mut mgr = BookmarkManager::new();
    assert!(mgr.add_bookmark("https://example.com", "Example", None));
    assert!(mgr.add_bookmark("https://docs.rs", "Docs", Some("https://docs.rs/icon.png")));
    let all = mgr.list_bookmarks();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].icon.as_deref(), Some("https://docs.rs/icon.png"));
}

#[test]
fn test_duplicate_url_is_noop() {
    let mut mgr = BookmarkManager::new();
    assert!(mgr.add_bookmark("https://example.com", "Example", None));
    assert!(!mgr.add_bookmark("https://example.com", "Renamed", None));
    assert_eq!(mgr.list_bookmarks().len(), 1);
    // The original title survives.
    assert_eq!(mgr.list_bookmarks()[0].title, "Example");
}

#[test]
fn test_is_bookmarked() {
    let mut mgr = BookmarkManager::new();
    mgr.add_bookmark("https://example.com", "Example", None);
    assert!(mgr.is_bookmarked("https://example.com"));
    assert!(!mgr.is_bookmarked("https://example.com/other"));
}

#[test]
fn test_remove_bookmark() {
    let mut mgr = BookmarkManager::new();
    mgr.add_bookmark("https://example.com", "Example", None);
    assert!(mgr.remove_bookmark("https://example.com"));
    assert!(!mgr.remove_bookmark("https://example.com"));
    assert!(mgr.list_bookmarks().is_empty());
}

#[test]
fn test_search_is_case_insensitive_over_title_and_url() {
    let mut mgr = BookmarkManager::new();
    mgr.add_bookmark("https://rust-lang.org", "The Rust Language", None);
    mgr.add_bookmark("https://example.com", "Example", None);

    assert_eq!(mgr.search_bookmarks("RUST").len(), 1);
    assert_eq!(mgr.search_bookmarks("example.com").len(), 1);
    assert_eq!(mgr.search_bookmarks("nothing").len(), 0);
}

#[test]
fn test_from_entries_dedupes_by_url() {
    let entry = |url: &str, title: &str| Bookmark {
        url: url.to_string(),
        title: title.to_string(),
        icon: None,
        created_at: 0,
    };
    let mgr = BookmarkManager::from_entries(vec![
        entry("https://example.com", "First"),
        entry("https://example.com", "Second"),
        entry("https://docs.rs", "Docs"),
    ]);
    assert_eq!(mgr.list_bookmarks().len(), 2);
    assert_eq!(mgr.list_bookmarks()[0].title, "First");
}
