use tabshell::managers::tab_store::{TabStore, TabStoreTrait};
use tabshell::types::tab::{Tab, MAX_TAB_HISTORY};

// ─── Creation ───

#[test]
fn test_create_tab_returns_unique_ids() {
    let mut store = TabStore::new();
    let id1 = store.create_tab(None, None).unwrap();
    let id2 = store.create_tab(None, None).unwrap();
    assert_ne!(id1, id2);
    assert_eq!(store.tab_count(), 2);
}

#[test]
fn test_first_tab_becomes_active() {
    let mut store = TabStore::new();
    let id = store.create_tab(None, None).unwrap();
    assert_eq!(store.active_tab_id(), Some(id.as_str()));
}

#[test]
fn test_create_with_url_becomes_active() {
    let mut store = TabStore::new();
    store.create_tab(None, None).unwrap();
    let id2 = store.create_tab(Some("https://example.com"), None).unwrap();
    assert_eq!(store.active_tab_id(), Some(id2.as_str()));
    assert_eq!(store.get_tab(&id2).unwrap().url, "https://example.com");
}

#[test]
fn test_create_without_url_keeps_active() {
    let mut store = TabStore::new();
    let id1 = store.create_tab(None, None).unwrap();
    store.create_tab(None, None).unwrap();
    assert_eq!(store.active_tab_id(), Some(id1.as_str()));
}

#[test]
fn test_create_refused_at_cap() {
    let mut store = TabStore::with_max_tabs(2);
    assert!(store.create_tab(None, None).is_some());
    assert!(store.create_tab(None, None).is_some());
    assert!(store.create_tab(None, None).is_none());
    assert_eq!(store.tab_count(), 2);
}

#[test]
fn test_empty_url_seeds_no_history() {
    let mut store = TabStore::new();
    let id = store.create_tab(None, None).unwrap();
    let tab = store.get_tab(&id).unwrap();
    assert!(tab.history.is_empty());
    assert!(!tab.can_go_back());
}

// ─── Closing ───

#[test]
fn test_close_active_selects_same_position() {
    let mut store = TabStore::new();
    let id1 = store.create_tab(None, None).unwrap();
    let id2 = store.create_tab(None, None).unwrap();
    let id3 = store.create_tab(None, None).unwrap();
    store.switch_tab(&id2);
    assert!(store.close_tab(&id2));
    // id2 sat at index 1; the remaining order is [id1, id3].
    assert_eq!(store.active_tab_id(), Some(id3.as_str()));
    let _ = id1;
}

#[test]
fn test_close_last_in_order_selects_previous() {
    let mut store = TabStore::new();
    let id1 = store.create_tab(None, None).unwrap();
    let id2 = store.create_tab(None, None).unwrap();
    store.switch_tab(&id2);
    assert!(store.close_tab(&id2));
    assert_eq!(store.active_tab_id(), Some(id1.as_str()));
}

#[test]
fn test_close_final_tab_leaves_store_empty() {
    let mut store = TabStore::new();
    let id = store.create_tab(None, None).unwrap();
    assert!(store.close_tab(&id));
    assert_eq!(store.tab_count(), 0);
    assert_eq!(store.active_tab_id(), None);
}

#[test]
fn test_close_unknown_tab_returns_false() {
    let mut store = TabStore::new();
    store.create_tab(None, None).unwrap();
    assert!(!store.close_tab("tab-999"));
    assert_eq!(store.tab_count(), 1);
}

#[test]
fn test_close_parent_removes_descendants() {
    let mut store = TabStore::new();
    let root = store.create_tab(None, None).unwrap();
    let child = store.create_child(&root, "child", None).unwrap();
    let grandchild = store.create_child(&child, "grandchild", None).unwrap();
    let other = store.create_tab(None, None).unwrap();

    assert!(store.close_tab(&root));
    assert_eq!(store.tab_count(), 1);
    assert!(store.get_tab(&grandchild).is_none());
    assert_eq!(store.active_tab_id(), Some(other.as_str()));
}

#[test]
fn test_close_child_updates_parent_child_ids() {
    let mut store = TabStore::new();
    let root = store.create_tab(None, None).unwrap();
    let child = store.create_child(&root, "child", None).unwrap();
    assert!(store.close_tab(&child));
    assert!(store.get_tab(&root).unwrap().child_ids.is_empty());
}

// ─── Switching and pinning ───

#[test]
fn test_switch_tab() {
    let mut store = TabStore::new();
    let id1 = store.create_tab(None, None).unwrap();
    let id2 = store.create_tab(None, None).unwrap();
    assert_eq!(store.active_tab_id(), Some(id1.as_str()));
    assert!(store.switch_tab(&id2));
    assert_eq!(store.active_tab_id(), Some(id2.as_str()));
}

#[test]
fn test_switch_unknown_tab_is_noop() {
    let mut store = TabStore::new();
    let id = store.create_tab(None, None).unwrap();
    assert!(!store.switch_tab("tab-999"));
    assert_eq!(store.active_tab_id(), Some(id.as_str()));
}

#[test]
fn test_toggle_pin_preserves_order() {
    let mut store = TabStore::new();
    let id1 = store.create_tab(None, None).unwrap();
    let id2 = store.create_tab(None, None).unwrap();
    let order_before = store.tab_order().to_vec();
    assert!(store.toggle_pin(&id2));
    assert!(store.get_tab(&id2).unwrap().pinned);
    assert_eq!(store.tab_order(), order_before.as_slice());
    assert!(store.toggle_pin(&id2));
    assert!(!store.get_tab(&id2).unwrap().pinned);
    let _ = id1;
}

// ─── Duplication ───

#[test]
fn test_duplicate_copies_url_not_history() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://a.example"), None).unwrap();
    store.navigate(&id, "https://b.example");
    let dup_id = store.duplicate_tab(&id).unwrap();
    let dup = store.get_tab(&dup_id).unwrap();
    assert_eq!(dup.url, "https://b.example");
    // Fresh history: only the current URL, no back stack.
    assert_eq!(dup.history, vec!["https://b.example"]);
    assert!(!dup.can_go_back());
    assert!(!dup.pinned);
}

#[test]
fn test_duplicate_lands_after_source_subtree() {
    let mut store = TabStore::new();
    let root = store.create_tab(None, None).unwrap();
    let child = store.create_child(&root, "child", None).unwrap();
    let tail = store.create_tab(None, None).unwrap();
    let dup = store.duplicate_tab(&root).unwrap();
    assert_eq!(store.tab_order(), &[root, child, dup, tail]);
}

// ─── Nesting ───

#[test]
fn test_child_inserted_inside_parent_block() {
    let mut store = TabStore::new();
    let root = store.create_tab(None, None).unwrap();
    let c1 = store.create_child(&root, "one", None).unwrap();
    let tail = store.create_tab(None, None).unwrap();
    let c2 = store.create_child(&root, "two", None).unwrap();
    assert_eq!(store.tab_order(), &[root.clone(), c1, c2.clone(), tail]);
    assert_eq!(store.get_tab(&c2).unwrap().parent_id, Some(root.clone()));
    assert_eq!(store.get_tab(&root).unwrap().child_ids.len(), 2);
}

#[test]
fn test_child_of_unknown_parent_fails() {
    let mut store = TabStore::new();
    assert!(store.create_child("tab-999", "child", None).is_none());
}

// ─── Synced tabs ───

#[test]
fn test_sync_link_mirrors_navigation_state() {
    let mut store = TabStore::new();
    let src = store.create_tab(Some("https://a.example"), None).unwrap();
    store.navigate(&src, "https://b.example");
    let synced = store.sync_link(&src, None).unwrap();
    let tab = store.get_tab(&synced).unwrap();
    assert_eq!(tab.url, "https://b.example");
    assert_eq!(tab.history, vec!["https://a.example", "https://b.example"]);
    assert_eq!(tab.synced_with_id, Some(src));
}

#[test]
fn test_sync_of_follower_links_to_representative() {
    let mut store = TabStore::new();
    let src = store.create_tab(Some("https://a.example"), None).unwrap();
    let first = store.sync_link(&src, None).unwrap();
    let second = store.sync_link(&first, None).unwrap();
    assert_eq!(store.get_tab(&second).unwrap().synced_with_id, Some(src));
}

#[test]
fn test_navigation_propagates_across_group() {
    let mut store = TabStore::new();
    let src = store.create_tab(Some("https://a.example"), None).unwrap();
    let s1 = store.sync_link(&src, None).unwrap();
    let s2 = store.sync_link(&src, None).unwrap();

    // Navigating a follower reaches the representative and its other followers.
    store.navigate(&s1, "https://b.example");
    assert_eq!(store.get_tab(&src).unwrap().url, "https://b.example");
    assert_eq!(store.get_tab(&s2).unwrap().url, "https://b.example");

    let back = store.go_back(&s2);
    assert_eq!(back.as_deref(), Some("https://a.example"));
    assert_eq!(store.get_tab(&src).unwrap().url, "https://a.example");
    assert_eq!(store.get_tab(&s1).unwrap().url, "https://a.example");
}

#[test]
fn test_closing_representative_clears_follower_links() {
    let mut store = TabStore::new();
    let src = store.create_tab(Some("https://a.example"), None).unwrap();
    let synced = store.sync_link(&src, None).unwrap();
    assert!(store.close_tab(&src));
    assert_eq!(store.get_tab(&synced).unwrap().synced_with_id, None);
}

// ─── Per-tab history ───

#[test]
fn test_navigate_truncates_forward_history() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://a.example"), None).unwrap();
    store.navigate(&id, "https://b.example");
    store.navigate(&id, "https://c.example");
    store.go_back(&id);
    store.navigate(&id, "https://d.example");
    let tab = store.get_tab(&id).unwrap();
    assert_eq!(
        tab.history,
        vec!["https://a.example", "https://b.example", "https://d.example"]
    );
    assert!(!tab.can_go_forward());
}

#[test]
fn test_navigate_skips_duplicate_of_current() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://a.example"), None).unwrap();
    store.navigate(&id, "https://a.example");
    store.navigate(&id, "https://a.example");
    assert_eq!(store.get_tab(&id).unwrap().history.len(), 1);
}

#[test]
fn test_history_capped_with_oldest_evicted() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://site.example/0"), None).unwrap();
    for i in 1..=(MAX_TAB_HISTORY + 10) {
        store.navigate(&id, &format!("https://site.example/{}", i));
    }
    let tab = store.get_tab(&id).unwrap();
    assert_eq!(tab.history.len(), MAX_TAB_HISTORY);
    assert_eq!(tab.history[0], format!("https://site.example/{}", 11));
    assert_eq!(tab.history_index, MAX_TAB_HISTORY - 1);
}

#[test]
fn test_back_forward_walk() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://a.example"), None).unwrap();
    store.navigate(&id, "https://b.example");
    assert_eq!(store.go_back(&id).as_deref(), Some("https://a.example"));
    assert_eq!(store.go_back(&id), None);
    assert_eq!(store.go_forward(&id).as_deref(), Some("https://b.example"));
    assert_eq!(store.go_forward(&id), None);
}

// ─── Close others ───

#[test]
fn test_close_others_keeps_target_subtree_and_pinned() {
    let mut store = TabStore::new();
    let pinned = store.create_tab(None, None).unwrap();
    store.toggle_pin(&pinned);
    let victim = store.create_tab(None, None).unwrap();
    let target = store.create_tab(None, None).unwrap();
    let child = store.create_child(&target, "child", None).unwrap();

    assert!(store.close_other_tabs(&target));
    assert!(store.get_tab(&pinned).is_some());
    assert!(store.get_tab(&victim).is_none());
    assert!(store.get_tab(&child).is_some());
    assert_eq!(store.active_tab_id(), Some(target.as_str()));
}

#[test]
fn test_close_others_detaches_orphaned_children() {
    let mut store = TabStore::new();
    let parent = store.create_tab(None, None).unwrap();
    let child = store.create_child(&parent, "child", None).unwrap();
    store.toggle_pin(&child);
    let target = store.create_tab(None, None).unwrap();

    // Parent goes, pinned child survives and is detached.
    assert!(store.close_other_tabs(&target));
    assert!(store.get_tab(&parent).is_none());
    let orphan = store.get_tab(&child).unwrap();
    assert_eq!(orphan.parent_id, None);
}

// ─── Render-surface updates ───

#[test]
fn test_update_url_rewrites_current_entry() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://a.example"), None).unwrap();
    store.navigate(&id, "https://b.example");
    assert!(store.update_url(&id, "https://b.example/redirected"));
    let tab = store.get_tab(&id).unwrap();
    assert_eq!(tab.history.len(), 2);
    assert_eq!(tab.history[1], "https://b.example/redirected");
    assert_eq!(tab.url, "https://b.example/redirected");
}

#[test]
fn test_update_title_and_favicon() {
    let mut store = TabStore::new();
    let id = store.create_tab(None, None).unwrap();
    assert!(store.update_title(&id, "Docs"));
    assert!(store.update_favicon(&id, "https://a.example/favicon.ico"));
    let tab = store.get_tab(&id).unwrap();
    assert_eq!(tab.title, "Docs");
    assert_eq!(tab.favicon.as_deref(), Some("https://a.example/favicon.ico"));
}

#[test]
fn test_mark_load_failed() {
    let mut store = TabStore::new();
    let id = store.create_tab(Some("https://a.example"), None).unwrap();
    assert!(store.mark_load_failed(&id));
    assert_eq!(store.get_tab(&id).unwrap().title, "Failed to load");
}

// ─── Restore ───

#[test]
fn test_restore_sanitizes_dangling_references() {
    let mut tab = Tab::new("tab-1".to_string(), "https://a.example".to_string(), "A".to_string(), 0);
    tab.parent_id = Some("tab-99".to_string());
    tab.child_ids = vec!["tab-98".to_string()];
    tab.synced_with_id = Some("tab-97".to_string());

    let store = TabStore::restore(vec![tab], Some("tab-42".to_string()), 2);
    let restored = store.get_tab("tab-1").unwrap();
    assert_eq!(restored.parent_id, None);
    assert!(restored.child_ids.is_empty());
    assert_eq!(restored.synced_with_id, None);
    // Unknown active id falls back to the first tab.
    assert_eq!(store.active_tab_id(), Some("tab-1"));
}

#[test]
fn test_restore_never_reuses_ids() {
    let tab = Tab::new("tab-7".to_string(), String::new(), "T".to_string(), 0);
    let mut store = TabStore::restore(vec![tab], None, 3);
    let id = store.create_tab(None, None).unwrap();
    assert_eq!(id, "tab-8");
}

#[test]
fn test_restore_flattens_sync_chains() {
    let a = Tab::new("tab-1".to_string(), "https://a.example".to_string(), "A".to_string(), 0);
    let mut b = Tab::new("tab-2".to_string(), "https://a.example".to_string(), "B".to_string(), 0);
    b.synced_with_id = Some("tab-1".to_string());
    let mut c = Tab::new("tab-3".to_string(), "https://a.example".to_string(), "C".to_string(), 0);
    c.synced_with_id = Some("tab-2".to_string());

    let store = TabStore::restore(vec![a, b, c], None, 4);
    assert_eq!(
        store.get_tab("tab-3").unwrap().synced_with_id,
        Some("tab-1".to_string())
    );
}

#[test]
fn test_restore_flattens_deep_sync_chain() {
    // Hand-edited state can carry arbitrarily deep follower chains; every
    // link must resolve all the way up to the chain's root.
    let mut tabs = vec![Tab::new(
        "tab-1".to_string(),
        "https://a.example".to_string(),
        "A".to_string(),
        0,
    )];
    for n in 2..=4 {
        let mut tab = Tab::new(
            format!("tab-{}", n),
            "https://a.example".to_string(),
            format!("T{}", n),
            0,
        );
        tab.synced_with_id = Some(format!("tab-{}", n - 1));
        tabs.push(tab);
    }

    let mut store = TabStore::restore(tabs, None, 5);
    for id in ["tab-2", "tab-3", "tab-4"] {
        assert_eq!(
            store.get_tab(id).unwrap().synced_with_id,
            Some("tab-1".to_string())
        );
    }

    // The whole group moves together, including the deepest member.
    store.navigate("tab-1", "https://b.example");
    assert_eq!(store.get_tab("tab-4").unwrap().url, "https://b.example");
}

#[test]
fn test_restore_breaks_mutual_sync_cycle() {
    let mut a = Tab::new("tab-1".to_string(), "https://a.example".to_string(), "A".to_string(), 0);
    a.synced_with_id = Some("tab-2".to_string());
    let mut b = Tab::new("tab-2".to_string(), "https://a.example".to_string(), "B".to_string(), 0);
    b.synced_with_id = Some("tab-1".to_string());

    let mut store = TabStore::restore(vec![a, b], None, 3);
    // One member becomes the representative, the other its follower.
    assert_eq!(store.get_tab("tab-1").unwrap().synced_with_id, None);
    assert_eq!(
        store.get_tab("tab-2").unwrap().synced_with_id,
        Some("tab-1".to_string())
    );

    store.navigate("tab-2", "https://b.example");
    assert_eq!(store.get_tab("tab-1").unwrap().url, "https://b.example");
}
