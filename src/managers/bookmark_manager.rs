//! Bookmark manager: a flat in-memory collection keyed by URL.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::bookmark::Bookmark;

/// Trait defining bookmark operations.
pub trait BookmarkManagerTrait {
    /// Adds a bookmark. Returns false (and changes nothing) when the URL
    /// is already bookmarked.
    fn add_bookmark(&mut self, url: &str, title: &str, icon: Option<&str>) -> bool;
    fn remove_bookmark(&mut self, url: &str) -> bool;
    fn is_bookmarked(&self, url: &str) -> bool;
    fn search_bookmarks(&self, query: &str) -> Vec<&Bookmark>;
    fn list_bookmarks(&self) -> &[Bookmark];
}

pub struct BookmarkManager {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkManager {
    pub fn new() -> Self {
        Self {
            bookmarks: Vec::new(),
        }
    }

    pub fn from_entries(bookmarks: Vec<Bookmark>) -> Self {
        let mut mgr = Self::new();
        for b in bookmarks {
            if !mgr.is_bookmarked(&b.url) {
                mgr.bookmarks.push(b);
            }
        }
        mgr
    }

    pub fn snapshot(&self) -> Vec<Bookmark> {
        self.bookmarks.clone()
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl Default for BookmarkManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    fn add_bookmark(&mut self, url: &str, title: &str, icon: Option<&str>) -> bool {
        if self.is_bookmarked(url) {
            return false;
        }
        self.bookmarks.push(Bookmark {
            url: url.to_string(),
            title: title.to_string(),
            icon: icon.map(str::to_string),
            created_at: Self::now(),
        });
        true
    }

    fn remove_bookmark(&mut self, url: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.url != url);
        self.bookmarks.len() != before
    }

    fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    /// Case-insensitive substring match over title and URL.
    fn search_bookmarks(&self, query: &str) -> Vec<&Bookmark> {
        let q = query.to_lowercase();
        self.bookmarks
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&q) || b.url.to_lowercase().contains(&q))
            .collect()
    }

    fn list_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }
}
