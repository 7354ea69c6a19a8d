use serde::{Deserialize, Serialize};

/// Represents a saved bookmark. The URL is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub icon: Option<String>,
    pub created_at: i64,
}
