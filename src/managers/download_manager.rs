//! Download list carried in the persisted blob. The host shell performs
//! the actual transfers; this tracks what the sidebar shows.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::types::download::{Download, DownloadStatus};

pub struct DownloadManager {
    downloads: Vec<Download>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            downloads: Vec::new(),
        }
    }

    pub fn from_entries(downloads: Vec<Download>) -> Self {
        Self { downloads }
    }

    pub fn snapshot(&self) -> Vec<Download> {
        self.downloads.clone()
    }

    /// Registers a download and returns its id.
    pub fn add(&mut self, url: &str, filename: &str) -> String {
        let id = Uuid::new_v4().to_string();
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.downloads.push(Download {
            id: id.clone(),
            url: url.to_string(),
            filename: filename.to_string(),
            status: DownloadStatus::Pending,
            created_at,
        });
        id
    }

    pub fn set_status(&mut self, id: &str, status: DownloadStatus) -> bool {
        match self.downloads.iter_mut().find(|d| d.id == id) {
            Some(d) => {
                d.status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.downloads.len();
        self.downloads.retain(|d| d.id != id);
        self.downloads.len() != before
    }

    pub fn list(&self) -> &[Download] {
        &self.downloads
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}
