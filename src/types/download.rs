use serde::{Deserialize, Serialize};

/// Status of a file download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DownloadStatus {
    Pending,
    InProgress,
    Completed,
    Failed(String),
}

/// A download record as carried in the persisted state blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Download {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub status: DownloadStatus,
    pub created_at: i64,
}
