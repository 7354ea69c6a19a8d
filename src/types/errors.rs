use std::fmt;

// === PersistenceError ===

/// Errors related to reading or writing persisted state.
#[derive(Debug)]
pub enum PersistenceError {
    /// Underlying storage read/write failed.
    Io(String),
    /// State payload could not be (de)serialized.
    Serialization(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(msg) => write!(f, "Persistence I/O error: {}", msg),
            PersistenceError::Serialization(msg) => {
                write!(f, "Persistence serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

// === SettingsError ===

/// Errors related to settings updates.
#[derive(Debug)]
pub enum SettingsError {
    /// The dot-notation key path does not name a settings field.
    InvalidKey(String),
    /// Settings could not be (de)serialized.
    Serialization(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidKey(msg) => write!(f, "Invalid settings key: {}", msg),
            SettingsError::Serialization(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
