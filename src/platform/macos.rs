// Tabshell platform paths for macOS
// Data: ~/Library/Application Support/Tabshell

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the data directory for Tabshell on macOS.
/// `~/Library/Application Support/Tabshell`
pub fn get_data_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Tabshell")
}
