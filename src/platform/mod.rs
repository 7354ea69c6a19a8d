// Tabshell platform abstraction
// Platform-specific paths, selected with `cfg(target_os)` at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific data directory for Tabshell.
///
/// - **Linux**: `~/.local/share/tabshell` (or `$XDG_DATA_HOME/tabshell`)
/// - **macOS**: `~/Library/Application Support/Tabshell`
/// - **Windows**: `%APPDATA%/Tabshell`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
