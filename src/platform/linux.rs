// Tabshell platform paths for Linux
// Data: ~/.local/share/tabshell

use std::env;
use std::path::PathBuf;

/// Returns the data directory for Tabshell on Linux.
/// Uses `$XDG_DATA_HOME/tabshell` if set, otherwise `~/.local/share/tabshell`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("tabshell")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("tabshell")
    }
}
