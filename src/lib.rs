//! Tabshell — the tab and navigation state core of a desktop browser shell.
//!
//! This library crate exposes all modules for use by the binaries and
//! integration tests. The rendering engine lives in the host shell; this
//! crate owns tabs, navigation, bookmarks, history, downloads, settings,
//! and their persistence.

pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
