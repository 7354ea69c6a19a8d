use serde::{Deserialize, Serialize};

use super::errors::SettingsError;

/// Search engine used for omnibox queries that don't look like URLs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Google,
    Bing,
    DuckDuckGo,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::Google
    }
}

impl SearchEngine {
    /// Parse the persisted/RPC identifier; unknown ids fall back to Google.
    pub fn from_id(id: &str) -> Self {
        match id.to_lowercase().as_str() {
            "bing" => SearchEngine::Bing,
            "duckduckgo" => SearchEngine::DuckDuckGo,
            _ => SearchEngine::Google,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::Bing => "bing",
            SearchEngine::DuckDuckGo => "duckduckgo",
        }
    }
}

/// Shell settings, persisted inside the state blob.
///
/// Every field carries a serde default so older state files load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_home_url")]
    pub home_url: String,
    #[serde(default = "default_homepage")]
    pub homepage: String,
    #[serde(default)]
    pub search_engine: SearchEngine,
    /// Rendering engine selected in the host shell, if any.
    #[serde(default)]
    pub selected_engine: Option<String>,
    #[serde(default = "default_true")]
    pub ad_blocking_enabled: bool,
    #[serde(default = "default_true")]
    pub center_search_on_new_tab: bool,
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_home_url() -> String {
    "about:blank".to_string()
}

fn default_homepage() -> String {
    "about:newtab".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            homepage: default_homepage(),
            search_engine: SearchEngine::default(),
            selected_engine: None,
            ad_blocking_enabled: true,
            center_search_on_new_tab: true,
            onboarding_completed: false,
        }
    }
}

impl Settings {
    /// Updates an individual setting by dot-notation key path.
    ///
    /// Serializes to a `serde_json::Value`, navigates the path, sets the
    /// target, then deserializes back so type mismatches are rejected as a
    /// whole rather than leaving the struct half-updated.
    pub fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&*self)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;

        let parts: Vec<&str> = key.split('.').collect();
        {
            let mut current = &mut json_value;
            for (i, part) in parts.iter().enumerate() {
                let map = match current {
                    serde_json::Value::Object(map) => map,
                    _ => {
                        return Err(SettingsError::InvalidKey(format!(
                            "'{}' is not an object",
                            parts[..i].join(".")
                        )))
                    }
                };
                if !map.contains_key(*part) {
                    return Err(SettingsError::InvalidKey(format!("unknown key: {}", key)));
                }
                if i == parts.len() - 1 {
                    map.insert(part.to_string(), value);
                    break;
                }
                match map.get_mut(*part) {
                    Some(next) => current = next,
                    None => {
                        return Err(SettingsError::InvalidKey(format!("unknown key: {}", key)))
                    }
                }
            }
        }

        *self = serde_json::from_value(json_value)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        Ok(())
    }

    /// Reads an individual setting by dot-notation key path.
    pub fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        let json_value = serde_json::to_value(self).ok()?;
        let mut current = &json_value;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current.clone())
    }
}
