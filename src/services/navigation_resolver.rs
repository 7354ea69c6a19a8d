//! Navigation resolver: turns raw address-bar text into a navigable URL,
//! a search-engine query URL, or a rejection.
//!
//! The heuristic is deliberately permissive: a bare `word.tld` becomes a
//! URL, anything else becomes a search. Rejections are data, not errors;
//! the UI surfaces them as a transient cue and moves on.

use url::Url;

use crate::types::settings::SearchEngine;

/// Inputs longer than this, in characters, are rejected outright.
pub const MAX_INPUT_LEN: usize = 2048;

/// Search queries are truncated to this many characters before encoding.
const MAX_QUERY_LEN: usize = 1000;

/// URL schemes that must never reach the rendering surface.
pub const DISALLOWED_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "vbscript:",
    "file:",
    "ftp:",
    "chrome:",
    "chrome-extension:",
    "moz-extension:",
    "edge:",
    "opera:",
    "mailto:",
    "tel:",
    "sms:",
];

/// Outcome of resolving one omnibox input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A direct, fully-qualified URL to navigate to.
    Url(String),
    /// A search-engine query URL built from the input.
    Search(String),
    /// Input that must not be navigated; the reason drives the UI cue.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    TooLong,
    DisallowedScheme(&'static str),
    Malformed,
}

impl RejectReason {
    pub fn message(&self) -> String {
        match self {
            RejectReason::Empty => "empty input".to_string(),
            RejectReason::TooLong => "input too long".to_string(),
            RejectReason::DisallowedScheme(scheme) => {
                format!("URL scheme '{}' is not allowed", scheme)
            }
            RejectReason::Malformed => "not a valid URL".to_string(),
        }
    }
}

/// Builds the search URL for a query against the given engine.
pub fn build_search_url(query: &str, engine: SearchEngine) -> String {
    let truncated: String = query.chars().take(MAX_QUERY_LEN).collect();
    let encoded = urlencoding::encode(&truncated);
    match engine {
        SearchEngine::Google => format!("https://www.google.com/search?q={}", encoded),
        SearchEngine::Bing => format!("https://www.bing.com/search?q={}", encoded),
        SearchEngine::DuckDuckGo => format!("https://duckduckgo.com/?q={}", encoded),
    }
}

/// Resolve raw omnibox input against the configured search engine.
pub fn resolve(raw: &str, engine: SearchEngine) -> Resolution {
    let input = raw.trim();
    if input.is_empty() {
        return Resolution::Rejected(RejectReason::Empty);
    }
    if input.chars().count() > MAX_INPUT_LEN {
        return Resolution::Rejected(RejectReason::TooLong);
    }

    let lower = input.to_lowercase();
    for scheme in DISALLOWED_SCHEMES {
        if lower.starts_with(scheme) {
            return Resolution::Rejected(RejectReason::DisallowedScheme(scheme));
        }
    }

    // Internal pages skip URL validation; `about:` is not a hierarchical
    // scheme and the shell handles these itself.
    if lower.starts_with("about:") {
        return Resolution::Url(input.to_string());
    }

    if lower.starts_with("http://") || lower.starts_with("https://") {
        return match validate(input) {
            Some(url) => Resolution::Url(url),
            None => Resolution::Rejected(RejectReason::Malformed),
        };
    }

    // Domain-like heuristic: has a dot, no whitespace. Dotted IPs pass too.
    if input.contains('.') && !input.contains(char::is_whitespace) {
        let candidate = format!("https://{}", input);
        return match validate(&candidate) {
            Some(url) => Resolution::Url(url),
            None => Resolution::Rejected(RejectReason::Malformed),
        };
    }

    Resolution::Search(build_search_url(input, engine))
}

/// Checks well-formedness. Returns the candidate string, not the parser's
/// normalization, so what the user typed is what the tab records.
fn validate(candidate: &str) -> Option<String> {
    if Url::parse(candidate).is_ok() {
        Some(candidate.to_string())
    } else {
        None
    }
}
