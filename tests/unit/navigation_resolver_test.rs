use rstest::rstest;

use tabshell::services::navigation_resolver::{build_search_url, resolve, RejectReason, Resolution};
use tabshell::types::settings::SearchEngine;

fn resolve_google(input: &str) -> Resolution {
    resolve(input, SearchEngine::Google)
}

// ─── Direct URLs ───

#[rstest]
#[case("https://example.com", "https://example.com")]
#[case("http://example.com/path?x=1", "http://example.com/path?x=1")]
#[case("github.com", "https://github.com")]
#[case("www.github.com", "https://www.github.com")]
#[case("docs.rs/serde", "https://docs.rs/serde")]
#[case("192.168.1.1", "https://192.168.1.1")]
#[case("about:newtab", "about:newtab")]
#[case("about:blank", "about:blank")]
fn test_resolves_to_url(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(resolve_google(input), Resolution::Url(expected.to_string()));
}

#[test]
fn test_input_is_trimmed() {
    assert_eq!(
        resolve_google("  github.com  "),
        Resolution::Url("https://github.com".to_string())
    );
}

// ─── Searches ───

#[rstest]
#[case("rust programming", "https://www.google.com/search?q=rust%20programming")]
#[case("what is rust?", "https://www.google.com/search?q=what%20is%20rust%3F")]
#[case("ht tp://broken url", "https://www.google.com/search?q=ht%20tp%3A%2F%2Fbroken%20url")]
#[case("localhost:3000", "https://www.google.com/search?q=localhost%3A3000")]
fn test_resolves_to_search(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(resolve_google(input), Resolution::Search(expected.to_string()));
}

#[test]
fn test_domain_with_space_is_a_search() {
    // Has a dot but also whitespace, so the domain heuristic must not fire.
    match resolve_google("example.com is down") {
        Resolution::Search(url) => assert!(url.starts_with("https://www.google.com/search?q=")),
        other => panic!("expected search, got {:?}", other),
    }
}

#[rstest]
#[case(SearchEngine::Google, "https://www.google.com/search?q=cats")]
#[case(SearchEngine::Bing, "https://www.bing.com/search?q=cats")]
#[case(SearchEngine::DuckDuckGo, "https://duckduckgo.com/?q=cats")]
fn test_engine_selection(#[case] engine: SearchEngine, #[case] expected: &str) {
    assert_eq!(resolve("cats", engine), Resolution::Search(expected.to_string()));
}

#[test]
fn test_query_truncated_before_encoding() {
    let long_query = "a ".repeat(700); // 1400 chars, all searchable
    let url = build_search_url(&long_query, SearchEngine::Google);
    let query = url.strip_prefix("https://www.google.com/search?q=").unwrap();
    // 1000 chars of alternating "a" and space: 500 "a", 500 encoded spaces.
    assert_eq!(query.matches("a").count(), 500);
    assert_eq!(query.matches("%20").count(), 500);
}

// ─── Rejections ───

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn test_empty_input_rejected(#[case] input: &str) {
    assert_eq!(resolve_google(input), Resolution::Rejected(RejectReason::Empty));
}

#[test]
fn test_oversized_input_rejected() {
    let input = "a".repeat(3000);
    assert_eq!(resolve_google(&input), Resolution::Rejected(RejectReason::TooLong));
}

#[test]
fn test_input_at_limit_is_allowed() {
    let input = "a".repeat(2048);
    assert!(matches!(resolve_google(&input), Resolution::Search(_)));
}

#[test]
fn test_length_limit_counts_characters_not_bytes() {
    // Two bytes per character in UTF-8; still exactly 2048 characters.
    let input = "ü".repeat(2048);
    assert!(matches!(resolve_google(&input), Resolution::Search(_)));
    let over = "ü".repeat(2049);
    assert_eq!(resolve_google(&over), Resolution::Rejected(RejectReason::TooLong));
}

#[rstest]
#[case("javascript:alert(1)", "javascript:")]
#[case("JavaScript:alert(1)", "javascript:")]
#[case("DATA:text/html,<script>", "data:")]
#[case("file:///etc/passwd", "file:")]
#[case("vbscript:msgbox(1)", "vbscript:")]
#[case("chrome://settings", "chrome:")]
#[case("mailto:someone@example.com", "mailto:")]
fn test_disallowed_schemes_rejected(#[case] input: &str, #[case] scheme: &str) {
    match resolve_google(input) {
        Resolution::Rejected(RejectReason::DisallowedScheme(s)) => assert_eq!(s, scheme),
        other => panic!("expected scheme rejection, got {:?}", other),
    }
}

#[rstest]
#[case("http://bad host")]
#[case("https://")]
fn test_malformed_http_input_rejected(#[case] input: &str) {
    assert_eq!(resolve_google(input), Resolution::Rejected(RejectReason::Malformed));
}

#[test]
fn test_reject_reason_messages() {
    assert_eq!(RejectReason::Empty.message(), "empty input");
    assert_eq!(RejectReason::TooLong.message(), "input too long");
    assert_eq!(
        RejectReason::DisallowedScheme("javascript:").message(),
        "URL scheme 'javascript:' is not allowed"
    );
    assert_eq!(RejectReason::Malformed.message(), "not a valid URL");
}
