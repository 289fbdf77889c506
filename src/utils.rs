//! Utility functions for title normalization, snippet truncation, and
//! source-name extraction.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use url::Url;

/// Friendly display names for well-known news domains.
static SOURCE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("techcrunch.com", "TechCrunch"),
        ("www.technologyreview.com", "MIT Technology Review"),
        ("openai.com", "OpenAI"),
        ("blog.google", "Google AI Blog"),
        ("deepmind.google", "Google DeepMind"),
        ("www.theverge.com", "The Verge"),
        ("arstechnica.com", "Ars Technica"),
        ("venturebeat.com", "VentureBeat"),
        ("artificialintelligence-news.com", "AI News"),
        ("www.wired.com", "Wired"),
        ("www.reuters.com", "Reuters"),
        ("www.bloomberg.com", "Bloomberg"),
    ])
});

/// Normalize a title for duplicate detection.
///
/// Lowercases and collapses all runs of whitespace to a single space, so
/// `"OpenAI  Announces "` and `"openai announces"` compare equal.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_title("  OpenAI  News "), "openai news");
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a snippet to at most `max` characters, appending `"..."`.
///
/// Operates on characters rather than bytes so multi-byte text never
/// panics on a UTF-8 boundary.
pub fn truncate_snippet(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

/// Derive a friendly source name from an article URL.
///
/// Known domains map to their display names; unknown domains fall back to
/// the host with any `www.` prefix stripped and the first letter upcased.
/// Unparseable URLs yield `"Unknown Source"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(source_from_url("https://techcrunch.com/x"), "TechCrunch");
/// assert_eq!(source_from_url("https://example.com/x"), "Example.com");
/// ```
pub fn source_from_url(url: &str) -> String {
    let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
        Some(h) => h,
        None => return "Unknown Source".to_string(),
    };

    if let Some(name) = SOURCE_NAMES.get(host.as_str()) {
        return name.to_string();
    }

    upcase(host.trim_start_matches("www."))
}

/// Capitalize the first character of a string.
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}
