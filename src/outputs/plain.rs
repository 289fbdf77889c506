//! Plain-text rendering for the multipart/alternative email body.
//!
//! Mail clients that refuse HTML get a readable fallback produced by
//! stripping tags from the HTML body and collapsing whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<(style|script)[^>]*>.*?</(style|script)>").unwrap());

/// Convert an HTML document into whitespace-collapsed plain text.
pub fn html_to_plain(html: &str) -> String {
    let without_style = STYLE_BLOCK.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_style, " ");

    without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
