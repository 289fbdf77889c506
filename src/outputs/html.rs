//! HTML email body rendering.
//!
//! Produces a self-contained HTML document: a header with the digest date, a
//! stats line with the article count, one block per article (linked title,
//! source badge, AI score badge, summary), and a footer. All article text is
//! HTML-escaped before interpolation.

use super::DigestEntry;
use chrono::NaiveDate;
use std::fmt::Write;

/// Render the full HTML body for a digest.
pub fn render_html(entries: &[DigestEntry], date: NaiveDate) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>
  body { font-family: -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', sans-serif;
         line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto;
         padding: 20px; background-color: #f8f9fa; }
  .container { background-color: white; border-radius: 12px; overflow: hidden; }
  .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white; padding: 30px 20px; text-align: center; }
  .header h1 { margin: 0; font-size: 28px; }
  .content { padding: 20px; }
  .stats { background: #e3f2fd; padding: 20px; border-radius: 8px;
           margin-bottom: 20px; text-align: center; }
  .article { background: #f8f9fa; border-left: 4px solid #007bff;
             padding: 20px; margin-bottom: 20px; border-radius: 0 8px 8px 0; }
  .article-title { font-size: 18px; font-weight: 600; margin-bottom: 12px; }
  .article-title a { color: #007bff; text-decoration: none; }
  .article-meta { color: #666; font-size: 14px; margin-bottom: 12px; }
  .article-summary { color: #444; }
  .source { background: #e9ecef; padding: 4px 12px; border-radius: 20px; font-size: 12px; }
  .ai-score { background: #28a745; color: white; padding: 4px 12px;
              border-radius: 20px; font-size: 12px; }
  .footer { text-align: center; padding: 20px; color: #666; font-size: 14px; }
</style>
</head>
<body>
<div class="container">
"#,
    );

    let _ = write!(
        html,
        "<div class=\"header\">\n<h1>🤖 AI News Digest</h1>\n<p>{}</p>\n</div>\n<div class=\"content\">\n",
        date.format("%B %d, %Y")
    );
    let _ = write!(
        html,
        "<div class=\"stats\">\n<h3>🔍 Today's AI News</h3>\n<p><strong>{}</strong> curated articles found</p>\n</div>\n",
        entries.len()
    );

    for entry in entries {
        let _ = write!(
            html,
            r#"<div class="article">
<div class="article-title"><a href="{url}" target="_blank">{title}</a></div>
<div class="article-meta"><span class="source">{source}</span> <span class="ai-score">AI Score: {score:.1}</span></div>
<div class="article-summary">{summary}</div>
</div>
"#,
            url = escape_html(&entry.url),
            title = escape_html(&entry.title),
            source = escape_html(&entry.source),
            score = entry.score,
            summary = escape_html(&entry.summary),
        );
    }

    html.push_str(
        r#"</div>
<div class="footer">
<p><strong>Powered by Firecrawl Search</strong></p>
<p>This digest was generated automatically from web search results.</p>
</div>
</div>
</body>
</html>
"#,
    );

    html
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(position: usize, title: &str, score: f64) -> DigestEntry {
        DigestEntry {
            position,
            title: title.to_string(),
            url: format!("https://example.com/{position}"),
            score,
            source: "The Verge".to_string(),
            summary: "A summary.".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html(r#"say "hi'"#), "say &quot;hi&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_html_contains_entries_in_order() {
        let html = render_html(
            &[entry(1, "First headline", 0.9), entry(2, "Second headline", 0.5)],
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        );
        let first = html.find("First headline").unwrap();
        let second = html.find("Second headline").unwrap();
        assert!(first < second);
        assert!(html.contains("AI Score: 0.9"));
        assert!(html.contains("August 30, 2026"));
    }

    #[test]
    fn test_render_html_escapes_title() {
        let html = render_html(
            &[entry_with_title("<b>Bold</b> & dangerous")],
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        );
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; dangerous"));
        assert!(!html.contains("<b>Bold</b>"));
    }

    fn entry_with_title(title: &str) -> DigestEntry {
        DigestEntry {
            position: 1,
            title: title.to_string(),
            url: "https://example.com/x".to_string(),
            score: 0.4,
            source: "Example.com".to_string(),
            summary: String::new(),
        }
    }
}
