//! Digest rendering for email delivery.
//!
//! This module turns a ranked [`Digest`](crate::models::Digest) into a
//! delivery-ready payload: a subject line, a positional entry list, an HTML
//! body, and a plain-text alternative. Rendering is pure — it never mutates,
//! re-filters, or reorders the digest.
//!
//! # Submodules
//!
//! - [`html`]: styled HTML email body
//! - [`plain`]: HTML → plain-text conversion for the multipart alternative

pub mod html;
pub mod plain;

use crate::models::Digest;
use chrono::NaiveDate;

/// One rendered digest entry; `position` 1 is the highest-scoring article.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestEntry {
    pub position: usize,
    pub title: String,
    pub url: String,
    pub score: f64,
    pub source: String,
    pub summary: String,
}

/// A fully rendered digest, ready to hand to the mailer.
#[derive(Debug)]
pub struct FormattedDigest {
    pub subject: String,
    pub entries: Vec<DigestEntry>,
    pub html_body: String,
    pub plain_body: String,
}

/// Render a digest for the given date.
///
/// Preserves digest order exactly; the input is only read.
pub fn render(digest: &Digest, date: NaiveDate) -> FormattedDigest {
    let entries: Vec<DigestEntry> = digest
        .articles
        .iter()
        .enumerate()
        .map(|(i, scored)| DigestEntry {
            position: i + 1,
            title: scored.article.title.clone(),
            url: scored.article.url.clone(),
            score: scored.relevance_score,
            source: scored.article.source_site.clone(),
            summary: scored.article.snippet.clone(),
        })
        .collect();

    let subject = format!("🤖 AI News Digest - {}", date.format("%B %d, %Y"));
    let html_body = html::render_html(&entries, date);
    let plain_body = plain::html_to_plain(&html_body);

    FormattedDigest { subject, entries, html_body, plain_body }
}
