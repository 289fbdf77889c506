//! Data models for search results as they move through the pipeline.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleCandidate`]: A raw search result normalized into an article record
//! - [`ScoredArticle`]: A candidate plus its computed AI-relevance score
//! - [`Digest`]: The final bounded, deduplicated, ranked article list for one run
//!
//! The pipeline is a linear sequence of transformations over these types:
//! query catalog → candidates → scored articles → digest → formatted email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw article candidate as returned by the search provider.
///
/// This struct represents one normalized search result before scoring.
/// It is immutable once created: the fetcher builds it and every later
/// stage only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCandidate {
    /// The article headline as reported by the search provider.
    pub title: String,
    /// The absolute URL of the article.
    pub url: String,
    /// A short description of the article, truncated to ~300 characters.
    pub snippet: String,
    /// Friendly source name derived from the URL host (e.g. "TechCrunch").
    pub source_site: String,
    /// Publication timestamp, when the provider reports one.
    ///
    /// The search endpoint does not return dates, so this is `None` in
    /// practice; it is kept so richer providers can populate it.
    pub published_at: Option<DateTime<Utc>>,
}

/// An [`ArticleCandidate`] together with its AI-relevance score.
///
/// The score is a pure function of the candidate's title and snippet,
/// always in `[0.0, 1.0]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    /// The underlying candidate.
    pub article: ArticleCandidate,
    /// AI-relevance score in `[0.0, 1.0]`.
    pub relevance_score: f64,
}

/// The final ranked article list for a single run.
///
/// Invariants (established by [`crate::digest::build_digest`]):
/// - sorted by `relevance_score` descending, ties in first-seen order
/// - no two entries share a URL or a normalized title
/// - length is at most the configured `max_articles`
/// - every entry met the `min_ai_relevance` of the query that produced it
///
/// An empty digest is a valid outcome, not an error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Digest {
    /// Ranked articles, best first.
    pub articles: Vec<ScoredArticle>,
}

impl Digest {
    /// Number of articles in the digest.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// True when the run produced no qualifying articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
