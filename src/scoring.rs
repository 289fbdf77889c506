//! AI-relevance scoring for article candidates.
//!
//! The scorer scans an article's title and snippet for weighted keyword
//! signals and maps the aggregate weight onto `[0.0, 1.0]` with a saturating
//! division: strong signals like "artificial intelligence" or "GPT" count
//! for more than weak ones like "automation", and no keyword density can push
//! a score past 1.0.
//!
//! Scoring is a pure function of the input text; the weight table is held by
//! the scorer value rather than hard-coded so tests can substitute their own.

use crate::models::{ArticleCandidate, ScoredArticle};

/// Aggregate weight at which the score saturates to 1.0.
const SATURATION: f64 = 8.0;

/// Keyword-weighted relevance scorer.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    /// Lowercase keyword/phrase → signal weight.
    weights: Vec<(String, f64)>,
    /// Aggregate weight mapped to a score of 1.0.
    saturation: f64,
}

impl RelevanceScorer {
    /// Build a scorer from an explicit weight table.
    ///
    /// Keywords are matched as lowercase substrings of `title + snippet`;
    /// callers should supply them lowercased.
    pub fn new(weights: Vec<(String, f64)>, saturation: f64) -> Self {
        Self { weights, saturation }
    }

    /// Score a candidate's AI relevance in `[0.0, 1.0]`.
    ///
    /// Deterministic: the same candidate text always produces the same
    /// score. An empty snippet degrades to title-only scoring; text with no
    /// matched keywords scores exactly 0.0.
    pub fn score(&self, candidate: &ArticleCandidate) -> f64 {
        let text = format!("{} {}", candidate.title, candidate.snippet).to_lowercase();

        let total: f64 = self
            .weights
            .iter()
            .filter(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, weight)| weight)
            .sum();

        (total / self.saturation).min(1.0)
    }

    /// Attach a relevance score to a candidate.
    pub fn score_candidate(&self, candidate: ArticleCandidate) -> ScoredArticle {
        let relevance_score = self.score(&candidate);
        ScoredArticle { article: candidate, relevance_score }
    }
}

impl Default for RelevanceScorer {
    /// The standard AI-news weight table.
    ///
    /// Weight 3.0 for core AI terms, 2.0 for the major labs, 1.0 for
    /// adjacent signals. The bare "ml" acronym is left out: substring
    /// matching would hit "html" and "xml".
    fn default() -> Self {
        let w = |k: &str, weight: f64| (k.to_string(), weight);
        Self::new(
            vec![
                w("artificial intelligence", 3.0),
                w("machine learning", 3.0),
                w("deep learning", 3.0),
                w("ai", 3.0),
                w("gpt", 3.0),
                w("llm", 3.0),
                w("openai", 2.0),
                w("chatgpt", 2.0),
                w("deepmind", 2.0),
                w("anthropic", 2.0),
                w("neural network", 1.0),
                w("transformer", 1.0),
                w("generative ai", 1.0),
                w("computer vision", 1.0),
                w("natural language processing", 1.0),
                w("nlp", 1.0),
                w("robotics", 1.0),
                w("automation", 1.0),
                w("algorithm", 1.0),
                w("data science", 1.0),
                w("claude", 1.0),
                w("google ai", 1.0),
                w("autonomous", 1.0),
                w("intelligent", 1.0),
                w("tech startup", 1.0),
                w("ai model", 1.0),
                w("training", 1.0),
                w("inference", 1.0),
                w("prediction", 1.0),
            ],
            SATURATION,
        )
    }
}
