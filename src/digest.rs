//! Deduplication and ranking: scored batches in, one bounded digest out.
//!
//! The pipeline hands this module the per-query batches in catalog order.
//! Building the digest is a single deterministic pass:
//!
//! 1. flatten the batches, preserving catalog order then within-query order
//! 2. drop articles below their originating query's `min_ai_relevance`
//! 3. deduplicate on exact URL or normalized title, first occurrence wins
//! 4. stable-sort by relevance score descending (ties keep first-seen order)
//! 5. truncate to `max_articles`
//!
//! An empty digest is a valid result; the caller decides what to do with it.

use crate::models::{Digest, ScoredArticle};
use crate::utils::normalize_title;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

/// The scored articles fetched for one catalog entry, with the threshold
/// that entry carries.
#[derive(Debug)]
pub struct QueryResults {
    /// Minimum relevance an article from this query must reach.
    pub min_ai_relevance: f64,
    /// Scored articles in fetch order.
    pub articles: Vec<ScoredArticle>,
}

/// Merge all per-query batches into the final ranked digest.
pub fn build_digest(batches: Vec<QueryResults>, max_articles: usize) -> Digest {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut kept: Vec<ScoredArticle> = Vec::new();

    let mut below_threshold = 0usize;
    let mut duplicates = 0usize;

    for batch in batches {
        for scored in batch.articles {
            if scored.relevance_score < batch.min_ai_relevance {
                debug!(
                    title = %scored.article.title,
                    score = scored.relevance_score,
                    threshold = batch.min_ai_relevance,
                    "Article below relevance threshold; dropped"
                );
                below_threshold += 1;
                continue;
            }

            let title_key = normalize_title(&scored.article.title);
            if seen_urls.contains(&scored.article.url) || seen_titles.contains(&title_key) {
                debug!(title = %scored.article.title, url = %scored.article.url, "Duplicate article; dropped");
                duplicates += 1;
                continue;
            }

            seen_urls.insert(scored.article.url.clone());
            seen_titles.insert(title_key);
            kept.push(scored);
        }
    }

    // Vec::sort_by is stable, so equal scores keep first-seen order.
    kept.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    kept.truncate(max_articles);

    info!(
        kept = kept.len(),
        below_threshold,
        duplicates,
        max_articles,
        "Built digest"
    );
    Digest { articles: kept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleCandidate;

    fn scored(title: &str, url: &str, score: f64) -> ScoredArticle {
        ScoredArticle {
            article: ArticleCandidate {
                title: title.to_string(),
                url: url.to_string(),
                snippet: String::new(),
                source_site: "Example.com".to_string(),
                published_at: None,
            },
            relevance_score: score,
        }
    }

    fn batch(min: f64, articles: Vec<ScoredArticle>) -> QueryResults {
        QueryResults { min_ai_relevance: min, articles }
    }

    #[test]
    fn test_duplicate_url_dropped_first_seen_wins() {
        let digest = build_digest(
            vec![batch(
                0.5,
                vec![
                    scored("OpenAI announces new GPT model", "https://a.com/1", 0.9),
                    scored("Google's AI breakthrough", "https://a.com/2", 0.8),
                    scored("OpenAI announces new GPT model", "https://a.com/1", 0.9),
                ],
            )],
            2,
        );

        assert_eq!(digest.len(), 2);
        assert_eq!(digest.articles[0].article.url, "https://a.com/1");
        assert_eq!(digest.articles[0].relevance_score, 0.9);
        assert_eq!(digest.articles[1].article.url, "https://a.com/2");
    }

    #[test]
    fn test_duplicate_normalized_title_dropped() {
        let digest = build_digest(
            vec![batch(
                0.0,
                vec![
                    scored("AI Startup Raises $50M", "https://a.com/1", 0.6),
                    scored("  ai startup   raises $50m ", "https://b.com/other", 0.7),
                ],
            )],
            10,
        );

        assert_eq!(digest.len(), 1);
        assert_eq!(digest.articles[0].article.url, "https://a.com/1");
    }

    #[test]
    fn test_threshold_is_per_query() {
        let digest = build_digest(
            vec![
                batch(0.5, vec![scored("Strict query result", "https://a.com/1", 0.45)]),
                batch(0.3, vec![scored("Lenient query result", "https://a.com/2", 0.45)]),
            ],
            10,
        );

        assert_eq!(digest.len(), 1);
        assert_eq!(digest.articles[0].article.title, "Lenient query result");
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let digest = build_digest(
            vec![batch(
                0.0,
                vec![
                    scored("First at 0.5", "https://a.com/1", 0.5),
                    scored("The 0.9 one", "https://a.com/2", 0.9),
                    scored("Second at 0.5", "https://a.com/3", 0.5),
                ],
            )],
            10,
        );

        let titles: Vec<&str> = digest.articles.iter().map(|a| a.article.title.as_str()).collect();
        assert_eq!(titles, vec!["The 0.9 one", "First at 0.5", "Second at 0.5"]);
    }

    #[test]
    fn test_truncates_to_max_articles() {
        let articles = (0..20)
            .map(|i| scored(&format!("Article {i}"), &format!("https://a.com/{i}"), 0.5))
            .collect();
        let digest = build_digest(vec![batch(0.0, articles)], 15);
        assert_eq!(digest.len(), 15);
    }

    #[test]
    fn test_all_below_threshold_yields_empty_digest() {
        let digest = build_digest(
            vec![batch(
                0.5,
                vec![
                    scored("Weak signal one", "https://a.com/1", 0.1),
                    scored("Weak signal two", "https://a.com/2", 0.2),
                ],
            )],
            10,
        );
        assert!(digest.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_digest() {
        assert!(build_digest(vec![], 10).is_empty());
        assert!(build_digest(vec![batch(0.3, vec![])], 10).is_empty());
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = build_digest(
            vec![batch(
                0.0,
                vec![
                    scored("Alpha", "https://a.com/1", 0.9),
                    scored("Beta", "https://a.com/2", 0.7),
                    scored("Alpha", "https://a.com/1", 0.9),
                ],
            )],
            10,
        );

        let twice = build_digest(
            vec![QueryResults { min_ai_relevance: 0.0, articles: once.articles.clone() }],
            10,
        );

        assert_eq!(twice.len(), once.len());
        for (a, b) in once.articles.iter().zip(twice.articles.iter()) {
            assert_eq!(a.article.url, b.article.url);
            assert_eq!(a.relevance_score, b.relevance_score);
        }
    }

    #[test]
    fn test_catalog_order_preserved_across_batches_on_tie() {
        let digest = build_digest(
            vec![
                batch(0.0, vec![scored("From query one", "https://a.com/1", 0.5)]),
                batch(0.0, vec![scored("From query two", "https://a.com/2", 0.5)]),
            ],
            10,
        );
        assert_eq!(digest.articles[0].article.title, "From query one");
        assert_eq!(digest.articles[1].article.title, "From query two");
    }
}
