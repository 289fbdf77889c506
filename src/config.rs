//! Query catalog and digest configuration.
//!
//! The configuration is loaded once at startup and passed into the pipeline
//! as an immutable value. Without a `--config` file the built-in catalog is
//! used: six search queries covering AI news, company announcements, funding,
//! policy, and research, each with its own result limit, relevance threshold,
//! and site allow-list.
//!
//! # YAML format
//!
//! ```yaml
//! max_articles: 15
//! search_queries:
//!   - query: artificial intelligence news
//!     limit: 4
//!     min_ai_relevance: 0.4
//!     sites: [techcrunch.com, www.theverge.com]
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::info;

/// One configured search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySpec {
    /// The search query string.
    pub query: String,
    /// Maximum number of results to request for this query.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Minimum AI-relevance score an article from this query must reach
    /// to make it into the digest.
    #[serde(default = "default_min_relevance")]
    pub min_ai_relevance: f64,
    /// Domains to constrain the search to; empty means no constraint.
    #[serde(default)]
    pub sites: Vec<String>,
}

/// Top-level digest configuration: the query catalog plus global limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Upper bound on the number of articles in the final digest.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// The query catalog, run in order.
    pub search_queries: Vec<QuerySpec>,
}

fn default_limit() -> usize {
    5
}

fn default_min_relevance() -> f64 {
    0.3
}

fn default_max_articles() -> usize {
    15
}

impl DigestConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: DigestConfig = serde_yaml::from_str(&raw)?;
        info!(path, queries = config.search_queries.len(), "Loaded digest configuration");
        Ok(config)
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        let q = |query: &str, limit: usize, min: f64, sites: &[&str]| QuerySpec {
            query: query.to_string(),
            limit,
            min_ai_relevance: min,
            sites: sites.iter().map(|s| s.to_string()).collect(),
        };

        DigestConfig {
            max_articles: 15,
            search_queries: vec![
                q(
                    "artificial intelligence news",
                    4,
                    0.4,
                    &["techcrunch.com", "www.technologyreview.com", "www.theverge.com"],
                ),
                q(
                    "OpenAI ChatGPT GPT news",
                    3,
                    0.5,
                    &["techcrunch.com", "www.reuters.com", "www.bloomberg.com"],
                ),
                q(
                    "Google AI Gemini DeepMind",
                    3,
                    0.4,
                    &["blog.google", "techcrunch.com", "www.theverge.com"],
                ),
                q(
                    "machine learning AI startups funding",
                    2,
                    0.3,
                    &["techcrunch.com", "venturebeat.com"],
                ),
                q(
                    "AI regulation policy government",
                    2,
                    0.3,
                    &["www.reuters.com", "www.technologyreview.com"],
                ),
                q(
                    "AI research breakthrough science",
                    2,
                    0.4,
                    &["www.technologyreview.com", "arstechnica.com"],
                ),
            ],
        }
    }
}
