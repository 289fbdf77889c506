//! Firecrawl search client.
//!
//! Issues one search call per [`QuerySpec`] against the Firecrawl Search API
//! and normalizes the raw results into [`ArticleCandidate`] records. Site
//! allow-lists are pushed into the query itself with `site:` operators, the
//! same scoping syntax the underlying search engine understands.
//!
//! A failed query is the caller's problem to tolerate: this module returns
//! the error, and the pipeline logs it and moves on to the next query.

use crate::config::QuerySpec;
use crate::models::ArticleCandidate;
use crate::utils::{source_from_url, truncate_snippet};
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DEFAULT_ENDPOINT: &str = "https://api.firecrawl.dev";
const SNIPPET_MAX_CHARS: usize = 300;

/// Raw search response payload.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<RawResult>,
}

/// One raw search result as returned by the provider.
#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
}

/// HTTP client for the Firecrawl Search API.
pub struct FirecrawlClient {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl FirecrawlClient {
    /// Build a client with a 30 second request timeout.
    pub fn new(api_key: &str) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            api_key: api_key.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client,
        })
    }

    /// Point the client at a different API endpoint (used by tests).
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Run one search and normalize the results, at most `spec.limit` of them.
    #[instrument(level = "info", skip_all, fields(query = %spec.query))]
    pub async fn fetch_query(&self, spec: &QuerySpec) -> Result<Vec<ArticleCandidate>, Box<dyn Error>> {
        let query = build_query(spec);
        debug!(%query, limit = spec.limit, "Searching");

        let body = serde_json::json!({
            "query": query,
            "limit": spec.limit,
        });

        let response = self
            .client
            .post(format!("{}/v1/search", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: SearchResponse = response.json().await?;
        if !payload.success {
            return Err(format!("search API reported failure for '{}'", spec.query).into());
        }

        let candidates = normalize_results(payload.data, spec.limit);
        info!(count = candidates.len(), "Search results normalized");
        Ok(candidates)
    }
}

/// Append `site:` operators for a non-empty allow-list.
fn build_query(spec: &QuerySpec) -> String {
    if spec.sites.is_empty() {
        spec.query.clone()
    } else {
        let site_filter = spec.sites.iter().map(|s| format!("site:{s}")).join(" OR ");
        format!("{} ({})", spec.query, site_filter)
    }
}

/// Turn raw results into candidates, dropping entries with no URL.
fn normalize_results(raw: Vec<RawResult>, limit: usize) -> Vec<ArticleCandidate> {
    raw.into_iter()
        .filter_map(|r| {
            if r.url.is_empty() {
                warn!(title = %r.title, "Search result without a URL; skipping");
                return None;
            }
            let source_site = source_from_url(&r.url);
            Some(ArticleCandidate {
                title: r.title,
                snippet: truncate_snippet(&r.description, SNIPPET_MAX_CHARS),
                source_site,
                url: r.url,
                published_at: None,
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(query: &str, sites: &[&str]) -> QuerySpec {
        QuerySpec {
            query: query.to_string(),
            limit: 5,
            min_ai_relevance: 0.3,
            sites: sites.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_query_without_sites() {
        assert_eq!(build_query(&spec("AI news", &[])), "AI news");
    }

    #[test]
    fn test_build_query_with_sites() {
        let s = spec("AI news", &["techcrunch.com", "www.theverge.com"]);
        assert_eq!(
            build_query(&s),
            "AI news (site:techcrunch.com OR site:www.theverge.com)"
        );
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "success": true,
            "data": [
                {"title": "OpenAI announces new GPT model",
                 "url": "https://techcrunch.com/gpt",
                 "description": "The lab revealed its latest model today."},
                {"title": "No link here", "url": "", "description": "orphan"}
            ]
        }"#;
        let payload: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(payload.success);

        let candidates = normalize_results(payload.data, 5);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "OpenAI announces new GPT model");
        assert_eq!(candidates[0].source_site, "TechCrunch");
        assert!(candidates[0].published_at.is_none());
    }

    #[test]
    fn test_response_parsing_missing_fields() {
        let json = r#"{"success": true, "data": [{"url": "https://example.com/a"}]}"#;
        let payload: SearchResponse = serde_json::from_str(json).unwrap();
        let candidates = normalize_results(payload.data, 5);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "");
        assert_eq!(candidates[0].snippet, "");
    }

    #[test]
    fn test_normalize_enforces_limit() {
        let raw: Vec<RawResult> = (0..10)
            .map(|i| RawResult {
                title: format!("Article {i}"),
                url: format!("https://example.com/{i}"),
                description: String::new(),
            })
            .collect();
        assert_eq!(normalize_results(raw, 3).len(), 3);
    }

    #[test]
    fn test_normalize_truncates_long_descriptions() {
        let raw = vec![RawResult {
            title: "Long".to_string(),
            url: "https://example.com/long".to_string(),
            description: "x".repeat(500),
        }];
        let candidates = normalize_results(raw, 5);
        assert!(candidates[0].snippet.ends_with("..."));
        assert_eq!(candidates[0].snippet.chars().count(), 303);
    }

    mod http {
        use super::*;
        use wiremock::matchers::{body_partial_json, header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test]
        async fn test_fetch_query_success() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/search"))
                .and(header("authorization", "Bearer fc-test"))
                .and(body_partial_json(serde_json::json!({"limit": 5})))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "success": true,
                    "data": [
                        {"title": "AI lab ships a model",
                         "url": "https://techcrunch.com/model",
                         "description": "A new release."}
                    ]
                })))
                .mount(&server)
                .await;

            let client = FirecrawlClient::new("fc-test").unwrap().with_endpoint(&server.uri());
            let candidates = client.fetch_query(&spec("AI news", &[])).await.unwrap();
            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].url, "https://techcrunch.com/model");
        }

        #[tokio::test]
        async fn test_fetch_query_server_error_is_err() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/search"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let client = FirecrawlClient::new("fc-test").unwrap().with_endpoint(&server.uri());
            assert!(client.fetch_query(&spec("AI news", &[])).await.is_err());
        }

        #[tokio::test]
        async fn test_fetch_query_unsuccessful_payload_is_err() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/search"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({"success": false, "data": []})),
                )
                .mount(&server)
                .await;

            let client = FirecrawlClient::new("fc-test").unwrap().with_endpoint(&server.uri());
            assert!(client.fetch_query(&spec("AI news", &[])).await.is_err());
        }
    }
}
