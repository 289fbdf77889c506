//! # AI News Digest
//!
//! A small automation pipeline that searches the web for recent AI news,
//! scores and deduplicates the results, and emails a ranked digest to a
//! configured recipient.
//!
//! ## Usage
//!
//! ```sh
//! FIRECRAWL_API_KEY=... SENDER_EMAIL=... SENDER_PASSWORD=... RECIPIENT_EMAIL=... \
//!     ai_news_digest
//! ```
//!
//! ## Architecture
//!
//! Each run is one stateless pass through a linear pipeline:
//! 1. **Catalog**: load the query catalog (built-in or `--config` YAML)
//! 2. **Fetch**: one search call per query (4 in flight, merged in catalog order)
//! 3. **Score**: keyword-weighted AI-relevance score per article
//! 4. **Rank**: threshold-filter, deduplicate, sort, truncate into the digest
//! 5. **Deliver**: render HTML + plain text and send via SMTP
//!
//! A failed query is logged and contributes nothing; the run only fails when
//! every query fails or the email cannot be sent.

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod digest;
mod mailer;
mod models;
mod outputs;
mod scoring;
mod search;
mod utils;

use cli::Cli;
use config::{DigestConfig, QuerySpec};
use digest::{build_digest, QueryResults};
use mailer::Mailer;
use scoring::RelevanceScorer;
use search::FirecrawlClient;

/// How many search queries are in flight at once. `buffered` keeps the
/// output in catalog order regardless of completion order.
const PARALLEL_QUERIES: usize = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // Pick up credentials from a .env file when present
    dotenvy::dotenv().ok();

    let start_time = std::time::Instant::now();
    info!("ai_news_digest starting up");

    let args = Cli::parse();
    debug!(smtp_server = %args.smtp_server, smtp_port = args.smtp_port, config = ?args.config, "Parsed CLI arguments");

    let mailer = Mailer::new(
        &args.smtp_server,
        args.smtp_port,
        &args.sender_email,
        &args.sender_password,
        &args.recipient_email,
    )?;

    if args.test_email {
        info!("Sending configuration-check email");
        mailer.send_test_email().await?;
        info!("Test email sent");
        return Ok(());
    }

    match run(&args, &mailer).await {
        Ok(count) => {
            let elapsed = start_time.elapsed();
            info!(
                count,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Execution complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            // Best-effort failure notice; its own failure is only logged.
            if let Err(notice_err) = mailer.send_error_notice(&e.to_string()).await {
                warn!(error = %notice_err, "Failed to send error notification email");
            }
            Err(e)
        }
    }
}

/// Execute one full digest run. Returns the number of articles delivered.
async fn run(args: &Cli, mailer: &Mailer) -> Result<usize, Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => DigestConfig::load(path)?,
        None => {
            info!("Using built-in query catalog");
            DigestConfig::default()
        }
    };

    let client = FirecrawlClient::new(&args.firecrawl_api_key)?;
    let scorer = RelevanceScorer::default();

    // ---- Fetch and score, per query ----
    let total_queries = config.search_queries.len();
    let batches: Vec<Option<QueryResults>> = stream::iter(config.search_queries.iter())
        .map(|spec| fetch_and_score(&client, &scorer, spec))
        .buffered(PARALLEL_QUERIES)
        .collect()
        .await;

    let failed_queries = batches.iter().filter(|b| b.is_none()).count();
    if total_queries > 0 && failed_queries == total_queries {
        return Err("all search queries failed".into());
    }
    if failed_queries > 0 {
        warn!(failed = failed_queries, total = total_queries, "Some queries failed; continuing with the rest");
    }

    // ---- Rank ----
    let digest = build_digest(batches.into_iter().flatten().collect(), config.max_articles);
    info!("Found {} AI-relevant articles", digest.len());

    for (i, scored) in digest.articles.iter().take(5).enumerate() {
        info!(
            rank = i + 1,
            title = %scored.article.title,
            score = scored.relevance_score,
            source = %scored.article.source_site,
            "Digest entry"
        );
    }

    if digest.is_empty() {
        info!("No qualifying articles today; skipping email send");
        return Ok(0);
    }

    // ---- Render and deliver ----
    let formatted = outputs::render(&digest, chrono::Local::now().date_naive());
    info!(subject = %formatted.subject, "Sending email digest");
    mailer
        .send_digest(&formatted.subject, &formatted.html_body, &formatted.plain_body)
        .await?;

    Ok(digest.len())
}

/// Fetch one query and score its candidates.
///
/// Returns `None` on provider failure — the query contributes nothing and
/// the run continues.
async fn fetch_and_score(
    client: &FirecrawlClient,
    scorer: &RelevanceScorer,
    spec: &QuerySpec,
) -> Option<QueryResults> {
    match client.fetch_query(spec).await {
        Ok(candidates) => {
            info!(query = %spec.query, count = candidates.len(), "Query fetched");
            Some(QueryResults {
                min_ai_relevance: spec.min_ai_relevance,
                articles: candidates
                    .into_iter()
                    .map(|c| scorer.score_candidate(c))
                    .collect(),
            })
        }
        Err(e) => {
            error!(query = %spec.query, error = %e, "Search failed; query contributes no articles");
            None
        }
    }
}
