//! Command-line interface definitions.
//!
//! All options can be provided as flags or environment variables; the
//! credentials in particular are expected to come from the environment
//! (or a `.env` file loaded at startup).

use clap::Parser;

/// Command-line arguments for the AI news digest.
///
/// # Examples
///
/// ```sh
/// # Normal run (credentials in the environment)
/// ai_news_digest
///
/// # Custom catalog and a one-off configuration check
/// ai_news_digest --config queries.yaml
/// ai_news_digest --test-email
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML query-catalog file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Firecrawl Search API key
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    pub firecrawl_api_key: String,

    /// Address the digest is sent from
    #[arg(long, env = "SENDER_EMAIL")]
    pub sender_email: String,

    /// App password for the sender account
    #[arg(long, env = "SENDER_PASSWORD", hide_env_values = true)]
    pub sender_password: String,

    /// Address the digest is sent to
    #[arg(long, env = "RECIPIENT_EMAIL")]
    pub recipient_email: String,

    /// SMTP server hostname
    #[arg(long, env = "SMTP_SERVER", default_value = "smtp.gmail.com")]
    pub smtp_server: String,

    /// SMTP server port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// Send a configuration-check email and exit
    #[arg(long)]
    pub test_email: bool,
}
