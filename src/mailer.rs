//! SMTP delivery for the digest email.
//!
//! Wraps lettre's async STARTTLS transport. Authentication uses an
//! app-password credential pair (the Gmail pattern); connection details come
//! from the CLI. Send failures propagate to the caller — retry policy, if
//! any, belongs to the scheduler that re-invokes the whole run.

use chrono::Local;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::error::Error;
use tracing::{info, instrument};

/// An authenticated SMTP channel to a single recipient.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl Mailer {
    /// Build a STARTTLS transport against `server:port` with app-password auth.
    pub fn new(
        server: &str,
        port: u16,
        sender_email: &str,
        sender_password: &str,
        recipient_email: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let sender: Mailbox = sender_email.parse()?;
        let recipient: Mailbox = recipient_email.parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)?
            .port(port)
            .credentials(Credentials::new(
                sender_email.to_string(),
                sender_password.to_string(),
            ))
            .build();

        Ok(Self { transport, sender, recipient })
    }

    /// Send a multipart/alternative digest email (plain text + HTML).
    #[instrument(level = "info", skip_all, fields(subject = %subject))]
    pub async fn send_digest(
        &self,
        subject: &str,
        html_body: &str,
        plain_body: &str,
    ) -> Result<(), Box<dyn Error>> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                plain_body.to_string(),
                html_body.to_string(),
            ))?;

        self.transport.send(message).await?;
        info!(recipient = %self.recipient, "Email sent");
        Ok(())
    }

    /// Send a configuration-check message.
    pub async fn send_test_email(&self) -> Result<(), Box<dyn Error>> {
        let html = format!(
            "<html><body><h2>Test Email Successful!</h2>\
             <p>The AI news digest is configured correctly and ready to send.</p>\
             <p>Sender: {} — Recipient: {}</p></body></html>",
            self.sender, self.recipient
        );
        let plain = format!(
            "Test email successful. Sender: {} Recipient: {}",
            self.sender, self.recipient
        );
        self.send_digest("AI News Digest - Test Email", &html, &plain).await
    }

    /// Best-effort failure notice sent when a run aborts.
    pub async fn send_error_notice(&self, reason: &str) -> Result<(), Box<dyn Error>> {
        let now = Local::now();
        let subject = format!("❌ AI News Digest Error - {}", now.format("%B %d, %Y"));
        let html = format!(
            "<html><body><h2>AI News Digest Error</h2>\
             <p><strong>Error:</strong> {}</p>\
             <p><strong>Time:</strong> {}</p>\
             <p>Check the logs for details.</p></body></html>",
            crate::outputs::html::escape_html(reason),
            now.format("%Y-%m-%d %H:%M:%S")
        );
        let plain = format!("AI News Digest error: {reason}");
        self.send_digest(&subject, &html, &plain).await
    }
}
