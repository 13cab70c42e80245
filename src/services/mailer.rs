//! Outbound mail: the `Mailer` seam and its SMTP implementation.
//!
//! DESIGN
//! ======
//! The relay only ever sends one plain-text message per request, so `Email`
//! carries exactly that: a sender display name, one recipient, a subject and
//! a text body. The sender address is the authenticated SMTP account and is
//! owned by the mailer, not the message.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpSettings;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP credentials are not configured")]
    MissingCredentials,
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// A single plain-text notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Async email sending seam between relay logic and the provider.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// SMTP mailer over an implicit-TLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Address,
}

impl SmtpMailer {
    /// Build the transport from startup settings.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::MissingCredentials`] when either `SMTP_USER` or
    /// `SMTP_PASS` is absent, [`MailError::InvalidAddress`] when the user is
    /// not an address, and [`MailError::Smtp`] when the relay host is rejected.
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, MailError> {
        let (user, pass) = settings.credentials().ok_or(MailError::MissingCredentials)?;
        let from = parse_address(user)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .port(settings.port)
            .timeout(Some(Duration::from_secs(settings.timeout_secs)))
            .credentials(Credentials::new(user.to_owned(), pass.to_owned()))
            .build();

        Ok(Self { transport: Arc::new(transport), from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = build_message(&self.from, email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;
        Ok(())
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|_| MailError::InvalidAddress(raw.to_owned()))
}

/// Build a lettre message with `from` as the envelope sender.
pub(crate) fn build_message(from: &Address, email: &Email) -> Result<Message, MailError> {
    let sender = Mailbox::new(Some(email.from_name.clone()), from.clone());
    let recipient = Mailbox::new(None, parse_address(&email.to)?);

    Message::builder()
        .from(sender)
        .to(recipient)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.text.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[cfg(test)]
#[path = "mailer_test.rs"]
mod tests;
