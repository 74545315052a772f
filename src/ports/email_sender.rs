//! Outbound email ports.
//!
//! `EmailSender` delivers one message synchronously (one provider call).
//! `Mailer` is what handlers use: it accepts a message and returns at once,
//! delivery happens on a background worker.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A message ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub html: bool,
    pub reply_to: Option<String>,
}

impl EmailMessage {
    /// Plain-text message to a single recipient.
    pub fn text(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            to: vec![to.into()],
            ..Self::default()
        }
    }
}

/// Email delivery errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmailError {
    /// The provider rejected the message.
    #[error("email rejected: {0}")]
    Rejected(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// The background queue is gone.
    #[error("email queue closed")]
    QueueClosed,
}

impl From<EmailError> for DomainError {
    fn from(err: EmailError) -> Self {
        DomainError::new(ErrorCode::EmailDeliveryError, err.to_string())
    }
}

/// Delivers one message through an email provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

/// Accepts messages for asynchronous delivery.
pub trait Mailer: Send + Sync {
    /// Enqueues a message. Never waits on the provider.
    fn enqueue(&self, message: EmailMessage) -> Result<(), EmailError>;
}
