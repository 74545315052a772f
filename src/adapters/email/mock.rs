//! Recording email adapters for tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::ports::{EmailError, EmailMessage, EmailSender, Mailer};

#[derive(Debug, Default)]
struct Outbox {
    sent: Vec<EmailMessage>,
    attempts: u32,
    failures_left: u32,
}

/// `EmailSender` that records delivered messages, optionally failing first.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    outbox: Mutex<Outbox>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `failures` sends.
    pub fn failing_times(failures: u32) -> Self {
        let sender = Self::default();
        sender.lock().failures_left = failures;
        sender
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.lock().sent.clone()
    }

    /// Number of send calls, successful or not.
    pub fn attempts(&self) -> u32 {
        self.lock().attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Outbox> {
        self.outbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let mut outbox = self.lock();
        outbox.attempts += 1;
        if outbox.failures_left > 0 {
            outbox.failures_left -= 1;
            return Err(EmailError::Network("connection reset".to_string()));
        }
        outbox.sent.push(message.clone());
        Ok(())
    }
}

/// `Mailer` that keeps enqueued messages in memory.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    queued: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<EmailMessage> {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Mailer for RecordingMailer {
    fn enqueue(&self, message: EmailMessage) -> Result<(), EmailError> {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
        Ok(())
    }
}
