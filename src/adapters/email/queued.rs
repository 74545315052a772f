//! Background email delivery.
//!
//! Handlers enqueue onto an unbounded channel and return immediately. A
//! single worker task prepares each message and sends it, retrying failed
//! sends with a fixed delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::{EmailError, EmailMessage, EmailSender, Mailer};

/// Maximum recipients per message, not counting the admin BCC.
pub const MAX_RECIPIENTS: usize = 49;

/// Delivery policy for [`QueuedMailer`].
#[derive(Debug, Clone)]
pub struct MailerSettings {
    /// Always BCC'd on every message.
    pub admin_email: String,
    /// When false, messages are logged and dropped.
    pub send_emails: bool,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for MailerSettings {
    fn default() -> Self {
        Self {
            admin_email: String::new(),
            send_emails: false,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Applies recipient and subject rules before a message leaves the process.
///
/// Drops blank recipients, keeps at most [`MAX_RECIPIENTS`] across
/// to, cc, and bcc in that priority, appends the admin address to bcc, and
/// flattens the subject to one line.
pub fn prepare(mut message: EmailMessage, admin_email: &str) -> EmailMessage {
    let mut left = MAX_RECIPIENTS;
    for list in [&mut message.to, &mut message.cc, &mut message.bcc] {
        list.retain(|address| !address.trim().is_empty());
        list.truncate(left);
        left -= list.len();
    }
    if !admin_email.is_empty() {
        message.bcc.push(admin_email.to_string());
    }
    message.subject = message.subject.replace(['\n', '\r'], " ");
    message
}

/// `Mailer` backed by a tokio worker task.
pub struct QueuedMailer {
    queue: mpsc::UnboundedSender<EmailMessage>,
    send_emails: bool,
}

impl QueuedMailer {
    /// Starts the worker. Must be called inside a tokio runtime.
    ///
    /// The worker exits once every `QueuedMailer` handle is dropped and the
    /// queue is drained.
    pub fn spawn(sender: Arc<dyn EmailSender>, settings: MailerSettings) -> (Self, JoinHandle<()>) {
        let (queue, rx) = mpsc::unbounded_channel();
        let mailer = Self {
            queue,
            send_emails: settings.send_emails,
        };
        let worker = tokio::spawn(run_worker(rx, sender, settings));
        (mailer, worker)
    }
}

impl Mailer for QueuedMailer {
    fn enqueue(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.send_emails {
            tracing::info!(subject = %message.subject, to = ?message.to, "email sending disabled, dropping message");
            return Ok(());
        }
        self.queue.send(message).map_err(|_| EmailError::QueueClosed)
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<EmailMessage>,
    sender: Arc<dyn EmailSender>,
    settings: MailerSettings,
) {
    while let Some(message) = rx.recv().await {
        let message = prepare(message, &settings.admin_email);
        deliver(sender.as_ref(), &message, &settings).await;
    }
    tracing::debug!("email queue closed, worker exiting");
}

async fn deliver(sender: &dyn EmailSender, message: &EmailMessage, settings: &MailerSettings) {
    let mut attempt = 0;
    loop {
        match sender.send(message).await {
            Ok(()) => {
                tracing::info!(subject = %message.subject, attempt, "email sent");
                return;
            }
            Err(error) if attempt < settings.max_retries => {
                attempt += 1;
                tracing::warn!(subject = %message.subject, attempt, %error, "email send failed, retrying");
                tokio::time::sleep(settings.retry_delay).await;
            }
            Err(error) => {
                tracing::error!(subject = %message.subject, %error, "email send failed, giving up");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::RecordingEmailSender;

    fn addresses(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}@example.com", prefix, i)).collect()
    }

    #[test]
    fn prepare_caps_recipients_in_priority_order() {
        let message = EmailMessage {
            to: addresses("to", 40),
            cc: addresses("cc", 20),
            bcc: addresses("bcc", 5),
            subject: "Hi".to_string(),
            ..EmailMessage::default()
        };

        let prepared = prepare(message, "admin@example.com");

        assert_eq!(prepared.to.len(), 40);
        assert_eq!(prepared.cc.len(), 9);
        assert_eq!(prepared.bcc, vec!["admin@example.com".to_string()]);
    }

    #[test]
    fn prepare_drops_blank_recipients_and_flattens_subject() {
        let message = EmailMessage {
            to: vec!["".to_string(), "a@example.com".to_string(), "  ".to_string()],
            subject: "Line one\nLine two\r".to_string(),
            ..EmailMessage::default()
        };

        let prepared = prepare(message, "admin@example.com");

        assert_eq!(prepared.to, vec!["a@example.com".to_string()]);
        assert_eq!(prepared.subject, "Line one Line two ");
    }

    fn settings(send_emails: bool) -> MailerSettings {
        MailerSettings {
            admin_email: "admin@example.com".to_string(),
            send_emails,
            max_retries: 3,
            retry_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn worker_retries_until_success() {
        let sender = Arc::new(RecordingEmailSender::failing_times(2));
        let (mailer, worker) = QueuedMailer::spawn(sender.clone(), settings(true));

        mailer.enqueue(EmailMessage::text("a@example.com", "Hi", "Body")).unwrap();
        drop(mailer);
        worker.await.unwrap();

        assert_eq!(sender.attempts(), 3);
        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bcc, vec!["admin@example.com".to_string()]);
    }

    #[tokio::test]
    async fn worker_gives_up_after_max_retries() {
        let sender = Arc::new(RecordingEmailSender::failing_times(10));
        let (mailer, worker) = QueuedMailer::spawn(sender.clone(), settings(true));

        mailer.enqueue(EmailMessage::text("a@example.com", "Hi", "Body")).unwrap();
        drop(mailer);
        worker.await.unwrap();

        assert_eq!(sender.attempts(), 4);
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn disabled_mailer_drops_messages() {
        let sender = Arc::new(RecordingEmailSender::new());
        let (mailer, worker) = QueuedMailer::spawn(sender.clone(), settings(false));

        mailer.enqueue(EmailMessage::text("a@example.com", "Hi", "Body")).unwrap();
        drop(mailer);
        worker.await.unwrap();

        assert_eq!(sender.attempts(), 0);
    }
}
