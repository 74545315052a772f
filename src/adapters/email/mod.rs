//! Outbound email adapters.
//!
//! - `resend` - Resend HTTP API sender
//! - `queued` - Background `Mailer` with recipient rules and retries
//! - `mock` - Recording sender and mailer for tests

mod mock;
mod queued;
mod resend;

pub use mock::{RecordingEmailSender, RecordingMailer};
pub use queued::{prepare, MailerSettings, QueuedMailer, MAX_RECIPIENTS};
pub use resend::{ResendConfig, ResendEmailSender};
