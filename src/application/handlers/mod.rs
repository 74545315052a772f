//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod chat;
pub mod directory;
pub mod moderation;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::*;
pub use chat::*;
pub use directory::*;
pub use moderation::*;
pub use user::*;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error for a target account that does not exist or was soft-deleted.
pub(crate) fn user_not_found() -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found")
}

/// Queues a notification. Delivery problems are logged, never surfaced to
/// the caller whose request already succeeded.
pub(crate) fn notify(mailer: &dyn crate::ports::Mailer, message: crate::ports::EmailMessage) {
    let subject = message.subject.clone();
    if let Err(error) = mailer.enqueue(message) {
        tracing::error!(%error, %subject, "failed to queue email");
    }
}
