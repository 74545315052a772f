//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is produced by the `SessionValidator` port after a
//! bearer token has been resolved to a live account. Handlers receive it
//! from request extensions and never see the raw token.

use super::UserId;
use thiserror::Error;

/// Account resolved from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account identifier.
    pub id: UserId,

    /// Login email of the account.
    pub email: String,

    /// Whether the account may act on other users.
    pub is_admin: bool,

    /// Whether the email address has been confirmed.
    pub email_verified: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, is_admin: bool, email_verified: bool) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin,
            email_verified,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or unknown.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token is known but the account has been removed.
    #[error("User not found")]
    UserNotFound,

    /// The token store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::UserNotFound)
    }
}
