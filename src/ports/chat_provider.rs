//! Chat provider port.
//!
//! Chat accounts live on an external service and are created lazily, the
//! first time somebody wants to talk to a member. The local `ChatUser` row
//! mirrors the provider id, username, and secret.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{ChatEngineId, DomainError, ErrorCode, UserId};
use crate::domain::user::ChatUser;

/// Account as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderChatUser {
    pub id: ChatEngineId,
    pub username: String,
}

/// Chat provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChatError {
    /// The provider has no such object.
    #[error("Object not found")]
    NotFound,

    /// The provider failed without explanation.
    #[error("Unknown error")]
    Unknown,

    /// The provider rejected the request with a message.
    #[error("{0}")]
    Rejected(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ChatError {
    /// Creates a rejection carrying the provider's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChatError::Network(_) | ChatError::Unknown)
    }
}

impl From<ChatError> for DomainError {
    fn from(err: ChatError) -> Self {
        DomainError::new(ErrorCode::ChatProviderError, err.to_string())
    }
}

/// Remote chat account management.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Creates an account and returns the provider's view of it.
    async fn create_user(&self, username: &str, secret: &str) -> Result<ProviderChatUser, ChatError>;

    /// Fetches an account.
    async fn get_user(&self, id: ChatEngineId) -> Result<ProviderChatUser, ChatError>;

    /// Renames an account.
    async fn update_username(
        &self,
        id: ChatEngineId,
        username: &str,
    ) -> Result<ProviderChatUser, ChatError>;

    /// Deletes an account.
    async fn delete_user(&self, id: ChatEngineId) -> Result<(), ChatError>;
}

/// Local mirror of provider accounts, one per user.
#[async_trait]
pub trait ChatUserRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ChatUser>, DomainError>;

    /// Stores a new chat account.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the user already has one
    async fn insert(&self, chat_user: &ChatUser) -> Result<(), DomainError>;

    /// Writes username and terms agreement.
    async fn update(&self, chat_user: &ChatUser) -> Result<(), DomainError>;

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;
}
