//! Bearer token storage port.
//!
//! Tokens are opaque random strings handed to clients once; only their
//! SHA-256 digest is stored.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Persists token digests against accounts.
#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    /// Records a new token digest for `user_id`.
    async fn insert(&self, token_hash: &str, user_id: &UserId) -> Result<(), DomainError>;

    /// Resolves a digest to its account.
    async fn find_user(&self, token_hash: &str) -> Result<Option<UserId>, DomainError>;

    /// Revokes one token. Unknown digests are ignored.
    async fn revoke(&self, token_hash: &str) -> Result<(), DomainError>;

    /// Revokes every token of `user_id`.
    async fn revoke_all(&self, user_id: &UserId) -> Result<(), DomainError>;
}
