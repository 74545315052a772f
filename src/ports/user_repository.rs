//! User repository port (write side).
//!
//! Persists `UserProfile` entities and their credentials. Callers run
//! `UserProfile::recompute_finances` before `create` and `update`; the
//! repository stores derived values as given.
//!
//! # Example
//!
//! ```ignore
//! let (user, changed) = user.recompute_finances();
//! repo.update(&user, &changed).await?;
//! ```

use async_trait::async_trait;

use crate::domain::finance::ChangedFields;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Handle, UserProfile};

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account with its password hash.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &UserProfile, password_hash: &str) -> Result<(), DomainError>;

    /// Writes every profile column.
    ///
    /// `changed` names the derived columns that moved; implementations may
    /// use it to narrow the write or for logging.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account does not exist
    /// - `HandleTaken` if the handle is held by another account
    async fn update(&self, user: &UserProfile, changed: &ChangedFields) -> Result<(), DomainError>;

    /// Finds an account by id, including soft-deleted accounts.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Finds an account by (normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError>;

    /// Finds a live account by handle.
    async fn find_by_handle(&self, handle: &Handle) -> Result<Option<UserProfile>, DomainError>;

    /// Returns true if any account other than `except` holds `handle`.
    async fn handle_taken(&self, handle: &Handle, except: &UserId) -> Result<bool, DomainError>;

    /// Returns the stored password hash.
    async fn password_hash(&self, id: &UserId) -> Result<Option<String>, DomainError>;

    /// Replaces the stored password hash.
    async fn set_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), DomainError>;
}
