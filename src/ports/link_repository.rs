//! Storage for emailed single-use links.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{ResetPasswordLink, SignUpLink, VerifyEmailLink};

/// Repository port for sign up, verification, and reset links.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns the existing sign up link for `email` or stores `candidate`.
    async fn get_or_create_sign_up(&self, candidate: SignUpLink) -> Result<SignUpLink, DomainError>;

    async fn find_sign_up(&self, id: &Uuid) -> Result<Option<SignUpLink>, DomainError>;

    /// Deletes every sign up link for `email`.
    async fn delete_sign_up_for(&self, email: &str) -> Result<(), DomainError>;

    async fn save_verify_email(&self, link: &VerifyEmailLink) -> Result<(), DomainError>;

    async fn find_verify_email(&self, id: &Uuid) -> Result<Option<VerifyEmailLink>, DomainError>;

    /// Deletes every verification link for `user_id`.
    async fn delete_verify_email_for(&self, user_id: &UserId) -> Result<(), DomainError>;

    async fn save_reset_password(&self, link: &ResetPasswordLink) -> Result<(), DomainError>;

    async fn find_reset_password(&self, id: &Uuid) -> Result<Option<ResetPasswordLink>, DomainError>;

    /// Deletes every reset link for `email`.
    async fn delete_reset_password_for(&self, email: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn LinkRepository) {}
    }
}
