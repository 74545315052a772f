//! ResetPasswordHandler - Command handler for completing a password reset.

use std::sync::Arc;

use uuid::Uuid;

use super::invalid_link;
use crate::application::handlers::user_not_found;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::user::{normalize_email, validate_password};
use crate::ports::{AccessTokenStore, LinkRepository, PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub reset_link: Uuid,
    pub email: String,
    pub password: String,
}

/// Sets a new password from an unexpired reset link.
///
/// Completing a reset proves ownership of the address, so the email is
/// marked verified. All existing sessions are revoked.
pub struct ResetPasswordHandler {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
    tokens: Arc<dyn AccessTokenStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ResetPasswordHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        tokens: Arc<dyn AccessTokenStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            links,
            tokens,
            hasher,
        }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), DomainError> {
        // 1. Link must match the email and still be valid
        let email = normalize_email(&cmd.email);
        let now = Timestamp::now();
        let link = self
            .links
            .find_reset_password(&cmd.reset_link)
            .await?
            .filter(|link| link.email.eq_ignore_ascii_case(&email))
            .filter(|link| !link.is_expired(&now))
            .ok_or_else(|| invalid_link("reset_link_uuid", "Invalid or expired reset link"))?;

        // 2. Password policy
        validate_password(&cmd.password, &email)?;

        // 3. Store the new password and verify the address
        let mut user = self
            .users
            .find_by_email(&link.email)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or_else(user_not_found)?;
        let password_hash = self.hasher.hash(&cmd.password)?;
        self.users.set_password_hash(&user.id, &password_hash).await?;
        if !user.email_verified {
            user.email_verified = true;
            user.updated_at = now;
            let (verified, changed) = user.recompute_finances();
            self.users.update(&verified, &changed).await?;
            user = verified;
        }

        // 4. Burn the links and every session
        self.links.delete_reset_password_for(&link.email).await?;
        self.tokens.revoke_all(&user.id).await?;

        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }
}
