//! VerifyEmailHandler - Command handler for confirming an email address.

use std::sync::Arc;

use uuid::Uuid;

use super::invalid_link;
use crate::application::handlers::user_not_found;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Timestamp};
use crate::ports::{LinkRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
    pub actor: AuthenticatedUser,
    pub verify_link: Uuid,
}

/// Marks the caller's email verified. The link must have been issued to the
/// caller; any other link is reported as invalid.
pub struct VerifyEmailHandler {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
}

impl VerifyEmailHandler {
    pub fn new(users: Arc<dyn UserRepository>, links: Arc<dyn LinkRepository>) -> Self {
        Self { users, links }
    }

    pub async fn handle(&self, cmd: VerifyEmailCommand) -> Result<(), DomainError> {
        let link = self
            .links
            .find_verify_email(&cmd.verify_link)
            .await?
            .filter(|link| link.belongs_to(&cmd.actor.id))
            .ok_or_else(|| invalid_link("verify_link_uuid", "Invalid verification link"))?;

        let mut user = self
            .users
            .find_by_id(&link.user_id)
            .await?
            .ok_or_else(user_not_found)?;
        user.email_verified = true;
        user.updated_at = Timestamp::now();
        let (user, changed) = user.recompute_finances();
        self.users.update(&user, &changed).await?;
        self.links.delete_verify_email_for(&user.id).await?;

        tracing::info!(user_id = %user.id, "email verified");
        Ok(())
    }
}
