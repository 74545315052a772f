//! ResendVerificationHandler - Command handler for a fresh verification link.

use std::sync::Arc;

use super::AuthSettings;
use crate::application::handlers::{notify, user_not_found};
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::user::VerifyEmailLink;
use crate::ports::{EmailMessage, LinkRepository, Mailer, UserRepository};

#[derive(Debug, Clone)]
pub struct ResendVerificationCommand {
    pub actor: AuthenticatedUser,
}

/// Replaces any outstanding verification links with a new one and emails it.
pub struct ResendVerificationHandler {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
    mailer: Arc<dyn Mailer>,
    settings: AuthSettings,
}

impl ResendVerificationHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        mailer: Arc<dyn Mailer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            links,
            mailer,
            settings,
        }
    }

    pub async fn handle(&self, cmd: ResendVerificationCommand) -> Result<VerifyEmailLink, DomainError> {
        let user = self
            .users
            .find_by_id(&cmd.actor.id)
            .await?
            .ok_or_else(user_not_found)?;

        self.links.delete_verify_email_for(&user.id).await?;
        let link = VerifyEmailLink::new(user.id);
        self.links.save_verify_email(&link).await?;

        notify(
            self.mailer.as_ref(),
            EmailMessage::text(
                &user.email,
                "Verify your email for Advisor Place",
                format!(
                    "Confirm your email address here:\n{}\n",
                    link.url(&self.settings.site_url)
                ),
            ),
        );
        tracing::info!(user_id = %user.id, "verification link resent");
        Ok(link)
    }
}
