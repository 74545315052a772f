//! RequestPasswordResetHandler - Command handler for emailing a reset link.

use std::sync::Arc;

use super::AuthSettings;
use crate::application::handlers::notify;
use crate::domain::foundation::DomainError;
use crate::domain::user::{normalize_email, ResetPasswordLink};
use crate::ports::{EmailMessage, LinkRepository, Mailer, UserRepository};

#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
    pub email: String,
}

/// Emails a reset link when the address has an account.
///
/// Succeeds either way so the endpoint does not reveal which addresses are
/// registered.
pub struct RequestPasswordResetHandler {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
    mailer: Arc<dyn Mailer>,
    settings: AuthSettings,
}

impl RequestPasswordResetHandler {
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

    pub async fn handle(&self, cmd: RequestPasswordResetCommand) -> Result<(), DomainError> {
        let email = normalize_email(&cmd.email);
        let Some(user) = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|user| !user.is_deleted())
        else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        let link = ResetPasswordLink::new(&user.email, self.settings.reset_link_ttl_hours);
        self.links.save_reset_password(&link).await?;
        notify(
            self.mailer.as_ref(),
            EmailMessage::text(
                &user.email,
                "Reset your Advisor Place password",
                format!(
                    "Someone asked to reset the password for this account.\n\n\
                     Choose a new password here (valid for {} hours):\n{}\n\n\
                     If this was not you, ignore this email.\n",
                    self.settings.reset_link_ttl_hours,
                    link.url(&self.settings.site_url)
                ),
            ),
        );
        tracing::info!(user_id = %user.id, "password reset link issued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::RecordingMailer;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{member, store};

    fn handler(store: &Arc<InMemoryStore>, mailer: &Arc<RecordingMailer>) -> RequestPasswordResetHandler {
        RequestPasswordResetHandler::new(
            store.clone(),
            store.clone(),
            mailer.clone(),
            AuthSettings::default(),
        )
    }

    #[tokio::test]
    async fn emails_a_link_for_known_address() {
        let store = store();
        member(&store, Some("alice"));
        let mailer = Arc::new(RecordingMailer::new());

        handler(&store, &mailer)
            .handle(RequestPasswordResetCommand {
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();

        let sent = mailer.messages();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("/reset-password/"));
    }

    #[tokio::test]
    async fn unknown_address_succeeds_silently() {
        let store = store();
        let mailer = Arc::new(RecordingMailer::new());

        handler(&store, &mailer)
            .handle(RequestPasswordResetCommand {
                email: "ghost@example.com".to_string(),
            })
            .await
            .unwrap();

        assert!(mailer.messages().is_empty());
    }
}
