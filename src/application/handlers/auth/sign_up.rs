//! SignUpHandler - Command handler for redeeming a sign up link.

use std::sync::Arc;

use uuid::Uuid;

use super::{invalid_link, AuthSettings};
use crate::application::handlers::notify;
use crate::domain::foundation::DomainError;
use crate::domain::user::{normalize_email, validate_password, UserProfile, VerifyEmailLink};
use crate::ports::{EmailMessage, LinkRepository, Mailer, PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub sign_up_link: Uuid,
    pub email: String,
    pub password: String,
}

/// Creates an unverified account for an invited email.
pub struct SignUpHandler {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
    settings: AuthSettings,
}

impl SignUpHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            links,
            hasher,
            mailer,
            settings,
        }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<UserProfile, DomainError> {
        // 1. The link must exist and match the email
        let link = self
            .links
            .find_sign_up(&cmd.sign_up_link)
            .await?
            .ok_or_else(|| invalid_link("sign_up_link_uuid", "Invalid sign up link"))?;
        let email = normalize_email(&cmd.email);
        if !email.eq_ignore_ascii_case(&link.email) {
            return Err(DomainError::validation(
                "email",
                "Email does not match the sign up link",
            ));
        }

        // 2. Password policy
        validate_password(&cmd.password, &email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::validation(
                "email",
                "A user with that email already exists.",
            ));
        }

        // 3. Create the account
        let (user, _) = UserProfile::register(email).recompute_finances();
        let password_hash = self.hasher.hash(&cmd.password)?;
        self.users.create(&user, &password_hash).await?;
        self.links.delete_sign_up_for(&link.email).await?;

        // 4. Ask the new member to confirm their address
        let verify = VerifyEmailLink::new(user.id);
        self.links.save_verify_email(&verify).await?;
        notify(
            self.mailer.as_ref(),
            EmailMessage::text(
                &user.email,
                "Verify your email for Advisor Place",
                format!(
                    "Welcome to Advisor Place!\n\nConfirm your email address here:\n{}\n",
                    verify.url(&self.settings.site_url)
                ),
            ),
        );

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }
}
