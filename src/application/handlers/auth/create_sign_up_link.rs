//! CreateSignUpLinkHandler - Operator command that issues an invitation.

use std::sync::Arc;

use super::AuthSettings;
use crate::domain::foundation::DomainError;
use crate::domain::user::{normalize_email, validate_email, SignUpLink};
use crate::ports::{LinkRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateSignUpLinkCommand {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateSignUpLinkResult {
    /// A link exists for the email (new or reused).
    Issued { link: SignUpLink, url: String },
    /// The email already belongs to an account; nothing was issued.
    AlreadyRegistered { email: String },
}

/// Issues at most one sign up link per email address.
pub struct CreateSignUpLinkHandler {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
    settings: AuthSettings,
}

impl CreateSignUpLinkHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            links,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSignUpLinkCommand,
    ) -> Result<CreateSignUpLinkResult, DomainError> {
        let email = normalize_email(&cmd.email);
        validate_email(&email)?;

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::warn!(%email, "sign up link requested for existing user");
            return Ok(CreateSignUpLinkResult::AlreadyRegistered { email });
        }

        let link = self.links.get_or_create_sign_up(SignUpLink::new(email)).await?;
        let url = link.url(&self.settings.site_url);
        tracing::info!(email = %link.email, "sign up link issued");
        Ok(CreateSignUpLinkResult::Issued { link, url })
    }
}
