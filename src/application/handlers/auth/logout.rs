//! LogoutHandler - Command handler revoking the presented token.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::user::token_digest;
use crate::ports::AccessTokenStore;

#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub actor: AuthenticatedUser,
    pub token: String,
}

pub struct LogoutHandler {
    tokens: Arc<dyn AccessTokenStore>,
}

impl LogoutHandler {
    pub fn new(tokens: Arc<dyn AccessTokenStore>) -> Self {
        Self { tokens }
    }

    /// Other sessions of the same user stay valid.
    pub async fn handle(&self, cmd: LogoutCommand) -> Result<(), DomainError> {
        self.tokens.revoke(&token_digest(cmd.token.trim())).await?;
        tracing::info!(user_id = %cmd.actor.id, "logged out");
        Ok(())
    }
}
