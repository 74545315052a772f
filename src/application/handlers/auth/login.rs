//! LoginHandler - Command handler exchanging credentials for a bearer token.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{normalize_email, AccessToken};
use crate::ports::{AccessTokenStore, PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: AccessToken,
    pub user_id: UserId,
}

/// Issues a new token per successful login.
///
/// Every failure produces the same message so callers cannot tell which
/// emails have accounts.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn AccessTokenStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn AccessTokenStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        let email = normalize_email(&cmd.email);
        let Some(user) = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|user| !user.is_deleted())
        else {
            tracing::info!("login failed: unknown account");
            return Err(bad_credentials());
        };

        let hash = self.users.password_hash(&user.id).await?.unwrap_or_default();
        if hash.is_empty() || !self.hasher.verify(&cmd.password, &hash) {
            tracing::info!(user_id = %user.id, "login failed: wrong password");
            return Err(bad_credentials());
        }

        let token = AccessToken::generate();
        self.tokens.insert(&token.digest(), &user.id).await?;
        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(LoginResult {
            token,
            user_id: user.id,
        })
    }
}

fn bad_credentials() -> DomainError {
    DomainError::validation("non_field_errors", "Unable to log in with provided credentials.")
}
