//! `SessionValidator` over opaque bearer tokens.
//!
//! The presented token is digested and looked up in the token store, then
//! the owning account is loaded so deleted users lose access immediately.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::token_digest;
use crate::ports::{AccessTokenStore, SessionValidator, UserRepository};

/// Resolves bearer tokens through the token store and the user table.
pub struct TokenSessionValidator {
    tokens: Arc<dyn AccessTokenStore>,
    users: Arc<dyn UserRepository>,
}

impl TokenSessionValidator {
    pub fn new(tokens: Arc<dyn AccessTokenStore>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl SessionValidator for TokenSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let user_id = self
            .tokens
            .find_user(&token_digest(token))
            .await
            .map_err(|e| AuthError::service_unavailable(e.message))?
            .ok_or(AuthError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::service_unavailable(e.message))?
            .filter(|user| !user.is_deleted())
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthenticatedUser::new(
            user.id,
            user.email,
            user.is_admin,
            user.email_verified,
        ))
    }
}
