//! Mock authentication adapters for testing.
//!
//! `MockSessionValidator` maps fixed tokens to users without touching a
//! token store. `FakePasswordHasher` is a reversible stand-in for Argon2 so
//! tests do not pay for key stretching.
//!
//! # Example
//!
//! ```ignore
//! use advisor_place::adapters::auth::MockSessionValidator;
//! use advisor_place::domain::foundation::{AuthenticatedUser, UserId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", AuthenticatedUser::new(
//!         UserId::new(),
//!         "test@example.com",
//!         false,
//!         true,
//!     ));
//!
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError};
use crate::ports::{PasswordHasher, SessionValidator};

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Reversible password "hash" for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakePasswordHasher;

impl FakePasswordHasher {
    const PREFIX: &'static str = "fake$";
}

impl PasswordHasher for FakePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}", Self::PREFIX, password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix(Self::PREFIX) == Some(password)
    }
}
