//! Emailed links and access tokens.

use async_trait::async_trait;
use uuid::Uuid;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{ResetPasswordLink, SignUpLink, VerifyEmailLink};
use crate::ports::{AccessTokenStore, LinkRepository};

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn get_or_create_sign_up(&self, candidate: SignUpLink) -> Result<SignUpLink, DomainError> {
        let mut tables = self.write();
        if let Some(existing) = tables
            .sign_up_links
            .iter()
            .find(|link| link.email == candidate.email)
        {
            return Ok(existing.clone());
        }
        tables.sign_up_links.push(candidate.clone());
        Ok(candidate)
    }

    async fn find_sign_up(&self, id: &Uuid) -> Result<Option<SignUpLink>, DomainError> {
        Ok(self
            .read()
            .sign_up_links
            .iter()
            .find(|link| link.id == *id)
            .cloned())
    }

    async fn delete_sign_up_for(&self, email: &str) -> Result<(), DomainError> {
        self.write().sign_up_links.retain(|link| link.email != email);
        Ok(())
    }

    async fn save_verify_email(&self, link: &VerifyEmailLink) -> Result<(), DomainError> {
        self.write().verify_email_links.push(link.clone());
        Ok(())
    }

    async fn find_verify_email(&self, id: &Uuid) -> Result<Option<VerifyEmailLink>, DomainError> {
        Ok(self
            .read()
            .verify_email_links
            .iter()
            .find(|link| link.id == *id)
            .cloned())
    }

    async fn delete_verify_email_for(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.write()
            .verify_email_links
            .retain(|link| link.user_id != *user_id);
        Ok(())
    }

    async fn save_reset_password(&self, link: &ResetPasswordLink) -> Result<(), DomainError> {
        self.write().reset_password_links.push(link.clone());
        Ok(())
    }

    async fn find_reset_password(&self, id: &Uuid) -> Result<Option<ResetPasswordLink>, DomainError> {
        Ok(self
            .read()
            .reset_password_links
            .iter()
            .find(|link| link.id == *id)
            .cloned())
    }

    async fn delete_reset_password_for(&self, email: &str) -> Result<(), DomainError> {
        self.write()
            .reset_password_links
            .retain(|link| link.email != email);
        Ok(())
    }
}

#[async_trait]
impl AccessTokenStore for InMemoryStore {
    async fn insert(&self, token_hash: &str, user_id: &UserId) -> Result<(), DomainError> {
        self.write()
            .access_tokens
            .insert(token_hash.to_string(), *user_id);
        Ok(())
    }

    async fn find_user(&self, token_hash: &str) -> Result<Option<UserId>, DomainError> {
        Ok(self.read().access_tokens.get(token_hash).copied())
    }

    async fn revoke(&self, token_hash: &str) -> Result<(), DomainError> {
        self.write().access_tokens.remove(token_hash);
        Ok(())
    }

    async fn revoke_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.write()
            .access_tokens
            .retain(|_, owner| owner != user_id);
        Ok(())
    }
}
