//! PostgreSQL implementations of LinkRepository and AccessTokenStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::db_error;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{ResetPasswordLink, SignUpLink, VerifyEmailLink};
use crate::ports::{AccessTokenStore, LinkRepository};

pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SignUpRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<SignUpRow> for SignUpLink {
    fn from(row: SignUpRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VerifyEmailRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ResetPasswordRow {
    id: Uuid,
    email: String,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl LinkRepository for PostgresLinkRepository {
    async fn get_or_create_sign_up(&self, candidate: SignUpLink) -> Result<SignUpLink, DomainError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row: SignUpRow = sqlx::query_as(
            r#"
            INSERT INTO sign_up_links (id, email, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, email, created_at
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.email)
        .bind(candidate.created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to save sign up link"))?;
        Ok(row.into())
    }

    async fn find_sign_up(&self, id: &Uuid) -> Result<Option<SignUpLink>, DomainError> {
        let row: Option<SignUpRow> =
            sqlx::query_as("SELECT id, email, created_at FROM sign_up_links WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to fetch sign up link"))?;
        Ok(row.map(Into::into))
    }

    async fn delete_sign_up_for(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sign_up_links WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete sign up link"))?;
        Ok(())
    }

    async fn save_verify_email(&self, link: &VerifyEmailLink) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO verify_email_links (id, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(link.id)
            .bind(link.user_id.as_uuid())
            .bind(link.created_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save verification link"))?;
        Ok(())
    }

    async fn find_verify_email(&self, id: &Uuid) -> Result<Option<VerifyEmailLink>, DomainError> {
        let row: Option<VerifyEmailRow> =
            sqlx::query_as("SELECT id, user_id, created_at FROM verify_email_links WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to fetch verification link"))?;
        Ok(row.map(|row| VerifyEmailLink {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            created_at: Timestamp::from_datetime(row.created_at),
        }))
    }

    async fn delete_verify_email_for(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM verify_email_links WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete verification links"))?;
        Ok(())
    }

    async fn save_reset_password(&self, link: &ResetPasswordLink) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO reset_password_links (id, email, expires_at) VALUES ($1, $2, $3)")
            .bind(link.id)
            .bind(&link.email)
            .bind(link.expires_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save reset link"))?;
        Ok(())
    }

    async fn find_reset_password(&self, id: &Uuid) -> Result<Option<ResetPasswordLink>, DomainError> {
        let row: Option<ResetPasswordRow> =
            sqlx::query_as("SELECT id, email, expires_at FROM reset_password_links WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to fetch reset link"))?;
        Ok(row.map(|row| ResetPasswordLink {
            id: row.id,
            email: row.email,
            expires_at: Timestamp::from_datetime(row.expires_at),
        }))
    }

    async fn delete_reset_password_for(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM reset_password_links WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete reset links"))?;
        Ok(())
    }
}

/// PostgreSQL implementation of the AccessTokenStore port.
pub struct PostgresAccessTokenStore {
    pool: PgPool,
}

impl PostgresAccessTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessTokenStore for PostgresAccessTokenStore {
    async fn insert(&self, token_hash: &str, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO access_tokens (token_hash, user_id) VALUES ($1, $2)")
            .bind(token_hash)
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save access token"))?;
        Ok(())
    }

    async fn find_user(&self, token_hash: &str) -> Result<Option<UserId>, DomainError> {
        let user_id: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM access_tokens WHERE token_hash = $1")
                .bind(token_hash)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to fetch access token"))?;
        Ok(user_id.map(UserId::from_uuid))
    }

    async fn revoke(&self, token_hash: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM access_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to revoke access token"))?;
        Ok(())
    }

    async fn revoke_all(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM access_tokens WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to revoke access tokens"))?;
        Ok(())
    }
}
