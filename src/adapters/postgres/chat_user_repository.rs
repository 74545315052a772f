//! PostgreSQL implementation of ChatUserRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::db_error;
use crate::domain::foundation::{ChatEngineId, DomainError, ErrorCode, UserId};
use crate::domain::user::ChatUser;
use crate::ports::ChatUserRepository;

pub struct PostgresChatUserRepository {
    pool: PgPool,
}

impl PostgresChatUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ChatUserRow {
    user_id: Uuid,
    chat_engine_id: i64,
    username: String,
    secret: String,
    agreed_to_terms: bool,
}

impl From<ChatUserRow> for ChatUser {
    fn from(row: ChatUserRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            chat_engine_id: ChatEngineId::new(row.chat_engine_id),
            username: row.username,
            secret: row.secret,
            agreed_to_terms: row.agreed_to_terms,
        }
    }
}

#[async_trait]
impl ChatUserRepository for PostgresChatUserRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ChatUser>, DomainError> {
        let row: Option<ChatUserRow> = sqlx::query_as(
            "SELECT user_id, chat_engine_id, username, secret, agreed_to_terms FROM chat_users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch chat user"))?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, chat_user: &ChatUser) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_users (user_id, chat_engine_id, username, secret, agreed_to_terms)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chat_user.user_id.as_uuid())
        .bind(chat_user.chat_engine_id.as_i64())
        .bind(&chat_user.username)
        .bind(&chat_user.secret)
        .bind(chat_user.agreed_to_terms)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("chat_users_pkey") {
                    return DomainError::new(ErrorCode::Conflict, "User already has a chat account");
                }
            }
            DomainError::database(format!("Failed to save chat user: {}", e))
        })?;
        Ok(())
    }

    async fn update(&self, chat_user: &ChatUser) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE chat_users SET username = $2, agreed_to_terms = $3, updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(chat_user.user_id.as_uuid())
        .bind(&chat_user.username)
        .bind(chat_user.agreed_to_terms)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update chat user"))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Chat user"));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM chat_users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete chat user"))?;
        Ok(())
    }
}
