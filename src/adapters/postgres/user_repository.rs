//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::rows::{bind_user, db_error, UserRow, USER_COLUMNS};
use crate::domain::finance::ChangedFields;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Handle, UserProfile};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: impl ToString) -> Result<Option<UserProfile>, DomainError> {
        let sql = format!(
            "SELECT {} FROM users WHERE {} = $1",
            USER_COLUMNS.join(", "),
            column
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch user"))?;
        row.map(UserProfile::try_from).transpose()
    }
}

/// `UPDATE users` for every writable column except the derived values,
/// of which only the `changed` ones are written. `created_at` is immutable.
fn update_query<'a>(user: &'a UserProfile, changed: &ChangedFields) -> QueryBuilder<'a, Postgres> {
    let f = &user.finances;
    let mut qb = QueryBuilder::new("UPDATE users SET ");
    {
        let mut set = qb.separated(", ");
        set.push("email = ").push_bind_unseparated(user.email.as_str());
        set.push("handle = ")
            .push_bind_unseparated(user.handle.as_ref().map(Handle::as_str));
        set.push("age = ").push_bind_unseparated(user.age);
        set.push("gender = ").push_bind_unseparated(user.gender.map(|g| g.as_str()));
        set.push("metro_id = ").push_bind_unseparated(user.metro_id.map(|id| id.as_i64()));
        set.push("industry_id = ")
            .push_bind_unseparated(user.industry_id.map(|id| id.as_i64()));
        set.push("job_title_id = ")
            .push_bind_unseparated(user.job_title_id.map(|id| id.as_i64()));
        set.push("level = ").push_bind_unseparated(user.level.map(|l| l.as_i16()));
        set.push("current_pfm = ")
            .push_bind_unseparated(user.current_pfm.map(|p| p.as_str()));
        set.push("email_verified = ").push_bind_unseparated(user.email_verified);
        set.push("is_admin = ").push_bind_unseparated(user.is_admin);

        for (column, value, _) in f.currency_inputs() {
            set.push(format!("{} = ", column)).push_bind_unseparated(value);
        }
        for (column, value) in f.tax_inputs() {
            set.push(format!("{} = ", column)).push_bind_unseparated(value);
        }
        for field in changed.iter() {
            set.push(format!("{} = ", field.column()))
                .push_bind_unseparated(field.value(f));
        }

        set.push("deleted_at = ")
            .push_bind_unseparated(user.deleted_at.map(|t| *t.as_datetime()));
        set.push("updated_at = ")
            .push_bind_unseparated(*user.updated_at.as_datetime());
    }
    qb.push(" WHERE id = ").push_bind(*user.id.as_uuid());
    qb
}

fn map_write_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_handle_key") => {
                return DomainError::new(
                    ErrorCode::HandleTaken,
                    "A user with that handle already exists.",
                )
                .with_detail("field", "handle");
            }
            Some("users_email_key") => {
                return DomainError::new(ErrorCode::Conflict, "A user with that email already exists.");
            }
            _ => {}
        }
    }
    DomainError::database(format!("Failed to save user: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &UserProfile, password_hash: &str) -> Result<(), DomainError> {
        let placeholders: Vec<String> = (1..=USER_COLUMNS.len() + 1).map(|i| format!("${}", i)).collect();
        let sql = format!(
            "INSERT INTO users ({}, password_hash) VALUES ({})",
            USER_COLUMNS.join(", "),
            placeholders.join(", ")
        );
        bind_user(sqlx::query(&sql), user)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    async fn update(&self, user: &UserProfile, changed: &ChangedFields) -> Result<(), DomainError> {
        let result = update_query(user, changed)
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        tracing::debug!(user_id = %user.id, derived = ?changed.columns(), "user updated");
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS.join(", "));
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch user"))?;
        row.map(UserProfile::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_handle(&self, handle: &Handle) -> Result<Option<UserProfile>, DomainError> {
        self.find_one("handle", handle.as_str()).await
    }

    async fn handle_taken(&self, handle: &Handle, except: &UserId) -> Result<bool, DomainError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE handle = $1 AND id <> $2)",
        )
        .bind(handle.as_str())
        .bind(except.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check handle"))?;
        Ok(taken)
    }

    async fn password_hash(&self, id: &UserId) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch password"))
    }

    async fn set_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id.as_uuid())
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to set password"))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        Ok(())
    }
}
