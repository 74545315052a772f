//! PostgreSQL implementations of WaitlistRepository and MisconductRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::db_error;
use crate::domain::foundation::DomainError;
use crate::domain::user::{MisconductReport, WaitlistEntry};
use crate::ports::{MisconductRepository, WaitlistRepository};

pub struct PostgresCommunityRepository {
    pool: PgPool,
}

impl PostgresCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WaitlistRow {
    email: String,
    how_did_you_hear_about_us: String,
    why_do_you_want_to_join: String,
    created: bool,
}

#[async_trait]
impl WaitlistRepository for PostgresCommunityRepository {
    async fn get_or_create(&self, entry: WaitlistEntry) -> Result<(WaitlistEntry, bool), DomainError> {
        // xmax is zero only for a freshly inserted tuple.
        let row: WaitlistRow = sqlx::query_as(
            r#"
            INSERT INTO waitlist (email, how_did_you_hear_about_us, why_do_you_want_to_join)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING email,
                      how_did_you_hear_about_us,
                      why_do_you_want_to_join,
                      (xmax = 0) AS created
            "#,
        )
        .bind(&entry.email)
        .bind(&entry.how_did_you_hear_about_us)
        .bind(&entry.why_do_you_want_to_join)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to save waitlist entry"))?;

        Ok((
            WaitlistEntry {
                email: row.email,
                how_did_you_hear_about_us: row.how_did_you_hear_about_us,
                why_do_you_want_to_join: row.why_do_you_want_to_join,
            },
            row.created,
        ))
    }
}

#[async_trait]
impl MisconductRepository for PostgresCommunityRepository {
    async fn insert(&self, report: &MisconductReport) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO misconduct_reports
                (id, plaintiff_id, defendant_id, description, acknowledged_by_staff, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(report.id)
        .bind(report.plaintiff_id.as_uuid())
        .bind(report.defendant_id.as_uuid())
        .bind(&report.description)
        .bind(report.acknowledged_by_staff)
        .bind(report.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to save misconduct report"))?;
        Ok(())
    }
}
