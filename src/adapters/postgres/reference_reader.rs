//! PostgreSQL implementation of ReferenceReader.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::rows::db_error;
use crate::domain::directory::{Page, PageRequest, ReferenceEntry, ReferenceKind, ReferenceQuery};
use crate::domain::foundation::DomainError;
use crate::ports::ReferenceReader;

pub struct PostgresReferenceReader {
    pool: PgPool,
}

impl PostgresReferenceReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReferenceRow {
    id: i64,
    name: String,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ReferenceQuery) {
    qb.push(" WHERE TRUE");
    if let Some(term) = &query.search {
        qb.push(" AND name ILIKE ");
        qb.push_bind(format!("%{}%", term.replace('%', "\\%").replace('_', "\\_")));
    }
    if let Some(ids) = &query.ids {
        qb.push(" AND id = ANY(");
        qb.push_bind(ids.clone());
        qb.push(")");
    }
}

#[async_trait]
impl ReferenceReader for PostgresReferenceReader {
    async fn search(
        &self,
        kind: ReferenceKind,
        query: &ReferenceQuery,
        page: PageRequest,
    ) -> Result<Page<ReferenceEntry>, DomainError> {
        let mut count_query =
            QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", kind.table()));
        push_filters(&mut count_query, query);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count reference rows"))?;
        let count = u64::try_from(count).unwrap_or_default();
        let page = page.resolve(count);

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT id, name FROM {}", kind.table()));
        push_filters(&mut select, query);
        select.push(" ORDER BY name ASC, id ASC LIMIT ");
        select.push_bind(page.limit() as i64);
        select.push(" OFFSET ");
        select.push_bind(page.offset() as i64);

        let rows: Vec<ReferenceRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to search reference rows"))?;

        Page::new(
            rows.into_iter()
                .map(|row| ReferenceEntry::new(row.id, row.name))
                .collect(),
            count,
            page,
        )
    }

    async fn exists(&self, kind: ReferenceKind, id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            kind.table()
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check reference row"))
    }
}
