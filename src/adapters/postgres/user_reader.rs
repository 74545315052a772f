//! PostgreSQL implementation of UserReader.
//!
//! Cards are read with one joined select; directory filters become `WHERE`
//! clauses built with `QueryBuilder` so every value is bound.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::rows::{db_error, qualified_user_columns, CardRow, CARD_JOINS};
use crate::domain::directory::{OrderBy, Page, PageRequest, Range, UserCard, UserFilter};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserReader;

/// PostgreSQL implementation of the UserReader port.
pub struct PostgresUserReader {
    pool: PgPool,
}

impl PostgresUserReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn card_select() -> String {
    format!("SELECT {}, {}", qualified_user_columns(), CARD_JOINS)
}

/// Escapes `%`, `_` and `\` for a `LIKE` pattern.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_range<'a, T>(qb: &mut QueryBuilder<'a, Postgres>, column: &str, range: &Range<T>)
where
    T: PartialOrd + Copy + Send + sqlx::Encode<'a, Postgres> + sqlx::Type<Postgres> + 'a,
{
    for (op, bound) in range.bounds() {
        qb.push(format!(" AND {} {} ", column, op));
        qb.push_bind(bound);
    }
}

fn push_any<'a, T>(qb: &mut QueryBuilder<'a, Postgres>, column: &str, values: Vec<T>)
where
    Vec<T>: sqlx::Encode<'a, Postgres> + sqlx::Type<Postgres> + Send + 'a,
{
    if values.is_empty() {
        return;
    }
    qb.push(format!(" AND {} = ANY(", column));
    qb.push_bind(values);
    qb.push(")");
}

/// Appends the `WHERE` clause for `filter`; soft-deleted users never match.
fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &UserFilter) {
    qb.push(" WHERE u.deleted_at IS NULL");
    if let Some(exclude) = filter.exclude {
        qb.push(" AND u.id <> ");
        qb.push_bind(*exclude.as_uuid());
    }
    if let Some(term) = &filter.search {
        qb.push(" AND u.handle ILIKE ");
        qb.push_bind(like_pattern(term));
    }
    push_range(qb, "u.age", &filter.age);
    push_range(qb, "u.level", &filter.level);
    push_any(
        qb,
        "u.gender",
        filter.gender_in.iter().map(|g| g.as_str().to_string()).collect::<Vec<_>>(),
    );
    push_any(qb, "u.metro_id", filter.metro_in.iter().map(|id| id.as_i64()).collect::<Vec<_>>());
    push_any(
        qb,
        "u.industry_id",
        filter.industry_in.iter().map(|id| id.as_i64()).collect::<Vec<_>>(),
    );
    push_any(
        qb,
        "u.job_title_id",
        filter.job_title_in.iter().map(|id| id.as_i64()).collect::<Vec<_>>(),
    );
    push_any(qb, "u.level", filter.level_in.iter().map(|l| l.as_i16()).collect::<Vec<_>>());
    push_any(
        qb,
        "u.current_pfm",
        filter
            .current_pfm_in
            .iter()
            .map(|p| p.as_str().to_string())
            .collect::<Vec<_>>(),
    );
    for (column, range) in &filter.money {
        push_range(qb, &format!("u.{}", column.column()), range);
    }
}

#[async_trait]
impl UserReader for PostgresUserReader {
    async fn get_card(&self, id: &UserId) -> Result<Option<UserCard>, DomainError> {
        let sql = format!("{} WHERE u.id = $1 AND u.deleted_at IS NULL", card_select());
        let row: Option<CardRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch user"))?;
        row.map(UserCard::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &UserFilter,
        order: &OrderBy,
        page: PageRequest,
    ) -> Result<Page<UserCard>, DomainError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users u");
        push_filters(&mut count_query, filter);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count users"))?;
        let count = u64::try_from(count).unwrap_or_default();
        let page = page.resolve(count);

        let mut query = QueryBuilder::<Postgres>::new(card_select());
        push_filters(&mut query, filter);
        query.push(format!(" ORDER BY {}", order.sql()));
        query.push(" LIMIT ");
        query.push_bind(page.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(page.offset() as i64);

        let rows: Vec<CardRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users"))?;
        let cards = rows
            .into_iter()
            .map(UserCard::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Page::new(cards, count, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a_b%c"), "%a\\_b\\%c%");
    }

    #[test]
    fn filters_bind_values_instead_of_inlining() {
        let mut params = std::collections::HashMap::new();
        params.insert("age__gte".to_string(), "30".to_string());
        params.insert("metro__in".to_string(), "1,2".to_string());
        params.insert("net_worth__lt".to_string(), "1000".to_string());
        let filter = UserFilter::from_params(&params).unwrap();

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users u");
        push_filters(&mut qb, &filter);
        let sql = qb.sql();

        assert!(sql.contains("u.deleted_at IS NULL"));
        assert!(sql.contains("u.age >= $1"));
        assert!(sql.contains("u.metro_id = ANY($2)"));
        assert!(sql.contains("u.net_worth < $3"));
        assert!(!sql.contains("1000"));
    }
}
