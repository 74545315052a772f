//! Row types and column lists shared by the user repository and readers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;
use uuid::Uuid;

use crate::domain::directory::{ReferenceEntry, UserCard};
use crate::domain::finance::FinancialProfile;
use crate::domain::foundation::{
    ChatEngineId, DomainError, ErrorCode, IndustryId, JobTitleId, MetroAreaId, Timestamp, UserId,
    ValidationError,
};
use crate::domain::user::{CareerLevel, ChatUser, Handle, UserProfile};

/// Every `users` column except `password_hash`, in bind order.
pub(super) const USER_COLUMNS: [&str; 40] = [
    "id",
    "email",
    "handle",
    "age",
    "gender",
    "metro_id",
    "industry_id",
    "job_title_id",
    "level",
    "current_pfm",
    "email_verified",
    "is_admin",
    "primary_annual_income",
    "primary_fed_tax_pct",
    "primary_state_tax_pct",
    "variable_monthly_income",
    "variable_fed_tax_pct",
    "variable_state_tax_pct",
    "secondary_monthly_income",
    "secondary_fed_tax_pct",
    "secondary_state_tax_pct",
    "housing_expense_monthly",
    "other_fixed_expense_monthly",
    "other_variable_expense_monthly",
    "retirement_savings_monthly",
    "market_savings_monthly",
    "savings_assets",
    "property_assets",
    "misc_assets",
    "loan_liabilities",
    "credit_card_liabilities",
    "misc_liabilities",
    "total_annual_income",
    "net_monthly_profit_loss",
    "total_assets",
    "total_liabilities",
    "net_worth",
    "deleted_at",
    "created_at",
    "updated_at",
];

/// `u.`-qualified column list for joined selects.
pub(super) fn qualified_user_columns() -> String {
    USER_COLUMNS
        .iter()
        .map(|column| format!("u.{}", column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Binds every [`USER_COLUMNS`] value, in order.
pub(super) fn bind_user<'q>(
    query: Query<'q, Postgres, PgArguments>,
    user: &'q UserProfile,
) -> Query<'q, Postgres, PgArguments> {
    let f = &user.finances;
    query
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(user.handle.as_ref().map(Handle::as_str))
        .bind(user.age)
        .bind(user.gender.map(|g| g.as_str()))
        .bind(user.metro_id.map(|id| id.as_i64()))
        .bind(user.industry_id.map(|id| id.as_i64()))
        .bind(user.job_title_id.map(|id| id.as_i64()))
        .bind(user.level.map(|l| l.as_i16()))
        .bind(user.current_pfm.map(|p| p.as_str()))
        .bind(user.email_verified)
        .bind(user.is_admin)
        .bind(f.primary_annual_income)
        .bind(f.primary_fed_tax_pct)
        .bind(f.primary_state_tax_pct)
        .bind(f.variable_monthly_income)
        .bind(f.variable_fed_tax_pct)
        .bind(f.variable_state_tax_pct)
        .bind(f.secondary_monthly_income)
        .bind(f.secondary_fed_tax_pct)
        .bind(f.secondary_state_tax_pct)
        .bind(f.housing_expense_monthly)
        .bind(f.other_fixed_expense_monthly)
        .bind(f.other_variable_expense_monthly)
        .bind(f.retirement_savings_monthly)
        .bind(f.market_savings_monthly)
        .bind(f.savings_assets)
        .bind(f.property_assets)
        .bind(f.misc_assets)
        .bind(f.loan_liabilities)
        .bind(f.credit_card_liabilities)
        .bind(f.misc_liabilities)
        .bind(f.total_annual_income)
        .bind(f.net_monthly_profit_loss)
        .bind(f.total_assets)
        .bind(f.total_liabilities)
        .bind(f.net_worth)
        .bind(user.deleted_at.map(|t| *t.as_datetime()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    email: String,
    handle: Option<String>,
    age: Option<i32>,
    gender: Option<String>,
    metro_id: Option<i64>,
    industry_id: Option<i64>,
    job_title_id: Option<i64>,
    level: Option<i16>,
    current_pfm: Option<String>,
    email_verified: bool,
    is_admin: bool,
    primary_annual_income: Option<Decimal>,
    primary_fed_tax_pct: Option<f64>,
    primary_state_tax_pct: Option<f64>,
    variable_monthly_income: Option<Decimal>,
    variable_fed_tax_pct: Option<f64>,
    variable_state_tax_pct: Option<f64>,
    secondary_monthly_income: Option<Decimal>,
    secondary_fed_tax_pct: Option<f64>,
    secondary_state_tax_pct: Option<f64>,
    housing_expense_monthly: Option<Decimal>,
    other_fixed_expense_monthly: Option<Decimal>,
    other_variable_expense_monthly: Option<Decimal>,
    retirement_savings_monthly: Option<Decimal>,
    market_savings_monthly: Option<Decimal>,
    savings_assets: Option<Decimal>,
    property_assets: Option<Decimal>,
    misc_assets: Option<Decimal>,
    loan_liabilities: Option<Decimal>,
    credit_card_liabilities: Option<Decimal>,
    misc_liabilities: Option<Decimal>,
    total_annual_income: Option<Decimal>,
    net_monthly_profit_loss: Option<Decimal>,
    total_assets: Option<Decimal>,
    total_liabilities: Option<Decimal>,
    net_worth: Option<Decimal>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn corrupt(column: &str) -> impl Fn(ValidationError) -> DomainError + '_ {
    move |e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value: {}", column, e),
        )
    }
}

fn parse_opt<T: FromStr<Err = ValidationError>>(
    column: &str,
    value: Option<String>,
) -> Result<Option<T>, DomainError> {
    value.map(|v| v.parse()).transpose().map_err(corrupt(column))
}

impl TryFrom<UserRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            id: UserId::from_uuid(row.id),
            email: row.email,
            handle: row.handle.map(Handle::new).transpose().map_err(corrupt("handle"))?,
            age: row.age,
            gender: parse_opt("gender", row.gender)?,
            metro_id: row.metro_id.map(MetroAreaId::new),
            industry_id: row.industry_id.map(IndustryId::new),
            job_title_id: row.job_title_id.map(JobTitleId::new),
            level: row
                .level
                .map(CareerLevel::try_from)
                .transpose()
                .map_err(corrupt("level"))?,
            current_pfm: parse_opt("current_pfm", row.current_pfm)?,
            email_verified: row.email_verified,
            is_admin: row.is_admin,
            finances: FinancialProfile {
                primary_annual_income: row.primary_annual_income,
                primary_fed_tax_pct: row.primary_fed_tax_pct,
                primary_state_tax_pct: row.primary_state_tax_pct,
                variable_monthly_income: row.variable_monthly_income,
                variable_fed_tax_pct: row.variable_fed_tax_pct,
                variable_state_tax_pct: row.variable_state_tax_pct,
                secondary_monthly_income: row.secondary_monthly_income,
                secondary_fed_tax_pct: row.secondary_fed_tax_pct,
                secondary_state_tax_pct: row.secondary_state_tax_pct,
                housing_expense_monthly: row.housing_expense_monthly,
                other_fixed_expense_monthly: row.other_fixed_expense_monthly,
                other_variable_expense_monthly: row.other_variable_expense_monthly,
                retirement_savings_monthly: row.retirement_savings_monthly,
                market_savings_monthly: row.market_savings_monthly,
                savings_assets: row.savings_assets,
                property_assets: row.property_assets,
                misc_assets: row.misc_assets,
                loan_liabilities: row.loan_liabilities,
                credit_card_liabilities: row.credit_card_liabilities,
                misc_liabilities: row.misc_liabilities,
                total_annual_income: row.total_annual_income,
                net_monthly_profit_loss: row.net_monthly_profit_loss,
                total_assets: row.total_assets,
                total_liabilities: row.total_liabilities,
                net_worth: row.net_worth,
            },
            deleted_at: row.deleted_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// A user row joined with its reference names and chat account.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct CardRow {
    #[sqlx(flatten)]
    user: UserRow,
    metro_name: Option<String>,
    industry_name: Option<String>,
    job_title_name: Option<String>,
    chat_engine_id: Option<i64>,
    chat_username: Option<String>,
    chat_secret: Option<String>,
    chat_agreed_to_terms: Option<bool>,
}

/// Joins and extra columns that turn a `users u` select into a card select.
pub(super) const CARD_JOINS: &str = r#"
    m.name AS metro_name,
    i.name AS industry_name,
    j.name AS job_title_name,
    c.chat_engine_id AS chat_engine_id,
    c.username AS chat_username,
    c.secret AS chat_secret,
    c.agreed_to_terms AS chat_agreed_to_terms
    FROM users u
    LEFT JOIN metropolitan_areas m ON m.id = u.metro_id
    LEFT JOIN industries i ON i.id = u.industry_id
    LEFT JOIN job_titles j ON j.id = u.job_title_id
    LEFT JOIN chat_users c ON c.user_id = u.id
"#;

fn named(id: Option<i64>, name: Option<String>) -> Option<ReferenceEntry> {
    Some(ReferenceEntry::new(id?, name?))
}

impl TryFrom<CardRow> for UserCard {
    type Error = DomainError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        let profile = UserProfile::try_from(row.user)?;
        let chat_user = match (row.chat_engine_id, row.chat_username, row.chat_secret) {
            (Some(id), Some(username), Some(secret)) => Some(ChatUser {
                user_id: profile.id,
                chat_engine_id: ChatEngineId::new(id),
                username,
                secret,
                agreed_to_terms: row.chat_agreed_to_terms.unwrap_or(false),
            }),
            _ => None,
        };
        Ok(UserCard {
            metro: named(profile.metro_id.map(|id| id.as_i64()), row.metro_name),
            industry: named(profile.industry_id.map(|id| id.as_i64()), row.industry_name),
            job_title: named(profile.job_title_id.map(|id| id.as_i64()), row.job_title_name),
            chat_user,
            profile,
        })
    }
}

/// Maps a sqlx error to a database domain error with context.
pub(super) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("{}: {}", context, e))
}
