//! Whitelisted sort keys for the user directory.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::filter::MoneyColumn;
use super::UserCard;
use crate::domain::foundation::ValidationError;

/// A column users can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKey {
    Handle,
    Age,
    Gender,
    Level,
    CurrentPfm,
    Money(MoneyColumn),
    MetroName,
    IndustryName,
    JobTitleName,
}

impl OrderKey {
    /// Query-string spelling of the key.
    pub fn name(&self) -> &'static str {
        match self {
            OrderKey::Handle => "handle",
            OrderKey::Age => "age",
            OrderKey::Gender => "gender",
            OrderKey::Level => "level",
            OrderKey::CurrentPfm => "current_pfm",
            OrderKey::Money(column) => column.column(),
            OrderKey::MetroName => "metro__name",
            OrderKey::IndustryName => "industry__name",
            OrderKey::JobTitleName => "job_title__name",
        }
    }

    /// SQL expression against the `u`, `m`, `i`, `j` aliases of the directory query.
    pub fn sql_expr(&self) -> &'static str {
        match self {
            OrderKey::Handle => "u.handle",
            OrderKey::Age => "u.age",
            OrderKey::Gender => "u.gender",
            OrderKey::Level => "u.level",
            OrderKey::CurrentPfm => "u.current_pfm",
            OrderKey::Money(MoneyColumn::PrimaryAnnualIncome) => "u.primary_annual_income",
            OrderKey::Money(MoneyColumn::VariableMonthlyIncome) => "u.variable_monthly_income",
            OrderKey::Money(MoneyColumn::SecondaryMonthlyIncome) => "u.secondary_monthly_income",
            OrderKey::Money(MoneyColumn::HousingExpenseMonthly) => "u.housing_expense_monthly",
            OrderKey::Money(MoneyColumn::TotalAnnualIncome) => "u.total_annual_income",
            OrderKey::Money(MoneyColumn::NetMonthlyProfitLoss) => "u.net_monthly_profit_loss",
            OrderKey::Money(MoneyColumn::TotalAssets) => "u.total_assets",
            OrderKey::Money(MoneyColumn::TotalLiabilities) => "u.total_liabilities",
            OrderKey::Money(MoneyColumn::NetWorth) => "u.net_worth",
            OrderKey::MetroName => "m.name",
            OrderKey::IndustryName => "i.name",
            OrderKey::JobTitleName => "j.name",
        }
    }

    fn sort_value(&self, card: &UserCard) -> Option<SortValue> {
        let profile = &card.profile;
        match self {
            OrderKey::Handle => profile.handle.as_ref().map(|h| SortValue::Text(h.to_string())),
            OrderKey::Age => profile.age.map(|a| SortValue::Number(Decimal::from(a))),
            OrderKey::Gender => profile.gender.map(|g| SortValue::Text(g.as_str().to_string())),
            OrderKey::Level => profile.level.map(|l| SortValue::Number(Decimal::from(l.as_i16()))),
            OrderKey::CurrentPfm => profile
                .current_pfm
                .map(|p| SortValue::Text(p.as_str().to_string())),
            OrderKey::Money(column) => column.value(&profile.finances).map(SortValue::Number),
            OrderKey::MetroName => card.metro.as_ref().map(|r| SortValue::Text(r.name.clone())),
            OrderKey::IndustryName => card.industry.as_ref().map(|r| SortValue::Text(r.name.clone())),
            OrderKey::JobTitleName => card.job_title.as_ref().map(|r| SortValue::Text(r.name.clone())),
        }
    }
}

impl FromStr for OrderKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "handle" => OrderKey::Handle,
            "age" => OrderKey::Age,
            "gender" => OrderKey::Gender,
            "level" => OrderKey::Level,
            "current_pfm" => OrderKey::CurrentPfm,
            "metro__name" => OrderKey::MetroName,
            "industry__name" => OrderKey::IndustryName,
            "job_title__name" => OrderKey::JobTitleName,
            other => MoneyColumn::ALL
                .into_iter()
                .find(|column| column.column() == other)
                .map(OrderKey::Money)
                .ok_or_else(|| {
                    ValidationError::invalid_format(
                        "order_by",
                        format!("Cannot order by \"{}\"", other),
                    )
                })?,
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
enum SortValue {
    Number(Decimal),
    Text(String),
}

/// Sort direction and key. Nulls always sort last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub key: OrderKey,
    pub descending: bool,
}

impl Default for OrderBy {
    fn default() -> Self {
        Self {
            key: OrderKey::Money(MoneyColumn::NetWorth),
            descending: false,
        }
    }
}

impl OrderBy {
    /// Parses `key` or `-key`; absent means `net_worth` ascending.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };
        let (descending, name) = match raw.strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, raw),
        };
        Ok(Self {
            key: name.parse()?,
            descending,
        })
    }

    /// `ORDER BY` clause body, with a stable tiebreaker.
    pub fn sql(&self) -> String {
        format!(
            "{} {} NULLS LAST, u.created_at ASC, u.id ASC",
            self.key.sql_expr(),
            if self.descending { "DESC" } else { "ASC" }
        )
    }

    /// Comparator for in-process sorting, consistent with [`OrderBy::sql`].
    pub fn compare(&self, a: &UserCard, b: &UserCard) -> Ordering {
        let primary = match (self.key.sort_value(a), self.key.sort_value(b)) {
            (Some(x), Some(y)) => {
                let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                if self.descending {
                    ord.reverse()
                } else {
                    ord
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        primary
            .then_with(|| a.profile.created_at.cmp(&b.profile.created_at))
            .then_with(|| a.profile.id.cmp(&b.profile.id))
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.key.name())
        } else {
            f.write_str(self.key.name())
        }
    }
}
