//! Directory filters parsed from query parameters.
//!
//! Keys follow the `field__lookup` convention (`age__gte=30`,
//! `metro__in=1,2`). Unknown keys are ignored; malformed values are
//! validation errors.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::finance::FinancialProfile;
use crate::domain::foundation::{IndustryId, JobTitleId, MetroAreaId, UserId, ValidationError};
use crate::domain::user::{CareerLevel, CurrentPfm, Gender, UserProfile};

/// Inclusive/exclusive bounds on one column. A null value fails any bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Range<T> {
    pub eq: Option<T>,
    pub lt: Option<T>,
    pub lte: Option<T>,
    pub gt: Option<T>,
    pub gte: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            eq: None,
            lt: None,
            lte: None,
            gt: None,
            gte: None,
        }
    }
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn is_empty(&self) -> bool {
        self.eq.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
    }

    /// `(sql operator, bound)` pairs for every set bound.
    pub fn bounds(&self) -> Vec<(&'static str, T)> {
        [
            ("=", self.eq),
            ("<", self.lt),
            ("<=", self.lte),
            (">", self.gt),
            (">=", self.gte),
        ]
        .into_iter()
        .filter_map(|(op, bound)| bound.map(|b| (op, b)))
        .collect()
    }

    pub fn matches(&self, value: Option<T>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.bounds().into_iter().all(|(op, bound)| match op {
            "=" => value == bound,
            "<" => value < bound,
            "<=" => value <= bound,
            ">" => value > bound,
            _ => value >= bound,
        })
    }

    fn parse(params: &HashMap<String, String>, field: &str, with_eq: bool) -> Result<Self, ValidationError>
    where
        T: FromStr,
    {
        let get = |suffix: &str| -> Result<Option<T>, ValidationError> {
            let key = if suffix.is_empty() {
                field.to_string()
            } else {
                format!("{}__{}", field, suffix)
            };
            parse_value(params, &key)
        };
        Ok(Self {
            eq: if with_eq { get("")? } else { None },
            lt: get("lt")?,
            lte: get("lte")?,
            gt: get("gt")?,
            gte: get("gte")?,
        })
    }
}

fn parse_value<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Result<Option<T>, ValidationError> {
    match params.get(key).map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::invalid_format(key, "Enter a number.")),
    }
}

fn parse_list<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Result<Vec<T>, ValidationError> {
    match params.get(key) {
        None => Ok(Vec::new()),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse()
                    .map_err(|_| ValidationError::invalid_format(key, format!("\"{}\" is not a valid value.", item)))
            })
            .collect(),
    }
}

/// Financial columns that accept range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoneyColumn {
    PrimaryAnnualIncome,
    VariableMonthlyIncome,
    SecondaryMonthlyIncome,
    HousingExpenseMonthly,
    TotalAnnualIncome,
    NetMonthlyProfitLoss,
    TotalAssets,
    TotalLiabilities,
    NetWorth,
}

impl MoneyColumn {
    pub const ALL: [MoneyColumn; 9] = [
        MoneyColumn::PrimaryAnnualIncome,
        MoneyColumn::VariableMonthlyIncome,
        MoneyColumn::SecondaryMonthlyIncome,
        MoneyColumn::HousingExpenseMonthly,
        MoneyColumn::TotalAnnualIncome,
        MoneyColumn::NetMonthlyProfitLoss,
        MoneyColumn::TotalAssets,
        MoneyColumn::TotalLiabilities,
        MoneyColumn::NetWorth,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            MoneyColumn::PrimaryAnnualIncome => "primary_annual_income",
            MoneyColumn::VariableMonthlyIncome => "variable_monthly_income",
            MoneyColumn::SecondaryMonthlyIncome => "secondary_monthly_income",
            MoneyColumn::HousingExpenseMonthly => "housing_expense_monthly",
            MoneyColumn::TotalAnnualIncome => "total_annual_income",
            MoneyColumn::NetMonthlyProfitLoss => "net_monthly_profit_loss",
            MoneyColumn::TotalAssets => "total_assets",
            MoneyColumn::TotalLiabilities => "total_liabilities",
            MoneyColumn::NetWorth => "net_worth",
        }
    }

    pub fn value(&self, finances: &FinancialProfile) -> Option<Decimal> {
        match self {
            MoneyColumn::PrimaryAnnualIncome => finances.primary_annual_income,
            MoneyColumn::VariableMonthlyIncome => finances.variable_monthly_income,
            MoneyColumn::SecondaryMonthlyIncome => finances.secondary_monthly_income,
            MoneyColumn::HousingExpenseMonthly => finances.housing_expense_monthly,
            MoneyColumn::TotalAnnualIncome => finances.total_annual_income,
            MoneyColumn::NetMonthlyProfitLoss => finances.net_monthly_profit_loss,
            MoneyColumn::TotalAssets => finances.total_assets,
            MoneyColumn::TotalLiabilities => finances.total_liabilities,
            MoneyColumn::NetWorth => finances.net_worth,
        }
    }
}

/// Criteria for listing users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// The caller; never listed.
    pub exclude: Option<UserId>,
    /// Case-insensitive handle substring.
    pub search: Option<String>,
    pub age: Range<i32>,
    pub level: Range<i16>,
    pub gender_in: Vec<Gender>,
    pub metro_in: Vec<MetroAreaId>,
    pub industry_in: Vec<IndustryId>,
    pub job_title_in: Vec<JobTitleId>,
    pub level_in: Vec<CareerLevel>,
    pub current_pfm_in: Vec<CurrentPfm>,
    pub money: Vec<(MoneyColumn, Range<Decimal>)>,
}

impl UserFilter {
    /// Parses query parameters into a filter.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let mut money = Vec::new();
        for column in MoneyColumn::ALL {
            let range = Range::parse(params, column.column(), false)?;
            if !range.is_empty() {
                money.push((column, range));
            }
        }

        Ok(Self {
            exclude: None,
            search: params
                .get("search")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            age: Range::parse(params, "age", true)?,
            level: Range::parse(params, "level", false)?,
            gender_in: parse_list(params, "gender__in")?,
            metro_in: parse_list(params, "metro__in")?,
            industry_in: parse_list(params, "industry__in")?,
            job_title_in: parse_list(params, "job_title__in")?,
            level_in: parse_list(params, "level__in")?,
            current_pfm_in: parse_list(params, "current_pfm__in")?,
            money,
        })
    }

    /// Excludes the given user from results.
    pub fn excluding(mut self, user_id: UserId) -> Self {
        self.exclude = Some(user_id);
        self
    }

    /// In-process evaluation; mirrors the SQL the Postgres reader builds.
    pub fn matches(&self, user: &UserProfile) -> bool {
        fn any_of<T: PartialEq>(wanted: &[T], value: Option<T>) -> bool {
            wanted.is_empty() || value.map(|v| wanted.contains(&v)).unwrap_or(false)
        }

        if user.is_deleted() || self.exclude == Some(user.id) {
            return false;
        }
        if let Some(term) = &self.search {
            let hit = user
                .handle
                .as_ref()
                .map(|h| h.as_str().to_lowercase().contains(&term.to_lowercase()))
                .unwrap_or(false);
            if !hit {
                return false;
            }
        }

        self.age.matches(user.age)
            && self.level.matches(user.level.map(|l| l.as_i16()))
            && any_of(&self.gender_in, user.gender)
            && any_of(&self.metro_in, user.metro_id)
            && any_of(&self.industry_in, user.industry_id)
            && any_of(&self.job_title_in, user.job_title_id)
            && any_of(&self.level_in, user.level)
            && any_of(&self.current_pfm_in, user.current_pfm)
            && self
                .money
                .iter()
                .all(|(column, range)| range.matches(column.value(&user.finances)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Handle;
    use rust_decimal_macros::dec;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn user_aged(age: i32) -> UserProfile {
        let mut user = UserProfile::register("u@example.com");
        user.age = Some(age);
        user
    }

    #[test]
    fn age_bounds_filter_users() {
        let filter = UserFilter::from_params(&params(&[("age__gt", "21"), ("age__lte", "30")])).unwrap();

        assert!(!filter.matches(&user_aged(21)));
        assert!(filter.matches(&user_aged(25)));
        assert!(filter.matches(&user_aged(30)));
        assert!(!filter.matches(&UserProfile::register("none@example.com")));
    }

    #[test]
    fn exact_age_filter() {
        let filter = UserFilter::from_params(&params(&[("age", "25")])).unwrap();
        assert!(filter.matches(&user_aged(25)));
        assert!(!filter.matches(&user_aged(26)));
    }

    #[test]
    fn in_filters_parse_comma_lists() {
        let filter = UserFilter::from_params(&params(&[
            ("metro__in", "1, 2"),
            ("gender__in", "male,female"),
            ("level__in", "1,12"),
        ]))
        .unwrap();

        assert_eq!(filter.metro_in, vec![MetroAreaId::new(1), MetroAreaId::new(2)]);
        assert_eq!(filter.gender_in, vec![Gender::Male, Gender::Female]);
        assert_eq!(filter.level_in, vec![CareerLevel::IcAssociate, CareerLevel::Founder]);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(UserFilter::from_params(&params(&[("age__gt", "old")])).is_err());
        assert!(UserFilter::from_params(&params(&[("gender__in", "robot")])).is_err());
        assert!(UserFilter::from_params(&params(&[("net_worth__gte", "lots")])).is_err());
    }

    #[test]
    fn money_ranges_apply_to_derived_columns() {
        let filter = UserFilter::from_params(&params(&[("net_worth__gte", "1000.50")])).unwrap();
        let mut rich = user_aged(40);
        rich.finances.net_worth = Some(dec!(2000));
        let mut poor = user_aged(40);
        poor.finances.net_worth = Some(dec!(1000));

        assert!(filter.matches(&rich));
        assert!(!filter.matches(&poor));
    }

    #[test]
    fn search_matches_handle_substring_and_excludes_caller() {
        let mut user = user_aged(30);
        user.handle = Some(Handle::new("Player_One").unwrap());
        let filter = UserFilter::from_params(&params(&[("search", "player")])).unwrap();

        assert!(filter.matches(&user));
        assert!(!filter.clone().excluding(user.id).matches(&user));
    }

    #[test]
    fn deleted_users_never_match() {
        let mut user = user_aged(30);
        user.soft_delete();
        assert!(!UserFilter::default().matches(&user));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let filter = UserFilter::from_params(&params(&[("favourite_color", "blue")])).unwrap();
        assert_eq!(filter, UserFilter::default());
    }
}
