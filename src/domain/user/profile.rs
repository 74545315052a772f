//! UserProfile entity and its partial-update payload.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::patch::{apply_present, nullable};
use super::{CareerLevel, CurrentPfm, Gender, Handle};
use crate::domain::finance::{recompute, ChangedFields, FinancialProfile};
use crate::domain::foundation::{
    IndustryId, JobTitleId, MetroAreaId, Timestamp, UserId, ValidationError,
};

const MAX_AGE: i32 = 150;

/// A member account with demographics and financial inputs.
///
/// # Invariants
///
/// - `handle` is unique across all users when set
/// - derived values in `finances` are only written by `recompute`
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub handle: Option<Handle>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub metro_id: Option<MetroAreaId>,
    pub industry_id: Option<IndustryId>,
    pub job_title_id: Option<JobTitleId>,
    pub level: Option<CareerLevel>,
    pub current_pfm: Option<CurrentPfm>,
    pub email_verified: bool,
    pub is_admin: bool,
    pub finances: FinancialProfile,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserProfile {
    /// Creates a fresh, unverified account.
    pub fn register(email: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            email: normalize_email(&email.into()),
            handle: None,
            age: None,
            gender: None,
            metro_id: None,
            industry_id: None,
            job_title_id: None,
            level: None,
            current_pfm: None,
            email_verified: false,
            is_admin: false,
            finances: FinancialProfile::default(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Runs the derived-field engine over this profile's finances.
    ///
    /// Call immediately before persisting.
    pub fn recompute_finances(mut self) -> (Self, ChangedFields) {
        let (finances, changed) = recompute(self.finances);
        self.finances = finances;
        (self, changed)
    }

    /// Applies a validated patch. Handle and derived values are never touched.
    pub fn apply_patch(&mut self, patch: ProfilePatch) {
        if let Some(metro) = patch.metro {
            self.metro_id = metro;
        }
        if let Some(industry) = patch.industry {
            self.industry_id = industry;
        }
        if let Some(job_title) = patch.job_title {
            self.job_title_id = job_title;
        }
        apply_present!(self, patch, [age, gender, level, current_pfm]);
        apply_present!(
            self.finances,
            patch,
            [
                primary_annual_income,
                primary_fed_tax_pct,
                primary_state_tax_pct,
                variable_monthly_income,
                variable_fed_tax_pct,
                variable_state_tax_pct,
                secondary_monthly_income,
                secondary_fed_tax_pct,
                secondary_state_tax_pct,
                housing_expense_monthly,
                other_fixed_expense_monthly,
                other_variable_expense_monthly,
                retirement_savings_monthly,
                market_savings_monthly,
                savings_assets,
                property_assets,
                misc_assets,
                loan_liabilities,
                credit_card_liabilities,
                misc_liabilities,
            ]
        );
        self.updated_at = Timestamp::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks the account deleted; it disappears from the directory.
    pub fn soft_delete(&mut self) {
        let now = Timestamp::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// Lowercases the domain part of an address.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Inbound profile update. Absent fields are untouched, `null` clears.
///
/// There is no slot for `id`, `handle`, or derived values; such keys in a
/// request body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, deserialize_with = "nullable")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "nullable")]
    pub metro: Option<Option<MetroAreaId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub industry: Option<Option<IndustryId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub job_title: Option<Option<JobTitleId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub level: Option<Option<CareerLevel>>,
    #[serde(default, deserialize_with = "nullable")]
    pub current_pfm: Option<Option<CurrentPfm>>,

    #[serde(default, deserialize_with = "nullable")]
    pub primary_annual_income: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_fed_tax_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_state_tax_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub variable_monthly_income: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub variable_fed_tax_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub variable_state_tax_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub secondary_monthly_income: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub secondary_fed_tax_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub secondary_state_tax_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub housing_expense_monthly: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub other_fixed_expense_monthly: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub other_variable_expense_monthly: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub retirement_savings_monthly: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub market_savings_monthly: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub savings_assets: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub property_assets: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub misc_assets: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub loan_liabilities: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub credit_card_liabilities: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub misc_liabilities: Option<Option<Decimal>>,
}

impl ProfilePatch {
    /// Checks every value the patch would write.
    ///
    /// Foreign key existence is checked by the caller against the directory.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(Some(age)) = self.age {
            if !(0..=MAX_AGE).contains(&age) {
                return Err(ValidationError::out_of_range("age", 0, MAX_AGE, age));
            }
        }
        // Project the patch onto an empty profile so the column rules apply.
        let patch = self.clone();
        let mut finances = FinancialProfile::default();
        apply_present!(
            finances,
            patch,
            [
                primary_annual_income,
                primary_fed_tax_pct,
                primary_state_tax_pct,
                variable_monthly_income,
                variable_fed_tax_pct,
                variable_state_tax_pct,
                secondary_monthly_income,
                secondary_fed_tax_pct,
                secondary_state_tax_pct,
                housing_expense_monthly,
                other_fixed_expense_monthly,
                other_variable_expense_monthly,
                retirement_savings_monthly,
                market_savings_monthly,
                savings_assets,
                property_assets,
                misc_assets,
                loan_liabilities,
                credit_card_liabilities,
                misc_liabilities,
            ]
        );
        finances.validate_inputs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::finance::DerivedField;
    use rust_decimal_macros::dec;

    #[test]
    fn register_normalizes_email_domain() {
        let user = UserProfile::register("Someone@Example.COM");
        assert_eq!(user.email, "Someone@example.com");
        assert!(!user.email_verified);
        assert!(!user.is_admin);
    }

    #[test]
    fn patch_sets_clears_and_ignores() {
        let mut user = UserProfile::register("a@example.com");
        user.age = Some(20);
        user.finances.savings_assets = Some(dec!(10));

        let patch: ProfilePatch = serde_json::from_str(
            r#"{"age": 25, "savings_assets": null, "handle": "ignored", "net_worth": "5.00"}"#,
        )
        .unwrap();
        user.apply_patch(patch);

        assert_eq!(user.age, Some(25));
        assert_eq!(user.finances.savings_assets, None);
        assert_eq!(user.handle, None);
        assert_eq!(user.finances.net_worth, None);
    }

    #[test]
    fn patch_then_recompute_populates_derived_values() {
        let mut user = UserProfile::register("a@example.com");
        let patch: ProfilePatch = serde_json::from_str(
            r#"{"savings_assets": "100000", "property_assets": 1100, "misc_assets": "1100",
                "loan_liabilities": 1100, "credit_card_liabilities": 1100, "misc_liabilities": 1100}"#,
        )
        .unwrap();
        patch.validate().unwrap();
        user.apply_patch(patch);

        let (user, changed) = user.recompute_finances();

        assert_eq!(user.finances.net_worth, Some(dec!(98900)));
        assert!(changed.contains(DerivedField::NetWorth));
    }

    #[test]
    fn patch_validation_rejects_bad_tax_rate() {
        let patch: ProfilePatch =
            serde_json::from_str(r#"{"primary_fed_tax_pct": 120}"#).unwrap();
        let err = patch.validate().unwrap_err();
        assert_eq!(err.field(), "primary_fed_tax_pct");
    }

    #[test]
    fn patch_rejects_non_numeric_age() {
        assert!(serde_json::from_str::<ProfilePatch>(r#"{"age": "dfvfdvfsd"}"#).is_err());
    }

    #[test]
    fn soft_delete_marks_user() {
        let mut user = UserProfile::register("a@example.com");
        user.soft_delete();
        assert!(user.is_deleted());
    }
}
