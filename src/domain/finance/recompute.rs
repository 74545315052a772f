//! Derived financial field recomputation.
//!
//! `recompute` is a pure function: callers run it immediately before every
//! create or update and persist the returned profile. Each derived value is
//! all-or-nothing over its own dependencies; a missing input yields `None`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use super::{CurrencyWidth, FinancialProfile};

/// Yields `Some((a, b, ..))` when every argument is `Some`, otherwise `None`.
macro_rules! all_present {
    ($($value:expr),+ $(,)?) => {
        (|| Some(($($value?,)+)))()
    };
}

pub(crate) use all_present;

/// One of the five server-owned derived values, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivedField {
    TotalAnnualIncome,
    NetMonthlyProfitLoss,
    TotalAssets,
    TotalLiabilities,
    NetWorth,
}

impl DerivedField {
    /// All derived fields in evaluation order.
    pub const ALL: [DerivedField; 5] = [
        DerivedField::TotalAnnualIncome,
        DerivedField::NetMonthlyProfitLoss,
        DerivedField::TotalAssets,
        DerivedField::TotalLiabilities,
        DerivedField::NetWorth,
    ];

    /// Persistence column name.
    pub fn column(self) -> &'static str {
        match self {
            DerivedField::TotalAnnualIncome => "total_annual_income",
            DerivedField::NetMonthlyProfitLoss => "net_monthly_profit_loss",
            DerivedField::TotalAssets => "total_assets",
            DerivedField::TotalLiabilities => "total_liabilities",
            DerivedField::NetWorth => "net_worth",
        }
    }

    /// Storage width of the persistence column.
    pub fn width(self) -> CurrencyWidth {
        match self {
            DerivedField::TotalAnnualIncome | DerivedField::NetMonthlyProfitLoss => {
                CurrencyWidth::Standard
            }
            DerivedField::TotalAssets | DerivedField::TotalLiabilities | DerivedField::NetWorth => {
                CurrencyWidth::Wide
            }
        }
    }

    /// Current value of this field on `profile`.
    pub fn value(self, profile: &FinancialProfile) -> Option<Decimal> {
        match self {
            DerivedField::TotalAnnualIncome => profile.total_annual_income,
            DerivedField::NetMonthlyProfitLoss => profile.net_monthly_profit_loss,
            DerivedField::TotalAssets => profile.total_assets,
            DerivedField::TotalLiabilities => profile.total_liabilities,
            DerivedField::NetWorth => profile.net_worth,
        }
    }

    fn slot(self, profile: &mut FinancialProfile) -> &mut Option<Decimal> {
        match self {
            DerivedField::TotalAnnualIncome => &mut profile.total_annual_income,
            DerivedField::NetMonthlyProfitLoss => &mut profile.net_monthly_profit_loss,
            DerivedField::TotalAssets => &mut profile.total_assets,
            DerivedField::TotalLiabilities => &mut profile.total_liabilities,
            DerivedField::NetWorth => &mut profile.net_worth,
        }
    }
}

impl fmt::Display for DerivedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Derived fields whose value changed during a recompute, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedFields(Vec<DerivedField>);

impl ChangedFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: DerivedField) -> bool {
        self.0.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = DerivedField> + '_ {
        self.0.iter().copied()
    }

    /// Column names of the changed fields.
    pub fn columns(&self) -> Vec<&'static str> {
        self.iter().map(DerivedField::column).collect()
    }
}

/// Rounds a currency amount to cents.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a whole-number tax percentage to a decimal; non-finite is absent.
pub(crate) fn tax_pct(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

/// Checked sum; overflow yields `None`.
pub(crate) fn sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
}

/// Share of a stream kept after the combined tax rate.
pub(crate) fn after_tax(amount: Decimal, fed_pct: Decimal, state_pct: Decimal) -> Option<Decimal> {
    let rate = fed_pct.checked_add(state_pct)?.checked_div(Decimal::ONE_HUNDRED)?;
    amount.checked_mul(Decimal::ONE.checked_sub(rate)?)
}

fn monthly_to_annual(monthly: Decimal) -> Option<Decimal> {
    monthly.checked_mul(Decimal::from(12))
}

fn total_annual_income(p: &FinancialProfile) -> Option<Decimal> {
    let (primary, variable, secondary) = all_present!(
        p.primary_annual_income,
        p.variable_monthly_income,
        p.secondary_monthly_income,
    )?;
    sum(&[primary, monthly_to_annual(variable)?, monthly_to_annual(secondary)?])
}

fn net_monthly_profit_loss(p: &FinancialProfile) -> Option<Decimal> {
    let (primary, primary_fed, primary_state) = all_present!(
        p.primary_annual_income,
        tax_pct(p.primary_fed_tax_pct),
        tax_pct(p.primary_state_tax_pct),
    )?;
    let (variable, variable_fed, variable_state) = all_present!(
        p.variable_monthly_income,
        tax_pct(p.variable_fed_tax_pct),
        tax_pct(p.variable_state_tax_pct),
    )?;
    let (secondary, secondary_fed, secondary_state) = all_present!(
        p.secondary_monthly_income,
        tax_pct(p.secondary_fed_tax_pct),
        tax_pct(p.secondary_state_tax_pct),
    )?;
    let (housing, fixed, variable_expense) = all_present!(
        p.housing_expense_monthly,
        p.other_fixed_expense_monthly,
        p.other_variable_expense_monthly,
    )?;
    let (retirement, market) =
        all_present!(p.retirement_savings_monthly, p.market_savings_monthly)?;

    let net_primary = after_tax(primary, primary_fed, primary_state)?.checked_div(Decimal::from(12))?;
    let net_variable = after_tax(variable, variable_fed, variable_state)?;
    let net_secondary = after_tax(secondary, secondary_fed, secondary_state)?;
    let outgoing = sum(&[housing, fixed, variable_expense, retirement, market])?;

    sum(&[net_primary, net_variable, net_secondary])?.checked_sub(outgoing)
}

fn total_assets(p: &FinancialProfile) -> Option<Decimal> {
    let (a, b, c) = all_present!(p.savings_assets, p.property_assets, p.misc_assets)?;
    sum(&[a, b, c])
}

fn total_liabilities(p: &FinancialProfile) -> Option<Decimal> {
    let (a, b, c) =
        all_present!(p.loan_liabilities, p.credit_card_liabilities, p.misc_liabilities)?;
    sum(&[a, b, c])
}

fn net_worth(p: &FinancialProfile) -> Option<Decimal> {
    let (assets, liabilities) = all_present!(p.total_assets, p.total_liabilities)?;
    assets.checked_sub(liabilities)
}

/// Recomputes the five derived fields and reports which of them changed.
///
/// Evaluation runs in [`DerivedField::ALL`] order, so net worth always sees
/// the totals produced in the same pass. Never fails: a sum that would
/// overflow the decimal range is treated like a missing input.
pub fn recompute(mut profile: FinancialProfile) -> (FinancialProfile, ChangedFields) {
    let mut changed = Vec::new();

    for field in DerivedField::ALL {
        let fresh = match field {
            DerivedField::TotalAnnualIncome => total_annual_income(&profile),
            DerivedField::NetMonthlyProfitLoss => net_monthly_profit_loss(&profile),
            DerivedField::TotalAssets => total_assets(&profile),
            DerivedField::TotalLiabilities => total_liabilities(&profile),
            DerivedField::NetWorth => net_worth(&profile),
        }
        .map(to_cents);

        let slot = field.slot(&mut profile);
        if *slot != fresh {
            *slot = fresh;
            changed.push(field);
        }
    }

    (profile, ChangedFields(changed))
}
