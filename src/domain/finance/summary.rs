//! Read-only presentation ratios derived on demand from a profile.

use rust_decimal::Decimal;
use serde::Serialize;

use super::recompute::{after_tax, all_present, sum, tax_pct, to_cents};
use super::FinancialProfile;

/// Monthly net figures shown alongside a profile. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub primary_monthly_net: Option<Decimal>,
    pub variable_monthly_net: Option<Decimal>,
    pub secondary_monthly_net: Option<Decimal>,
    pub total_monthly_net: Option<Decimal>,
    pub annual_net_of_tax_pct: Option<Decimal>,
    pub total_monthly_expenses: Option<Decimal>,
    pub total_monthly_savings: Option<Decimal>,
}

impl FinancialSummary {
    /// Computes the summary; each value is absent when any input it needs is.
    pub fn of(p: &FinancialProfile) -> Self {
        let primary_monthly_net = all_present!(
            p.primary_annual_income,
            tax_pct(p.primary_fed_tax_pct),
            tax_pct(p.primary_state_tax_pct),
        )
        .and_then(|(amount, fed, state)| {
            after_tax(amount, fed, state)?.checked_div(Decimal::from(12))
        });

        let variable_monthly_net = all_present!(
            p.variable_monthly_income,
            tax_pct(p.variable_fed_tax_pct),
            tax_pct(p.variable_state_tax_pct),
        )
        .and_then(|(amount, fed, state)| after_tax(amount, fed, state));

        let secondary_monthly_net = all_present!(
            p.secondary_monthly_income,
            tax_pct(p.secondary_fed_tax_pct),
            tax_pct(p.secondary_state_tax_pct),
        )
        .and_then(|(amount, fed, state)| after_tax(amount, fed, state));

        let total_monthly_net =
            all_present!(primary_monthly_net, variable_monthly_net, secondary_monthly_net)
                .and_then(|(a, b, c)| sum(&[a, b, c]));

        let annual_net_of_tax_pct = all_present!(total_monthly_net, p.total_annual_income)
            .filter(|(_, annual)| !annual.is_zero())
            .and_then(|(net, annual)| {
                let share = net.checked_mul(Decimal::from(12))?.checked_div(annual)?;
                Decimal::ONE_HUNDRED.checked_sub(share.checked_mul(Decimal::ONE_HUNDRED)?)
            });

        let total_monthly_expenses = all_present!(
            p.housing_expense_monthly,
            p.other_fixed_expense_monthly,
            p.other_variable_expense_monthly,
        )
        .and_then(|(a, b, c)| sum(&[a, b, c]));

        let total_monthly_savings =
            all_present!(p.retirement_savings_monthly, p.market_savings_monthly)
                .and_then(|(a, b)| sum(&[a, b]));

        Self {
            primary_monthly_net: primary_monthly_net.map(to_cents),
            variable_monthly_net: variable_monthly_net.map(to_cents),
            secondary_monthly_net: secondary_monthly_net.map(to_cents),
            total_monthly_net: total_monthly_net.map(to_cents),
            annual_net_of_tax_pct: annual_net_of_tax_pct.map(to_cents),
            total_monthly_expenses,
            total_monthly_savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::finance::recompute;
    use rust_decimal_macros::dec;

    fn income_profile() -> FinancialProfile {
        FinancialProfile {
            primary_annual_income: Some(dec!(120000)),
            primary_fed_tax_pct: Some(20.0),
            primary_state_tax_pct: Some(5.0),
            variable_monthly_income: Some(dec!(1000)),
            variable_fed_tax_pct: Some(20.0),
            variable_state_tax_pct: Some(5.0),
            secondary_monthly_income: Some(dec!(0)),
            secondary_fed_tax_pct: Some(0.0),
            secondary_state_tax_pct: Some(0.0),
            ..FinancialProfile::default()
        }
    }

    #[test]
    fn computes_monthly_nets_and_effective_rate() {
        let (profile, _) = recompute(income_profile());
        let summary = FinancialSummary::of(&profile);

        assert_eq!(summary.primary_monthly_net, Some(dec!(7500)));
        assert_eq!(summary.variable_monthly_net, Some(dec!(750)));
        assert_eq!(summary.total_monthly_net, Some(dec!(8250)));
        // 100 - (8250 * 12 / 132000) * 100 = 25
        assert_eq!(summary.annual_net_of_tax_pct, Some(dec!(25)));
    }

    #[test]
    fn effective_rate_absent_without_income() {
        let mut profile = income_profile();
        profile.primary_annual_income = Some(dec!(0));
        profile.variable_monthly_income = Some(dec!(0));
        let (profile, _) = recompute(profile);

        let summary = FinancialSummary::of(&profile);

        assert_eq!(summary.total_monthly_net, Some(dec!(0)));
        assert_eq!(summary.annual_net_of_tax_pct, None);
    }

    #[test]
    fn missing_rate_blanks_only_that_stream() {
        let mut profile = income_profile();
        profile.variable_state_tax_pct = None;

        let summary = FinancialSummary::of(&profile);

        assert!(summary.primary_monthly_net.is_some());
        assert_eq!(summary.variable_monthly_net, None);
        assert_eq!(summary.total_monthly_net, None);
        assert_eq!(summary.total_monthly_expenses, None);
    }

    #[test]
    fn overflowing_totals_are_absent() {
        let profile = FinancialProfile {
            housing_expense_monthly: Some(Decimal::MAX),
            other_fixed_expense_monthly: Some(Decimal::MAX),
            other_variable_expense_monthly: Some(dec!(1)),
            retirement_savings_monthly: Some(dec!(10)),
            market_savings_monthly: Some(dec!(5)),
            ..FinancialProfile::default()
        };

        let summary = FinancialSummary::of(&profile);

        assert_eq!(summary.total_monthly_expenses, None);
        assert_eq!(summary.total_monthly_savings, Some(dec!(15)));
    }
}
