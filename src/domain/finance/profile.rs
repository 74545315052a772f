//! The financial field set carried by every user profile.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Directly-entered financial inputs plus the five server-owned derived values.
///
/// Every field is optional. Currency amounts are fixed-point decimals; tax
/// rates are whole-number percentages (`20.0` means 20%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    // Income
    pub primary_annual_income: Option<Decimal>,
    pub primary_fed_tax_pct: Option<f64>,
    pub primary_state_tax_pct: Option<f64>,
    pub variable_monthly_income: Option<Decimal>,
    pub variable_fed_tax_pct: Option<f64>,
    pub variable_state_tax_pct: Option<f64>,
    pub secondary_monthly_income: Option<Decimal>,
    pub secondary_fed_tax_pct: Option<f64>,
    pub secondary_state_tax_pct: Option<f64>,

    // Monthly expenses
    pub housing_expense_monthly: Option<Decimal>,
    pub other_fixed_expense_monthly: Option<Decimal>,
    pub other_variable_expense_monthly: Option<Decimal>,

    // Monthly savings
    pub retirement_savings_monthly: Option<Decimal>,
    pub market_savings_monthly: Option<Decimal>,

    // Net worth
    pub savings_assets: Option<Decimal>,
    pub property_assets: Option<Decimal>,
    pub misc_assets: Option<Decimal>,
    pub loan_liabilities: Option<Decimal>,
    pub credit_card_liabilities: Option<Decimal>,
    pub misc_liabilities: Option<Decimal>,

    // Derived, written only by `recompute`
    pub total_annual_income: Option<Decimal>,
    pub net_monthly_profit_loss: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    pub net_worth: Option<Decimal>,
}

/// Storage width of a currency input, as `NUMERIC(precision, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyWidth {
    /// `NUMERIC(12, 2)`
    Standard,
    /// `NUMERIC(14, 2)`
    Wide,
}

impl CurrencyWidth {
    /// Total digits allowed by the column.
    pub fn precision(self) -> u32 {
        match self {
            CurrencyWidth::Standard => 12,
            CurrencyWidth::Wide => 14,
        }
    }
}

impl FinancialProfile {
    /// Currency inputs with their column names and storage widths.
    pub fn currency_inputs(&self) -> [(&'static str, Option<Decimal>, CurrencyWidth); 14] {
        use CurrencyWidth::{Standard, Wide};
        [
            ("primary_annual_income", self.primary_annual_income, Standard),
            ("variable_monthly_income", self.variable_monthly_income, Standard),
            ("secondary_monthly_income", self.secondary_monthly_income, Standard),
            ("housing_expense_monthly", self.housing_expense_monthly, Standard),
            ("other_fixed_expense_monthly", self.other_fixed_expense_monthly, Standard),
            ("other_variable_expense_monthly", self.other_variable_expense_monthly, Standard),
            ("retirement_savings_monthly", self.retirement_savings_monthly, Standard),
            ("market_savings_monthly", self.market_savings_monthly, Standard),
            ("savings_assets", self.savings_assets, Wide),
            ("property_assets", self.property_assets, Wide),
            ("misc_assets", self.misc_assets, Standard),
            ("loan_liabilities", self.loan_liabilities, Standard),
            ("credit_card_liabilities", self.credit_card_liabilities, Standard),
            ("misc_liabilities", self.misc_liabilities, Standard),
        ]
    }

    /// Tax-rate inputs with their column names.
    pub fn tax_inputs(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("primary_fed_tax_pct", self.primary_fed_tax_pct),
            ("primary_state_tax_pct", self.primary_state_tax_pct),
            ("variable_fed_tax_pct", self.variable_fed_tax_pct),
            ("variable_state_tax_pct", self.variable_state_tax_pct),
            ("secondary_fed_tax_pct", self.secondary_fed_tax_pct),
            ("secondary_state_tax_pct", self.secondary_state_tax_pct),
        ]
    }
}
