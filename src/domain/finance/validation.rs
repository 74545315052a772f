//! Input validation for financial values before they reach `recompute`.

use rust_decimal::Decimal;

use super::{CurrencyWidth, DerivedField, FinancialProfile};
use crate::domain::foundation::ValidationError;

const MAX_DECIMAL_PLACES: u32 = 2;

/// Checks a whole-number tax percentage.
pub fn validate_tax_pct(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::out_of_range(field, 0, 100, value));
    }
    Ok(())
}

/// Checks a currency amount against its `NUMERIC(precision, 2)` column.
pub fn validate_currency(
    field: &str,
    value: Decimal,
    width: CurrencyWidth,
) -> Result<(), ValidationError> {
    let normalized = value.normalize();
    if normalized.scale() > MAX_DECIMAL_PLACES {
        return Err(ValidationError::invalid_format(
            field,
            format!("Ensure that there are no more than {} decimal places.", MAX_DECIMAL_PLACES),
        ));
    }

    let integer_digits = width.precision() - MAX_DECIMAL_PLACES;
    let limit = Decimal::from(10i64.pow(integer_digits));
    if normalized.abs() >= limit {
        return Err(ValidationError::invalid_format(
            field,
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                integer_digits
            ),
        ));
    }
    Ok(())
}

impl FinancialProfile {
    /// Validates every present input; derived fields are not checked.
    pub fn validate_inputs(&self) -> Result<(), ValidationError> {
        for (field, value) in self.tax_inputs() {
            if let Some(value) = value {
                validate_tax_pct(field, value)?;
            }
        }
        for (field, value, width) in self.currency_inputs() {
            if let Some(value) = value {
                validate_currency(field, value, width)?;
            }
        }
        Ok(())
    }

    /// Checks that recomputed values fit their columns.
    ///
    /// Inputs that each fit their own column can still sum past a derived
    /// column's width; the error names the derived field.
    pub fn validate_outputs(&self) -> Result<(), ValidationError> {
        for field in DerivedField::ALL {
            let Some(value) = field.value(self) else { continue };
            if validate_currency(field.column(), value, field.width()).is_err() {
                let integer_digits = field.width().precision() - MAX_DECIMAL_PLACES;
                return Err(ValidationError::invalid_format(
                    field.column(),
                    format!(
                        "Computed value exceeds {} digits before the decimal point; reduce the amounts it is derived from.",
                        integer_digits
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tax_pct_bounds() {
        assert!(validate_tax_pct("primary_fed_tax_pct", 0.0).is_ok());
        assert!(validate_tax_pct("primary_fed_tax_pct", 100.0).is_ok());
        assert!(validate_tax_pct("primary_fed_tax_pct", 100.5).is_err());
        assert!(validate_tax_pct("primary_fed_tax_pct", -1.0).is_err());
        assert!(validate_tax_pct("primary_fed_tax_pct", f64::INFINITY).is_err());
    }

    #[test]
    fn currency_rejects_sub_cent_precision() {
        let err = validate_currency("misc_assets", dec!(1.005), CurrencyWidth::Standard).unwrap_err();
        assert_eq!(err.field(), "misc_assets");
        assert!(validate_currency("misc_assets", dec!(1.500), CurrencyWidth::Standard).is_ok());
    }

    #[test]
    fn currency_respects_column_width() {
        let ten_digits = dec!(9999999999.99);
        let eleven_digits = dec!(10000000000);

        assert!(validate_currency("misc_assets", ten_digits, CurrencyWidth::Standard).is_ok());
        assert!(validate_currency("misc_assets", eleven_digits, CurrencyWidth::Standard).is_err());
        assert!(validate_currency("property_assets", eleven_digits, CurrencyWidth::Wide).is_ok());
    }

    #[test]
    fn validate_inputs_reports_first_bad_field() {
        let profile = FinancialProfile {
            secondary_state_tax_pct: Some(250.0),
            ..FinancialProfile::default()
        };

        let err = profile.validate_inputs().unwrap_err();
        assert_eq!(err.field(), "secondary_state_tax_pct");
    }

    #[test]
    fn outputs_that_outgrow_their_columns_are_rejected() {
        let max_standard = dec!(9999999999.99);
        let max_wide = dec!(999999999999.99);
        let profile = FinancialProfile {
            primary_annual_income: Some(max_standard),
            variable_monthly_income: Some(max_standard),
            secondary_monthly_income: Some(max_standard),
            ..FinancialProfile::default()
        };
        assert!(profile.validate_inputs().is_ok());

        let (profile, _) = crate::domain::finance::recompute(profile);
        let err = profile.validate_outputs().unwrap_err();
        assert_eq!(err.field(), "total_annual_income");

        let assets = FinancialProfile {
            savings_assets: Some(max_wide),
            property_assets: Some(max_wide),
            misc_assets: Some(max_standard),
            ..FinancialProfile::default()
        };
        let (assets, _) = crate::domain::finance::recompute(assets);
        assert_eq!(assets.validate_outputs().unwrap_err().field(), "total_assets");
    }

    #[test]
    fn ordinary_outputs_pass() {
        let profile = FinancialProfile {
            savings_assets: Some(dec!(100000)),
            property_assets: Some(dec!(1100)),
            misc_assets: Some(dec!(1100)),
            loan_liabilities: Some(dec!(1100)),
            credit_card_liabilities: Some(dec!(1100)),
            misc_liabilities: Some(dec!(1100)),
            ..FinancialProfile::default()
        };
        let (profile, _) = crate::domain::finance::recompute(profile);
        assert!(profile.validate_outputs().is_ok());
    }
}
