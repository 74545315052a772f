//! Financial profile inputs and the derived-field engine.
//!
//! - `profile` - the nullable input and derived field set
//! - `recompute` - pure recomputation of the five derived values
//! - `summary` - presentation-only monthly net figures
//! - `validation` - range and precision checks on inbound values

mod profile;
mod recompute;
mod summary;
mod validation;

pub use profile::{CurrencyWidth, FinancialProfile};
pub use recompute::{recompute, to_cents, ChangedFields, DerivedField};
pub use summary::FinancialSummary;
pub use validation::{validate_currency, validate_tax_pct};
