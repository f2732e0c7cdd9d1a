//! Pharmacy calculation formulas.
//!
//! Each calculator is an independent pure function. Inputs are checked
//! before any arithmetic runs: NaN, infinite, zero or negative values where
//! the formula needs a positive magnitude return
//! [`PharmacalcError::InvalidInput`] instead of a silently wrong number.

pub mod ash;
pub mod bsa;
pub mod child_pugh;
pub mod electrolyte;
pub mod isotonicity;
pub mod normality;
pub mod pharmacokinetics;
pub mod purity;
pub mod renal;
pub mod strength;
pub mod temperature;
pub mod volume;

use crate::error::PharmacalcError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a computed value for display, half away from zero.
///
/// Returns `None` for NaN or infinite values.
pub fn round_display(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<f64, PharmacalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PharmacalcError::invalid_input(field, value, "must be a number"))
    }
}

pub(crate) fn require_positive(field: &str, value: f64) -> Result<f64, PharmacalcError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PharmacalcError::invalid_input(
            field,
            value,
            "must be greater than zero",
        ))
    }
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<f64, PharmacalcError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(PharmacalcError::invalid_input(
            field,
            value,
            "must not be negative",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(133.680_555, 2), Some(dec!(133.68)));
        assert_eq!(round_display(2.5, 0), Some(dec!(3)));
        assert_eq!(round_display(-2.5, 0), Some(dec!(-3)));
        assert_eq!(round_display(f64::NAN, 2), None);
    }

    #[test]
    fn test_guards() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -0.1).is_err());
        assert!(require_finite("x", f64::INFINITY).is_err());
        assert!(require_finite("x", -40.0).is_ok());
    }
}
