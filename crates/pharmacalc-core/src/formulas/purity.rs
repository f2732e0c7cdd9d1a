use super::{require_non_negative, require_positive};
use crate::error::PharmacalcError;

/// `purity = pure substance / sample × 100`.
pub fn percent_purity(pure_g: f64, sample_g: f64) -> Result<f64, PharmacalcError> {
    require_non_negative("pure_g", pure_g)?;
    require_positive("sample_g", sample_g)?;
    if pure_g > sample_g {
        return Err(PharmacalcError::invalid_input(
            "pure_g",
            pure_g,
            "pure substance cannot exceed the sample weight",
        ));
    }
    Ok(pure_g / sample_g * 100.0)
}

/// Weight of impure material that supplies `required_g` of pure substance.
pub fn weight_for_purity(required_g: f64, purity_pct: f64) -> Result<f64, PharmacalcError> {
    require_positive("required_g", required_g)?;
    require_positive("purity_pct", purity_pct)?;
    if purity_pct > 100.0 {
        return Err(PharmacalcError::invalid_input(
            "purity_pct",
            purity_pct,
            "must not exceed 100",
        ));
    }
    Ok(required_g * 100.0 / purity_pct)
}
