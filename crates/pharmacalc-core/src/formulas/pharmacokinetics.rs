//! First-order elimination: clearance, elimination rate and half-life.

use super::{require_non_negative, require_positive};
use crate::error::PharmacalcError;

/// ln 2 as used in the clinical half-life formulas.
pub const LN_2: f64 = 0.693;

/// `CL = dose / AUC`. Dose in mg, AUC in mg·h/L, result in L/h.
pub fn clearance_from_auc(dose_mg: f64, auc_mg_h_per_l: f64) -> Result<f64, PharmacalcError> {
    require_positive("dose_mg", dose_mg)?;
    require_positive("auc", auc_mg_h_per_l)?;
    Ok(dose_mg / auc_mg_h_per_l)
}

/// `CL = k × Vd`. k in 1/h, Vd in L, result in L/h.
pub fn clearance_from_elimination(
    elimination_constant: f64,
    volume_of_distribution_l: f64,
) -> Result<f64, PharmacalcError> {
    require_positive("elimination_constant", elimination_constant)?;
    require_positive("volume_of_distribution_l", volume_of_distribution_l)?;
    Ok(elimination_constant * volume_of_distribution_l)
}

/// `t½ = 0.693 / k`.
pub fn half_life_from_k(elimination_constant: f64) -> Result<f64, PharmacalcError> {
    require_positive("elimination_constant", elimination_constant)?;
    Ok(LN_2 / elimination_constant)
}

/// `t½ = 0.693 × Vd / CL`.
pub fn half_life_from_clearance(
    volume_of_distribution_l: f64,
    clearance_l_h: f64,
) -> Result<f64, PharmacalcError> {
    require_positive("volume_of_distribution_l", volume_of_distribution_l)?;
    require_positive("clearance_l_h", clearance_l_h)?;
    Ok(LN_2 * volume_of_distribution_l / clearance_l_h)
}

/// Elimination rate constant from two concentrations on the decline:
/// `k = ln(C1 / C2) / Δt`.
pub fn elimination_constant(c1: f64, c2: f64, elapsed_h: f64) -> Result<f64, PharmacalcError> {
    require_positive("c1", c1)?;
    require_positive("c2", c2)?;
    require_positive("elapsed_h", elapsed_h)?;
    if c2 >= c1 {
        return Err(PharmacalcError::invalid_input(
            "c2",
            c2,
            "second concentration must be lower than the first",
        ));
    }
    Ok((c1 / c2).ln() / elapsed_h)
}

/// Fraction of drug left after `elapsed` time: `(1/2)^(elapsed / t½)`.
pub fn fraction_remaining(elapsed: f64, half_life: f64) -> Result<f64, PharmacalcError> {
    require_non_negative("elapsed", elapsed)?;
    require_positive("half_life", half_life)?;
    Ok(0.5f64.powf(elapsed / half_life))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearance() {
        assert_eq!(clearance_from_auc(500.0, 50.0).unwrap(), 10.0);
        assert!((clearance_from_elimination(0.1, 40.0).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_life() {
        assert!((half_life_from_k(0.0693).unwrap() - 10.0).abs() < 1e-9);
        assert!((half_life_from_clearance(40.0, 4.0).unwrap() - 6.93).abs() < 1e-9);
    }

    #[test]
    fn test_elimination_constant_from_levels() {
        // Concentration halves in 4 h
        let k = elimination_constant(20.0, 10.0, 4.0).unwrap();
        assert!((k - std::f64::consts::LN_2 / 4.0).abs() < 1e-12);
        assert!(elimination_constant(10.0, 20.0, 4.0).is_err());
    }

    #[test]
    fn test_fraction_remaining() {
        assert_eq!(fraction_remaining(0.0, 6.0).unwrap(), 1.0);
        assert!((fraction_remaining(18.0, 6.0).unwrap() - 0.125).abs() < 1e-12);
        assert!(fraction_remaining(-1.0, 6.0).is_err());
    }

    #[test]
    fn test_zero_rejected() {
        assert!(half_life_from_k(0.0).is_err());
        assert!(clearance_from_auc(100.0, 0.0).is_err());
    }
}
