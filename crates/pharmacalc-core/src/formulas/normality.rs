use super::require_positive;
use crate::error::PharmacalcError;

/// `Eq. wt = MW / n`, where `n` is the number of replaceable H+/OH- or
/// electrons transferred per formula unit.
pub fn equivalent_weight(molecular_weight: f64, equivalents: u32) -> Result<f64, PharmacalcError> {
    require_positive("molecular_weight", molecular_weight)?;
    require_equivalents(equivalents)?;
    Ok(molecular_weight / f64::from(equivalents))
}

/// Normality of a solution: gram-equivalents of solute per litre.
pub fn normality(
    mass_g: f64,
    molecular_weight: f64,
    equivalents: u32,
    volume_ml: f64,
) -> Result<f64, PharmacalcError> {
    require_positive("mass_g", mass_g)?;
    require_positive("volume_ml", volume_ml)?;
    let eq_wt = equivalent_weight(molecular_weight, equivalents)?;
    Ok((mass_g / eq_wt) / (volume_ml / 1000.0))
}

/// `N = M × n`.
pub fn from_molarity(molarity: f64, equivalents: u32) -> Result<f64, PharmacalcError> {
    require_positive("molarity", molarity)?;
    require_equivalents(equivalents)?;
    Ok(molarity * f64::from(equivalents))
}

fn require_equivalents(equivalents: u32) -> Result<(), PharmacalcError> {
    if equivalents == 0 {
        return Err(PharmacalcError::invalid_input(
            "equivalents",
            equivalents,
            "must be at least 1",
        ));
    }
    Ok(())
}
