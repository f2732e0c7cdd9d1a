use super::require_positive;
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn from_str_loose(s: &str) -> Option<Sex> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Sex::Male),
            "f" | "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Kidney function band shared by CrCl and GFR results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenalFunction {
    /// G1, >= 90
    Normal,
    /// G2, 60-89
    MildlyDecreased,
    /// G3a, 45-59
    MildToModeratelyDecreased,
    /// G3b, 30-44
    ModeratelyToSeverelyDecreased,
    /// G4, 15-29
    SeverelyDecreased,
    /// G5, < 15
    KidneyFailure,
}

impl RenalFunction {
    pub fn from_rate(ml_min: f64) -> RenalFunction {
        match ml_min {
            r if r >= 90.0 => RenalFunction::Normal,
            r if r >= 60.0 => RenalFunction::MildlyDecreased,
            r if r >= 45.0 => RenalFunction::MildToModeratelyDecreased,
            r if r >= 30.0 => RenalFunction::ModeratelyToSeverelyDecreased,
            r if r >= 15.0 => RenalFunction::SeverelyDecreased,
            _ => RenalFunction::KidneyFailure,
        }
    }

    /// KDIGO stage label.
    pub fn stage(self) -> &'static str {
        match self {
            RenalFunction::Normal => "G1",
            RenalFunction::MildlyDecreased => "G2",
            RenalFunction::MildToModeratelyDecreased => "G3a",
            RenalFunction::ModeratelyToSeverelyDecreased => "G3b",
            RenalFunction::SeverelyDecreased => "G4",
            RenalFunction::KidneyFailure => "G5",
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            RenalFunction::Normal => "Normal or high kidney function",
            RenalFunction::MildlyDecreased => "Mildly decreased kidney function",
            RenalFunction::MildToModeratelyDecreased => {
                "Mildly to moderately decreased; review renally cleared drug doses"
            }
            RenalFunction::ModeratelyToSeverelyDecreased => {
                "Moderately to severely decreased; dose adjustment usually required"
            }
            RenalFunction::SeverelyDecreased => {
                "Severely decreased; avoid nephrotoxic drugs and adjust doses"
            }
            RenalFunction::KidneyFailure => "Kidney failure; specialist dosing required",
        }
    }
}

impl fmt::Display for RenalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.stage(), self.interpretation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenalResult {
    /// mL/min (CrCl) or mL/min/1.73 m² (GFR).
    pub value: f64,
    pub function: RenalFunction,
}

/// Cockcroft-Gault creatinine clearance in mL/min.
///
/// `CrCl = (140 - age) × weight / (72 × SCr)`, × 0.85 for females.
pub fn creatinine_clearance(
    age_years: f64,
    weight_kg: f64,
    serum_creatinine_mg_dl: f64,
    sex: Sex,
) -> Result<RenalResult, PharmacalcError> {
    require_positive("age_years", age_years)?;
    require_positive("weight_kg", weight_kg)?;
    require_positive("serum_creatinine_mg_dl", serum_creatinine_mg_dl)?;
    if age_years >= 140.0 {
        return Err(PharmacalcError::invalid_input(
            "age_years",
            age_years,
            "must be below 140 for Cockcroft-Gault",
        ));
    }

    let mut crcl = (140.0 - age_years) * weight_kg / (72.0 * serum_creatinine_mg_dl);
    if sex == Sex::Female {
        crcl *= 0.85;
    }
    Ok(RenalResult {
        value: crcl,
        function: RenalFunction::from_rate(crcl),
    })
}

/// MDRD (IDMS-traceable) estimated GFR in mL/min/1.73 m².
///
/// `175 × SCr^-1.154 × age^-0.203`, × 0.742 if female, × 1.212 if Black.
pub fn gfr_mdrd(
    age_years: f64,
    serum_creatinine_mg_dl: f64,
    sex: Sex,
    black: bool,
) -> Result<RenalResult, PharmacalcError> {
    require_positive("age_years", age_years)?;
    require_positive("serum_creatinine_mg_dl", serum_creatinine_mg_dl)?;

    let mut gfr = 175.0 * serum_creatinine_mg_dl.powf(-1.154) * age_years.powf(-0.203);
    if sex == Sex::Female {
        gfr *= 0.742;
    }
    if black {
        gfr *= 1.212;
    }
    Ok(RenalResult {
        value: gfr,
        function: RenalFunction::from_rate(gfr),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::round_display;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cockcroft_gault_reference() {
        let r = creatinine_clearance(30.0, 70.0, 0.8, Sex::Male).unwrap();
        assert_eq!(round_display(r.value, 2), Some(dec!(133.68)));
        assert_eq!(r.function, RenalFunction::Normal);
    }

    #[test]
    fn test_cockcroft_gault_female() {
        let male = creatinine_clearance(65.0, 60.0, 1.2, Sex::Male).unwrap();
        let female = creatinine_clearance(65.0, 60.0, 1.2, Sex::Female).unwrap();
        assert!((female.value - male.value * 0.85).abs() < 1e-9);
        // (75 × 60) / 86.4 = 52.08
        assert_eq!(round_display(male.value, 2), Some(dec!(52.08)));
        assert_eq!(male.function, RenalFunction::MildToModeratelyDecreased);
    }

    #[test]
    fn test_cockcroft_gault_guards() {
        assert!(creatinine_clearance(140.0, 70.0, 1.0, Sex::Male).is_err());
        assert!(creatinine_clearance(30.0, 70.0, 0.0, Sex::Male).is_err());
        assert!(creatinine_clearance(30.0, f64::NAN, 1.0, Sex::Male).is_err());
    }

    #[test]
    fn test_mdrd() {
        // SCr 1.0 leaves 175 × age^-0.203
        let r = gfr_mdrd(50.0, 1.0, Sex::Male, false).unwrap();
        let expected = 175.0 * 50f64.powf(-0.203);
        assert!((r.value - expected).abs() < 1e-9);
        assert_eq!(r.function, RenalFunction::MildlyDecreased);

        let f = gfr_mdrd(50.0, 1.0, Sex::Female, true).unwrap();
        assert!((f.value - expected * 0.742 * 1.212).abs() < 1e-9);
    }

    #[test]
    fn test_function_bands() {
        assert_eq!(RenalFunction::from_rate(90.0).stage(), "G1");
        assert_eq!(RenalFunction::from_rate(59.9).stage(), "G3a");
        assert_eq!(RenalFunction::from_rate(30.0).stage(), "G3b");
        assert_eq!(RenalFunction::from_rate(14.9).stage(), "G5");
    }
}
