use super::require_positive;
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};

/// Common electrolyte salts with the constants needed for mEq/mmol/mOsmol
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Electrolyte {
    SodiumChloride,
    PotassiumChloride,
    CalciumChlorideDihydrate,
    MagnesiumSulfateHeptahydrate,
    SodiumBicarbonate,
    PotassiumAcetate,
    SodiumAcetate,
}

impl Electrolyte {
    pub const ALL: [Electrolyte; 7] = [
        Electrolyte::SodiumChloride,
        Electrolyte::PotassiumChloride,
        Electrolyte::CalciumChlorideDihydrate,
        Electrolyte::MagnesiumSulfateHeptahydrate,
        Electrolyte::SodiumBicarbonate,
        Electrolyte::PotassiumAcetate,
        Electrolyte::SodiumAcetate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Electrolyte::SodiumChloride => "Sodium chloride (NaCl)",
            Electrolyte::PotassiumChloride => "Potassium chloride (KCl)",
            Electrolyte::CalciumChlorideDihydrate => "Calcium chloride dihydrate (CaCl2·2H2O)",
            Electrolyte::MagnesiumSulfateHeptahydrate => "Magnesium sulfate (MgSO4·7H2O)",
            Electrolyte::SodiumBicarbonate => "Sodium bicarbonate (NaHCO3)",
            Electrolyte::PotassiumAcetate => "Potassium acetate (CH3COOK)",
            Electrolyte::SodiumAcetate => "Sodium acetate (CH3COONa)",
        }
    }

    /// Molecular weight in g/mol.
    pub fn molecular_weight(self) -> f64 {
        match self {
            Electrolyte::SodiumChloride => 58.44,
            Electrolyte::PotassiumChloride => 74.55,
            Electrolyte::CalciumChlorideDihydrate => 147.01,
            Electrolyte::MagnesiumSulfateHeptahydrate => 246.47,
            Electrolyte::SodiumBicarbonate => 84.01,
            Electrolyte::PotassiumAcetate => 98.14,
            Electrolyte::SodiumAcetate => 82.03,
        }
    }

    /// Total valence of the cation.
    pub fn valence(self) -> u32 {
        match self {
            Electrolyte::CalciumChlorideDihydrate | Electrolyte::MagnesiumSulfateHeptahydrate => 2,
            _ => 1,
        }
    }

    /// Particles formed on complete dissociation.
    pub fn particles(self) -> u32 {
        match self {
            Electrolyte::CalciumChlorideDihydrate => 3,
            _ => 2,
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Electrolyte> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "nacl" | "sodium_chloride" => Some(Electrolyte::SodiumChloride),
            "kcl" | "potassium_chloride" => Some(Electrolyte::PotassiumChloride),
            "cacl2" | "calcium_chloride" => Some(Electrolyte::CalciumChlorideDihydrate),
            "mgso4" | "magnesium_sulfate" => Some(Electrolyte::MagnesiumSulfateHeptahydrate),
            "nahco3" | "sodium_bicarbonate" => Some(Electrolyte::SodiumBicarbonate),
            "k_acetate" | "potassium_acetate" => Some(Electrolyte::PotassiumAcetate),
            "na_acetate" | "sodium_acetate" => Some(Electrolyte::SodiumAcetate),
            _ => None,
        }
    }
}

/// Milliequivalents from a mass: `mEq = mg × valence / MW`.
pub fn mg_to_meq(mg: f64, molecular_weight: f64, valence: u32) -> Result<f64, PharmacalcError> {
    require_positive("mg", mg)?;
    require_positive("molecular_weight", molecular_weight)?;
    require_valence(valence)?;
    Ok(mg * f64::from(valence) / molecular_weight)
}

/// Mass needed for a number of milliequivalents: `mg = mEq × MW / valence`.
pub fn meq_to_mg(meq: f64, molecular_weight: f64, valence: u32) -> Result<f64, PharmacalcError> {
    require_positive("meq", meq)?;
    require_positive("molecular_weight", molecular_weight)?;
    require_valence(valence)?;
    Ok(meq * molecular_weight / f64::from(valence))
}

pub fn mg_to_mmol(mg: f64, molecular_weight: f64) -> Result<f64, PharmacalcError> {
    require_positive("mg", mg)?;
    require_positive("molecular_weight", molecular_weight)?;
    Ok(mg / molecular_weight)
}

/// Ideal milliosmoles, assuming complete dissociation.
pub fn mmol_to_mosmol(mmol: f64, particles: u32) -> Result<f64, PharmacalcError> {
    require_positive("mmol", mmol)?;
    if particles == 0 {
        return Err(PharmacalcError::invalid_input(
            "particles",
            particles,
            "must be at least 1",
        ));
    }
    Ok(mmol * f64::from(particles))
}

/// All three expressions for a mass of a tabulated salt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteAmount {
    pub mg: f64,
    pub meq: f64,
    pub mmol: f64,
    pub mosmol: f64,
}

pub fn amount_of(electrolyte: Electrolyte, mg: f64) -> Result<ElectrolyteAmount, PharmacalcError> {
    let mw = electrolyte.molecular_weight();
    let mmol = mg_to_mmol(mg, mw)?;
    Ok(ElectrolyteAmount {
        mg,
        meq: mg_to_meq(mg, mw, electrolyte.valence())?,
        mmol,
        mosmol: mmol_to_mosmol(mmol, electrolyte.particles())?,
    })
}

fn require_valence(valence: u32) -> Result<(), PharmacalcError> {
    if valence == 0 {
        return Err(PharmacalcError::invalid_input(
            "valence",
            valence,
            "must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::round_display;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kcl_meq() {
        // 1 g KCl is about 13.4 mEq K+
        let meq = mg_to_meq(1000.0, 74.55, 1).unwrap();
        assert_eq!(round_display(meq, 1), Some(dec!(13.4)));
    }

    #[test]
    fn test_calcium_chloride_amount() {
        let amt = amount_of(Electrolyte::CalciumChlorideDihydrate, 147.01).unwrap();
        assert!((amt.mmol - 1.0).abs() < 1e-12);
        assert!((amt.meq - 2.0).abs() < 1e-12);
        assert!((amt.mosmol - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_meq_round_trip_through_mass() {
        let mg = meq_to_mg(40.0, 74.55, 1).unwrap();
        assert!((mg - 2982.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(mg_to_meq(0.0, 58.44, 1).is_err());
        assert!(mg_to_meq(100.0, 58.44, 0).is_err());
        assert!(mg_to_mmol(100.0, -1.0).is_err());
        assert!(mmol_to_mosmol(1.0, 0).is_err());
    }

    #[test]
    fn test_from_str_loose() {
        assert_eq!(
            Electrolyte::from_str_loose("KCl"),
            Some(Electrolyte::PotassiumChloride)
        );
        assert_eq!(
            Electrolyte::from_str_loose("sodium bicarbonate"),
            Some(Electrolyte::SodiumBicarbonate)
        );
    }
}
