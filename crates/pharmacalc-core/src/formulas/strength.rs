use super::{require_finite, require_positive};
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ways of expressing the strength of a solution (weight in volume).
///
/// Ratio strength `1:x` means 1 g of solute in `x` mL of solution; the
/// value passed for it is `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthUnit {
    PercentWv,
    MgPerMl,
    McgPerMl,
    Ppm,
    Ratio,
}

impl StrengthUnit {
    pub fn from_str_loose(s: &str) -> Option<StrengthUnit> {
        match s.trim().to_lowercase().replace(' ', "").as_str() {
            "%" | "%w/v" | "percent" | "percent_wv" => Some(StrengthUnit::PercentWv),
            "mg/ml" | "mg_per_ml" => Some(StrengthUnit::MgPerMl),
            "mcg/ml" | "µg/ml" | "ug/ml" | "mcg_per_ml" => Some(StrengthUnit::McgPerMl),
            "ppm" => Some(StrengthUnit::Ppm),
            "ratio" | "1:x" => Some(StrengthUnit::Ratio),
            _ => None,
        }
    }

    fn to_mg_per_ml(self, value: f64) -> f64 {
        match self {
            StrengthUnit::PercentWv => value * 10.0,
            StrengthUnit::MgPerMl => value,
            StrengthUnit::McgPerMl | StrengthUnit::Ppm => value / 1000.0,
            StrengthUnit::Ratio => 1000.0 / value,
        }
    }

    fn express(self, mg_per_ml: f64) -> f64 {
        match self {
            StrengthUnit::PercentWv => mg_per_ml / 10.0,
            StrengthUnit::MgPerMl => mg_per_ml,
            StrengthUnit::McgPerMl | StrengthUnit::Ppm => mg_per_ml * 1000.0,
            StrengthUnit::Ratio => 1000.0 / mg_per_ml,
        }
    }
}

impl fmt::Display for StrengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthUnit::PercentWv => write!(f, "% w/v"),
            StrengthUnit::MgPerMl => write!(f, "mg/mL"),
            StrengthUnit::McgPerMl => write!(f, "mcg/mL"),
            StrengthUnit::Ppm => write!(f, "ppm"),
            StrengthUnit::Ratio => write!(f, "1:x"),
        }
    }
}

/// Convert a strength from one expression to another via mg/mL.
pub fn convert(value: f64, from: StrengthUnit, to: StrengthUnit) -> Result<f64, PharmacalcError> {
    require_positive("strength", value)?;
    require_finite("converted strength", to.express(from.to_mg_per_ml(value)))
}
