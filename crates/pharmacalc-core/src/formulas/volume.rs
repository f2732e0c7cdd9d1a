use super::{require_finite, require_non_negative};
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Volume units used on prescriptions and household measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Microliter,
    Milliliter,
    Liter,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 10] = [
        VolumeUnit::Microliter,
        VolumeUnit::Milliliter,
        VolumeUnit::Liter,
        VolumeUnit::Teaspoon,
        VolumeUnit::Tablespoon,
        VolumeUnit::FluidOunce,
        VolumeUnit::Cup,
        VolumeUnit::Pint,
        VolumeUnit::Quart,
        VolumeUnit::Gallon,
    ];

    /// Millilitres in one unit (US measures).
    pub fn milliliters(self) -> f64 {
        match self {
            VolumeUnit::Microliter => 0.001,
            VolumeUnit::Milliliter => 1.0,
            VolumeUnit::Liter => 1000.0,
            VolumeUnit::Teaspoon => 5.0,
            VolumeUnit::Tablespoon => 15.0,
            VolumeUnit::FluidOunce => 29.5735,
            VolumeUnit::Cup => 240.0,
            VolumeUnit::Pint => 473.176,
            VolumeUnit::Quart => 946.353,
            VolumeUnit::Gallon => 3785.41,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Microliter => "µL",
            VolumeUnit::Milliliter => "mL",
            VolumeUnit::Liter => "L",
            VolumeUnit::Teaspoon => "tsp",
            VolumeUnit::Tablespoon => "tbsp",
            VolumeUnit::FluidOunce => "fl oz",
            VolumeUnit::Cup => "cup",
            VolumeUnit::Pint => "pt",
            VolumeUnit::Quart => "qt",
            VolumeUnit::Gallon => "gal",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<VolumeUnit> {
        let lower = s.trim().to_lowercase().replace(['.', ' '], "");
        match lower.as_str() {
            "ul" | "µl" | "mcl" | "microliter" | "microlitre" => Some(VolumeUnit::Microliter),
            "ml" | "cc" | "milliliter" | "millilitre" => Some(VolumeUnit::Milliliter),
            "l" | "liter" | "litre" => Some(VolumeUnit::Liter),
            "tsp" | "teaspoon" => Some(VolumeUnit::Teaspoon),
            "tbsp" | "tablespoon" => Some(VolumeUnit::Tablespoon),
            "floz" | "oz" | "fluidounce" => Some(VolumeUnit::FluidOunce),
            "cup" => Some(VolumeUnit::Cup),
            "pt" | "pint" => Some(VolumeUnit::Pint),
            "qt" | "quart" => Some(VolumeUnit::Quart),
            "gal" | "gallon" => Some(VolumeUnit::Gallon),
            _ => None,
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn convert(value: f64, from: VolumeUnit, to: VolumeUnit) -> Result<f64, PharmacalcError> {
    require_non_negative("volume", value)?;
    require_finite("converted volume", value * from.milliliters() / to.milliliters())
}
