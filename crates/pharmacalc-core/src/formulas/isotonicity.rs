//! Tonicity adjustment by the sodium chloride equivalent (E-value) method.

use super::require_positive;
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};

/// Grams of NaCl per mL of an isotonic (0.9 %) solution.
pub const ISOTONIC_NACL_G_PER_ML: f64 = 0.009;

/// Sodium chloride equivalents of common ophthalmic and parenteral solutes.
pub const E_VALUES: &[(&str, f64)] = &[
    ("atropine sulfate", 0.13),
    ("boric acid", 0.50),
    ("dextrose monohydrate", 0.16),
    ("ephedrine sulfate", 0.23),
    ("phenylephrine hydrochloride", 0.32),
    ("pilocarpine hydrochloride", 0.24),
    ("potassium chloride", 0.76),
    ("procaine hydrochloride", 0.21),
    ("tetracaine hydrochloride", 0.18),
    ("zinc sulfate", 0.15),
];

/// Look up a tabulated E-value by name (case-insensitive).
pub fn e_value(name: &str) -> Option<f64> {
    let lower = name.trim().to_lowercase();
    E_VALUES
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, e)| *e)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub grams: f64,
    pub e_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tonicity {
    Hypotonic,
    Isotonic,
    Hypertonic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TonicityAdjustment {
    /// NaCl that would make the whole volume isotonic on its own.
    pub nacl_for_volume_g: f64,
    /// NaCl already represented by the ingredients.
    pub ingredient_equivalent_g: f64,
    /// NaCl to add; zero when the ingredients alone reach isotonicity.
    pub nacl_required_g: f64,
    /// Tonicity of the solution before any NaCl is added.
    pub tonicity: Tonicity,
}

/// NaCl needed to make `volume_ml` of solution isotonic:
/// `0.009 × V − Σ(grams × E)`.
pub fn sodium_chloride_adjustment(
    volume_ml: f64,
    ingredients: &[Ingredient],
) -> Result<TonicityAdjustment, PharmacalcError> {
    require_positive("volume_ml", volume_ml)?;
    for ing in ingredients {
        require_positive(&format!("{} grams", ing.name), ing.grams)?;
        require_positive(&format!("{} e_value", ing.name), ing.e_value)?;
    }

    let nacl_for_volume_g = ISOTONIC_NACL_G_PER_ML * volume_ml;
    let ingredient_equivalent_g: f64 = ingredients.iter().map(|i| i.grams * i.e_value).sum();
    let difference = nacl_for_volume_g - ingredient_equivalent_g;

    let tonicity = if difference.abs() < 1e-9 {
        Tonicity::Isotonic
    } else if difference > 0.0 {
        Tonicity::Hypotonic
    } else {
        Tonicity::Hypertonic
    };

    Ok(TonicityAdjustment {
        nacl_for_volume_g,
        ingredient_equivalent_g,
        nacl_required_g: difference.max(0.0),
        tonicity,
    })
}
