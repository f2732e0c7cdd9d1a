//! Ash values of crude drugs, as a percentage of the air-dried sample.

use super::{require_non_negative, require_positive};
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AshValues {
    pub total_ash_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acid_insoluble_ash_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_soluble_ash_pct: Option<f64>,
}

/// Residue weight as a percentage of the sample weight.
pub fn ash_percent(ash_g: f64, sample_g: f64) -> Result<f64, PharmacalcError> {
    require_non_negative("ash_g", ash_g)?;
    require_positive("sample_g", sample_g)?;
    if ash_g > sample_g {
        return Err(PharmacalcError::invalid_input(
            "ash_g",
            ash_g,
            "ash cannot weigh more than the sample",
        ));
    }
    Ok(ash_g / sample_g * 100.0)
}

/// Total ash, plus acid-insoluble ash and water-soluble ash when the
/// respective residues were weighed.
///
/// Water-soluble ash is the total ash less the water-insoluble residue.
pub fn ash_values(
    sample_g: f64,
    total_ash_g: f64,
    acid_insoluble_g: Option<f64>,
    water_insoluble_g: Option<f64>,
) -> Result<AshValues, PharmacalcError> {
    let total_ash_pct = ash_percent(total_ash_g, sample_g)?;

    let acid_insoluble_ash_pct = acid_insoluble_g
        .map(|g| residue_of_total("acid_insoluble_g", g, total_ash_g, sample_g))
        .transpose()?;

    let water_soluble_ash_pct = water_insoluble_g
        .map(|g| {
            residue_of_total("water_insoluble_g", g, total_ash_g, sample_g)?;
            ash_percent(total_ash_g - g, sample_g)
        })
        .transpose()?;

    Ok(AshValues {
        total_ash_pct,
        acid_insoluble_ash_pct,
        water_soluble_ash_pct,
    })
}

fn residue_of_total(
    field: &str,
    residue_g: f64,
    total_ash_g: f64,
    sample_g: f64,
) -> Result<f64, PharmacalcError> {
    require_non_negative(field, residue_g)?;
    if residue_g > total_ash_g {
        return Err(PharmacalcError::invalid_input(
            field,
            residue_g,
            "residue cannot exceed the total ash",
        ));
    }
    ash_percent(residue_g, sample_g)
}
