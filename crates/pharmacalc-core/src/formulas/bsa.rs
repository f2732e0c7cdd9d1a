use super::{require_finite, require_positive};
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BsaMethod {
    #[default]
    Mosteller,
    DuBois,
}

impl fmt::Display for BsaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BsaMethod::Mosteller => write!(f, "Mosteller"),
            BsaMethod::DuBois => write!(f, "DuBois"),
        }
    }
}

/// Body surface area in m² from height (cm) and weight (kg).
///
/// Mosteller: `sqrt(h × w / 3600)`.
/// DuBois: `0.007184 × w^0.425 × h^0.725`.
pub fn body_surface_area(
    height_cm: f64,
    weight_kg: f64,
    method: BsaMethod,
) -> Result<f64, PharmacalcError> {
    require_positive("height_cm", height_cm)?;
    require_positive("weight_kg", weight_kg)?;
    let bsa = match method {
        BsaMethod::Mosteller => (height_cm * weight_kg / 3600.0).sqrt(),
        BsaMethod::DuBois => 0.007184 * weight_kg.powf(0.425) * height_cm.powf(0.725),
    };
    require_finite("body_surface_area", bsa)
}
