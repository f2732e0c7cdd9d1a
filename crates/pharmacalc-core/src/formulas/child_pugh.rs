use super::require_positive;
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grade of a clinically assessed parameter (ascites, encephalopathy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalGrade {
    None,
    /// Mild ascites / grade 1-2 encephalopathy.
    Mild,
    /// Moderate-severe ascites / grade 3-4 encephalopathy.
    Severe,
}

impl ClinicalGrade {
    fn points(self) -> u32 {
        match self {
            ClinicalGrade::None => 1,
            ClinicalGrade::Mild => 2,
            ClinicalGrade::Severe => 3,
        }
    }

    pub fn from_str_loose(s: &str) -> Option<ClinicalGrade> {
        match s.trim().to_lowercase().as_str() {
            "none" | "absent" | "0" => Some(ClinicalGrade::None),
            "mild" | "slight" | "1" | "grade1-2" => Some(ClinicalGrade::Mild),
            "severe" | "moderate" | "2" | "grade3-4" => Some(ClinicalGrade::Severe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChildPughInput {
    /// Total bilirubin, mg/dL.
    pub bilirubin_mg_dl: f64,
    /// Serum albumin, g/dL.
    pub albumin_g_dl: f64,
    pub inr: f64,
    pub ascites: ClinicalGrade,
    pub encephalopathy: ClinicalGrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildPughClass {
    A,
    B,
    C,
}

impl ChildPughClass {
    pub fn interpretation(self) -> &'static str {
        match self {
            ChildPughClass::A => "Well-compensated disease; most drugs need no dose adjustment",
            ChildPughClass::B => {
                "Significant functional compromise; consider dose reduction of hepatically cleared drugs"
            }
            ChildPughClass::C => {
                "Decompensated disease; avoid or substantially reduce hepatically cleared drugs"
            }
        }
    }
}

impl fmt::Display for ChildPughClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildPughClass::A => write!(f, "Class A"),
            ChildPughClass::B => write!(f, "Class B"),
            ChildPughClass::C => write!(f, "Class C"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPughResult {
    pub bilirubin_points: u32,
    pub albumin_points: u32,
    pub inr_points: u32,
    pub ascites_points: u32,
    pub encephalopathy_points: u32,
    pub total: u32,
    pub class: ChildPughClass,
    pub interpretation: String,
}

/// Child-Pugh score: five parameters each scored 1-3, summed to 5-15.
pub fn score(input: &ChildPughInput) -> Result<ChildPughResult, PharmacalcError> {
    require_positive("bilirubin_mg_dl", input.bilirubin_mg_dl)?;
    require_positive("albumin_g_dl", input.albumin_g_dl)?;
    require_positive("inr", input.inr)?;

    let bilirubin_points = match input.bilirubin_mg_dl {
        b if b < 2.0 => 1,
        b if b <= 3.0 => 2,
        _ => 3,
    };
    let albumin_points = match input.albumin_g_dl {
        a if a > 3.5 => 1,
        a if a >= 2.8 => 2,
        _ => 3,
    };
    let inr_points = match input.inr {
        i if i < 1.7 => 1,
        i if i <= 2.3 => 2,
        _ => 3,
    };
    let ascites_points = input.ascites.points();
    let encephalopathy_points = input.encephalopathy.points();

    let total =
        bilirubin_points + albumin_points + inr_points + ascites_points + encephalopathy_points;
    let class = match total {
        5..=6 => ChildPughClass::A,
        7..=9 => ChildPughClass::B,
        _ => ChildPughClass::C,
    };

    Ok(ChildPughResult {
        bilirubin_points,
        albumin_points,
        inr_points,
        ascites_points,
        encephalopathy_points,
        total,
        class,
        interpretation: class.interpretation().to_string(),
    })
}
