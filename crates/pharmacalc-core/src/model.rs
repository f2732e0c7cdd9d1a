use serde::{Deserialize, Serialize};
use std::fmt;

/// Intrinsic risk weight of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskWeight {
    Low,
    Medium,
    High,
}

impl RiskWeight {
    /// Numeric score: Low=1, Medium=2, High=3.
    pub fn score(self) -> u32 {
        match self {
            RiskWeight::Low => 1,
            RiskWeight::Medium => 2,
            RiskWeight::High => 3,
        }
    }
}

impl fmt::Display for RiskWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskWeight::Low => write!(f, "Low"),
            RiskWeight::Medium => write!(f, "Medium"),
            RiskWeight::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    DrugFunctionalGroup,
    ExcipientClass,
    EnvironmentalFactor,
}

impl TagCategory {
    pub const ALL: [TagCategory; 3] = [
        TagCategory::DrugFunctionalGroup,
        TagCategory::ExcipientClass,
        TagCategory::EnvironmentalFactor,
    ];

    /// Intrinsic categories are the drug and excipient tags; environmental
    /// factors are weighted through the multiplier table instead.
    pub fn is_intrinsic(self) -> bool {
        !matches!(self, TagCategory::EnvironmentalFactor)
    }

    pub fn from_str_loose(s: &str) -> Option<TagCategory> {
        let lower = s.trim().to_lowercase().replace(['-', ' '], "_");
        match lower.as_str() {
            "drug" | "drugs" | "drug_group" | "drug_groups" | "drug_functional_group"
            | "functional_group" | "functional_groups" => Some(TagCategory::DrugFunctionalGroup),
            "excipient" | "excipients" | "excipient_class" | "excipient_classes" => {
                Some(TagCategory::ExcipientClass)
            }
            "factor" | "factors" | "environment" | "environmental_factor"
            | "environmental_factors" => Some(TagCategory::EnvironmentalFactor),
            _ => None,
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagCategory::DrugFunctionalGroup => write!(f, "drug functional group"),
            TagCategory::ExcipientClass => write!(f, "excipient"),
            TagCategory::EnvironmentalFactor => write!(f, "environmental factor"),
        }
    }
}
