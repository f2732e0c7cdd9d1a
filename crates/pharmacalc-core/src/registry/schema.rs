use crate::model::{RiskWeight, TagCategory};
use serde::{Deserialize, Serialize};

/// A compatibility registry: the tag universe, pairwise interaction rules,
/// general advisories and scoring constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub scoring: ScoringDef,
    /// Tags in display order.
    pub tags: Vec<TagDef>,
    #[serde(default)]
    pub interactions: Vec<InteractionRuleDef>,
    #[serde(default)]
    pub advisories: Vec<AdvisoryDef>,
}

/// A selectable risk tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDef {
    pub id: String,
    pub name: String,
    pub category: TagCategory,
    pub weight: RiskWeight,
    #[serde(default)]
    pub description: String,
    /// Selecting this tag triggers the antioxidant advisory.
    #[serde(default)]
    pub oxidation_prone: bool,
}

/// Extra risk added when both tags of `pair` are selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRuleDef {
    pub id: String,
    /// Unordered pair of tag ids, from any category.
    pub pair: [String; 2],
    pub extra_score: u32,
    pub issue: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl InteractionRuleDef {
    pub fn involves(&self, tag_id: &str) -> bool {
        self.pair.iter().any(|id| id == tag_id)
    }
}

/// A recommendation that applies independently of interaction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryDef {
    pub trigger: AdvisoryTrigger,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTrigger {
    /// Fires when this tag is selected.
    Tag(String),
    /// Fires when any selected tag is flagged `oxidation_prone`.
    OxidationProne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringDef {
    #[serde(default)]
    pub multipliers: EnvironmentalMultipliers,
    #[serde(default)]
    pub thresholds: RiskThresholds,
}

/// Multiplier applied to an environmental factor's weight score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentalMultipliers {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl Default for EnvironmentalMultipliers {
    fn default() -> Self {
        Self {
            low: 1,
            medium: 2,
            high: 4,
        }
    }
}

impl EnvironmentalMultipliers {
    pub fn for_weight(&self, weight: RiskWeight) -> u32 {
        match weight {
            RiskWeight::Low => self.low,
            RiskWeight::Medium => self.medium,
            RiskWeight::High => self.high,
        }
    }
}

/// Inclusive upper bounds of the Low, Medium and High risk bands.
/// Anything above `high_max` is Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low_max: u32,
    pub medium_max: u32,
    pub high_max: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 5,
            medium_max: 10,
            high_max: 15,
        }
    }
}
