use crate::registry::schema::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a total score against the (inclusive) band limits.
    pub fn from_score(score: u32, thresholds: &RiskThresholds) -> RiskLevel {
        match score {
            s if s <= thresholds.low_max => RiskLevel::Low,
            s if s <= thresholds.medium_max => RiskLevel::Medium,
            s if s <= thresholds.high_max => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn verdict(self) -> CompatibilityVerdict {
        match self {
            RiskLevel::Low => CompatibilityVerdict::Compatible,
            RiskLevel::Medium | RiskLevel::High => CompatibilityVerdict::Caution,
            RiskLevel::Critical => CompatibilityVerdict::Incompatible,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityVerdict {
    Compatible,
    Caution,
    Incompatible,
}

impl fmt::Display for CompatibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityVerdict::Compatible => write!(f, "Compatible"),
            CompatibilityVerdict::Caution => write!(f, "Caution"),
            CompatibilityVerdict::Incompatible => write!(f, "Incompatible"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    /// Intrinsic weight of a drug group or excipient.
    Tag,
    /// Multiplied weight of an environmental factor.
    Factor,
    /// Bonus from a fired interaction rule.
    Interaction,
}

/// One line of the score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub source: ContributionSource,
    /// Tag id or interaction rule id.
    pub id: String,
    pub points: u32,
    /// Human-readable explanation of the points.
    pub reason: String,
}

/// Outcome of one compatibility assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub total_score: u32,
    pub risk_level: RiskLevel,
    pub compatibility_verdict: CompatibilityVerdict,
    /// Selected environmental factors, then fired interaction rules.
    pub issues: Vec<String>,
    /// De-duplicated, in the order they were contributed.
    pub recommendations: Vec<String>,
    pub contributions: Vec<ScoreContribution>,
    /// Ids of the interaction rules that fired.
    pub fired_rules: Vec<String>,
}

impl AssessmentResult {
    pub fn score_from(&self, source: ContributionSource) -> u32 {
        self.contributions
            .iter()
            .filter(|c| c.source == source)
            .map(|c| c.points)
            .sum()
    }
}
