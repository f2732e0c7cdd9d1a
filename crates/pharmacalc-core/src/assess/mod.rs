pub mod engine;
pub mod outcome;

pub use engine::evaluate;
pub use outcome::{
    AssessmentResult, CompatibilityVerdict, ContributionSource, RiskLevel, ScoreContribution,
};
