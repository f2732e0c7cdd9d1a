pub mod builtin;
pub mod schema;

use crate::error::PharmacalcError;
use crate::model::TagCategory;
use schema::{AdvisoryTrigger, RegistryDef, TagDef};
use std::collections::HashSet;
use std::path::Path;

/// Largest bonus a single interaction rule may add.
pub const MAX_EXTRA_SCORE: u32 = 1000;
/// Largest environmental multiplier.
pub const MAX_MULTIPLIER: u32 = 100;

impl RegistryDef {
    /// Tags of one category, in display order.
    pub fn list_tags(&self, category: TagCategory) -> Vec<&TagDef> {
        self.tags.iter().filter(|t| t.category == category).collect()
    }

    pub fn find_tag(&self, id: &str) -> Option<&TagDef> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn get_tag(&self, id: &str) -> Result<&TagDef, PharmacalcError> {
        self.find_tag(id)
            .ok_or_else(|| PharmacalcError::TagNotFound(id.to_string()))
    }

    /// Look up a tag and check that it belongs to `category`.
    pub fn tag_in_category(
        &self,
        category: TagCategory,
        id: &str,
    ) -> Result<&TagDef, PharmacalcError> {
        self.find_tag(id)
            .filter(|t| t.category == category)
            .ok_or_else(|| PharmacalcError::InvalidTag {
                category,
                id: id.to_string(),
            })
    }
}

/// Load a registry from a JSON file.
pub fn load_registry(path: &Path) -> Result<RegistryDef, PharmacalcError> {
    let content = std::fs::read_to_string(path).map_err(|e| PharmacalcError::RegistryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_registry(&content, path)
}

/// Parse a registry from a JSON string.
pub fn parse_registry(json: &str, source: &Path) -> Result<RegistryDef, PharmacalcError> {
    let registry: RegistryDef =
        serde_json::from_str(json).map_err(|e| PharmacalcError::RegistryLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_registry(&registry)?;
    Ok(registry)
}

/// Parse a registry from a JSON string (no file path context).
pub fn parse_registry_str(json: &str) -> Result<RegistryDef, PharmacalcError> {
    let registry: RegistryDef = serde_json::from_str(json).map_err(PharmacalcError::Json)?;
    validate_registry(&registry)?;
    Ok(registry)
}

/// Validate that a registry is well-formed.
pub fn validate_registry(registry: &RegistryDef) -> Result<(), PharmacalcError> {
    let mut ids = HashSet::new();
    for tag in &registry.tags {
        if tag.id.trim().is_empty() {
            return Err(PharmacalcError::RegistryInvalid(
                "tag id must not be empty".into(),
            ));
        }
        if !ids.insert(tag.id.as_str()) {
            return Err(PharmacalcError::RegistryInvalid(format!(
                "duplicate tag id '{}'",
                tag.id
            )));
        }
    }

    for category in TagCategory::ALL {
        if !registry.tags.iter().any(|t| t.category == category) {
            return Err(PharmacalcError::RegistryInvalid(format!(
                "no {} tags defined",
                category
            )));
        }
    }

    let mut pairs = HashSet::new();
    for rule in &registry.interactions {
        let [a, b] = &rule.pair;
        for id in [a, b] {
            if !ids.contains(id.as_str()) {
                return Err(PharmacalcError::RegistryInvalid(format!(
                    "interaction '{}' references unknown tag '{}'",
                    rule.id, id
                )));
            }
        }
        if a == b {
            return Err(PharmacalcError::RegistryInvalid(format!(
                "interaction '{}' pairs tag '{}' with itself",
                rule.id, a
            )));
        }
        if rule.extra_score == 0 || rule.extra_score > MAX_EXTRA_SCORE {
            return Err(PharmacalcError::RegistryInvalid(format!(
                "interaction '{}' must add between 1 and {} points (got {})",
                rule.id, MAX_EXTRA_SCORE, rule.extra_score
            )));
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !pairs.insert(key) {
            return Err(PharmacalcError::RegistryInvalid(format!(
                "interaction '{}' duplicates the pair ({}, {})",
                rule.id, a, b
            )));
        }
    }

    for advisory in &registry.advisories {
        if let AdvisoryTrigger::Tag(ref id) = advisory.trigger {
            if !ids.contains(id.as_str()) {
                return Err(PharmacalcError::RegistryInvalid(format!(
                    "advisory references unknown tag '{}'",
                    id
                )));
            }
        }
    }

    let m = registry.scoring.multipliers;
    if [m.low, m.medium, m.high]
        .iter()
        .any(|&v| v == 0 || v > MAX_MULTIPLIER)
    {
        return Err(PharmacalcError::RegistryInvalid(format!(
            "environmental multipliers must be between 1 and {} (got {}, {}, {})",
            MAX_MULTIPLIER, m.low, m.medium, m.high
        )));
    }

    let t = registry.scoring.thresholds;
    if !(t.low_max < t.medium_max && t.medium_max < t.high_max) {
        return Err(PharmacalcError::RegistryInvalid(format!(
            "thresholds must be strictly increasing (got {}, {}, {})",
            t.low_max, t.medium_max, t.high_max
        )));
    }

    Ok(())
}
