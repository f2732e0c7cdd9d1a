use pharmacalc_core::error::PharmacalcError;
use pharmacalc_core::model::{RiskWeight, TagCategory};
use pharmacalc_core::registry::builtin;
use pharmacalc_core::registry::schema::AdvisoryTrigger;
use std::path::Path;

pub fn list() -> Result<(), PharmacalcError> {
    println!("Available predefined registries:\n");
    for name in builtin::PRESETS {
        let registry = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, registry.name, registry.version);
        if let Some(ref desc) = registry.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), PharmacalcError> {
    let registry = builtin::load_preset(preset)?;
    let scoring = &registry.scoring;

    println!("{} (version {})\n", registry.name, registry.version);
    if let Some(ref desc) = registry.description {
        println!("{}\n", desc);
    }

    println!("Scoring:\n");
    println!("  Each selected drug functional group and excipient adds its weight");
    println!("  (Low = 1, Medium = 2, High = 3).");
    println!("  Each environmental factor adds weight x multiplier:");
    for weight in [RiskWeight::Low, RiskWeight::Medium, RiskWeight::High] {
        let m = scoring.multipliers.for_weight(weight);
        println!("    {:<8} {} x {} = {}", weight, weight.score(), m, weight.score() * m);
    }
    println!("  Every interaction rule whose two tags are both selected adds its bonus.\n");

    let t = &scoring.thresholds;
    println!("Risk levels:\n");
    let bands = [
        ("Low", format!("0-{}", t.low_max), "Compatible"),
        ("Medium", format!("{}-{}", t.low_max + 1, t.medium_max), "Caution"),
        ("High", format!("{}-{}", t.medium_max + 1, t.high_max), "Caution"),
        ("Critical", format!("{}+", t.high_max + 1), "Incompatible"),
    ];
    for (level, range, verdict) in bands {
        println!("  {:<9} {:<7} {}", level, range, verdict);
    }
    println!();

    for category in TagCategory::ALL {
        println!("  {} tags: {}", category, registry.list_tags(category).len());
    }
    println!();

    println!("Interaction rules:\n");
    let width = registry
        .interactions
        .iter()
        .map(|r| r.pair[0].len() + r.pair[1].len() + 3)
        .max()
        .unwrap_or(20);
    for rule in &registry.interactions {
        let pair = format!("{} + {}", rule.pair[0], rule.pair[1]);
        println!("  {:<width$}  +{:<3} {}", pair, rule.extra_score, rule.issue);
    }
    println!();

    if !registry.advisories.is_empty() {
        println!("General advisories:\n");
        for advisory in &registry.advisories {
            let when = match &advisory.trigger {
                AdvisoryTrigger::Tag(id) => id.clone(),
                AdvisoryTrigger::OxidationProne => "any oxidation-prone tag".to_string(),
            };
            println!("  {:<26} {}", when, advisory.recommendation);
        }
        println!();
    }

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), PharmacalcError> {
    let registry = pharmacalc_core::registry::load_registry(file)?;

    println!("Registry '{}' (v{}) is valid.", registry.name, registry.version);
    for category in TagCategory::ALL {
        println!("  {}: {} tags", category, registry.list_tags(category).len());
    }
    println!("  Interaction rules: {}", registry.interactions.len());
    println!("  Advisories: {}", registry.advisories.len());

    // Warnings, not errors
    let mut warnings = Vec::new();
    for tag in &registry.tags {
        if tag.description.is_empty() {
            warnings.push(format!("tag '{}' has no description", tag.id));
        }
    }
    for rule in &registry.interactions {
        if rule.recommendations.is_empty() {
            warnings.push(format!("rule '{}' has no recommendations", rule.id));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
