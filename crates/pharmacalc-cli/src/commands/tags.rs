use pharmacalc_core::error::PharmacalcError;
use pharmacalc_core::model::TagCategory;
use std::path::PathBuf;

use crate::output;

pub fn list(
    category: Option<&str>,
    registry_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), PharmacalcError> {
    let registry = super::resolve_registry(registry_file.as_deref())?;

    let categories: Vec<TagCategory> = match category {
        Some(name) => vec![TagCategory::from_str_loose(name).ok_or_else(|| {
            PharmacalcError::invalid_input(
                "category",
                name,
                "expected drug-groups, excipients or factors",
            )
        })?],
        None => TagCategory::ALL.to_vec(),
    };

    match output_format {
        "json" => {
            let tags: Vec<_> = categories
                .iter()
                .flat_map(|c| registry.list_tags(*c))
                .collect();
            output::json::print(&tags)?;
        }
        "table" => {
            for (i, c) in categories.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output::table::print_tags(*c, &registry.list_tags(*c));
            }
        }
        other => {
            return Err(PharmacalcError::invalid_input(
                "output",
                other,
                "expected 'table' or 'json'",
            ))
        }
    }
    Ok(())
}

pub fn show(id: &str, registry_file: Option<PathBuf>) -> Result<(), PharmacalcError> {
    let registry = super::resolve_registry(registry_file.as_deref())?;
    let tag = registry.get_tag(id)?;

    println!("{} ({})\n", tag.name, tag.id);
    println!("  Category: {}", tag.category);
    println!("  Weight:   {} ({} points)", tag.weight, tag.weight.score());
    if tag.category == TagCategory::EnvironmentalFactor {
        let points = tag.weight.score() * registry.scoring.multipliers.for_weight(tag.weight);
        println!("  Scored:   {points} points when selected");
    }
    if tag.oxidation_prone {
        println!("  Oxidation prone");
    }
    if !tag.description.is_empty() {
        println!("\n  {}", tag.description);
    }

    let rules: Vec<_> = registry
        .interactions
        .iter()
        .filter(|r| r.involves(&tag.id))
        .collect();
    if !rules.is_empty() {
        println!("\nInteraction rules:");
        for rule in rules {
            let partner = rule
                .pair
                .iter()
                .find(|p| p.as_str() != tag.id)
                .map(String::as_str)
                .unwrap_or(&tag.id);
            let partner_name = registry
                .find_tag(partner)
                .map(|t| t.name.as_str())
                .unwrap_or(partner);
            println!("  + {:<14} +{}  {}", partner_name, rule.extra_score, rule.issue);
        }
    }

    Ok(())
}
