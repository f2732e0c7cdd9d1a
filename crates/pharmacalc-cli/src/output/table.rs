use pharmacalc_core::assess::{AssessmentResult, ContributionSource};
use pharmacalc_core::model::TagCategory;
use pharmacalc_core::registry::schema::{RegistryDef, TagDef};

pub fn print_assessment(result: &AssessmentResult, registry: &RegistryDef, verbose: bool) {
    println!("=== {} ===\n", registry.name);
    println!(
        "  Risk: {} (score {}) -> {}\n",
        result.risk_level, result.total_score, result.compatibility_verdict
    );

    if verbose {
        let max_id = result
            .contributions
            .iter()
            .map(|c| c.id.len())
            .max()
            .unwrap_or(10);
        for c in &result.contributions {
            let kind = match c.source {
                ContributionSource::Tag => "tag",
                ContributionSource::Factor => "factor",
                ContributionSource::Interaction => "rule",
            };
            println!(
                "  {:<6} {:<width$}  +{:<3} {}",
                kind,
                c.id,
                c.points,
                c.reason,
                width = max_id
            );
        }
        println!(
            "\n  Tags {} + factors {} + interactions {} = {}\n",
            result.score_from(ContributionSource::Tag),
            result.score_from(ContributionSource::Factor),
            result.score_from(ContributionSource::Interaction),
            result.total_score
        );
    }

    if result.issues.is_empty() {
        println!("  No known interactions for this combination.");
    } else {
        println!("  Issues:");
        for issue in &result.issues {
            println!("    - {}", issue);
        }
    }

    if !result.recommendations.is_empty() {
        println!("\n  Recommendations:");
        for rec in &result.recommendations {
            println!("    - {}", rec);
        }
    }
}

pub fn print_tags(category: TagCategory, tags: &[&TagDef]) {
    println!("{} tags:\n", capitalize(&category.to_string()));
    let max_id = tags.iter().map(|t| t.id.len()).max().unwrap_or(10);
    for tag in tags {
        let ox = if tag.oxidation_prone { " (ox)" } else { "" };
        println!(
            "  {:<width$}  {:<6}  {}{}",
            tag.id,
            tag.weight.to_string(),
            tag.name,
            ox,
            width = max_id
        );
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
