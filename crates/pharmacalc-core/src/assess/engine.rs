use crate::assess::outcome::{AssessmentResult, ContributionSource, RiskLevel, ScoreContribution};
use crate::error::PharmacalcError;
use crate::model::TagCategory;
use crate::registry::schema::{AdvisoryTrigger, RegistryDef, TagDef};
use crate::selection::SelectionState;

/// Score a selection against a registry.
///
/// Pure and deterministic: tags are visited in registry order and rules and
/// advisories in table order, so the same selection always produces the
/// same result.
pub fn evaluate(
    selection: &SelectionState,
    registry: &RegistryDef,
) -> Result<AssessmentResult, PharmacalcError> {
    if selection.has_no_intrinsic_tags() {
        return Err(PharmacalcError::EmptySelection);
    }
    check_selection(selection, registry)?;

    let scoring = &registry.scoring;
    let selected: Vec<&TagDef> = registry
        .tags
        .iter()
        .filter(|t| selection.set(t.category).contains(&t.id))
        .collect();

    let mut total = 0u32;
    let mut contributions = Vec::new();
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    // Intrinsic weights of drug groups and excipients
    for tag in selected.iter().filter(|t| t.category.is_intrinsic()) {
        let points = tag.weight.score();
        total = add_points(total, points)?;
        tracing::debug!(tag = %tag.id, points, "tag weight");
        contributions.push(ScoreContribution {
            source: ContributionSource::Tag,
            id: tag.id.clone(),
            points,
            reason: format!("{} ({}): {} risk", tag.name, tag.category, tag.weight),
        });
    }

    // Environmental factors compound risk through the multiplier table
    for tag in selected
        .iter()
        .filter(|t| t.category == TagCategory::EnvironmentalFactor)
    {
        let multiplier = scoring.multipliers.for_weight(tag.weight);
        let points = tag
            .weight
            .score()
            .checked_mul(multiplier)
            .ok_or_else(|| score_overflow(&tag.id))?;
        total = add_points(total, points)?;
        tracing::debug!(factor = %tag.id, points, multiplier, "environmental factor");
        contributions.push(ScoreContribution {
            source: ContributionSource::Factor,
            id: tag.id.clone(),
            points,
            reason: format!(
                "{}: {} risk ({} x {})",
                tag.name,
                tag.weight,
                tag.weight.score(),
                multiplier
            ),
        });
        issues.push(if tag.description.is_empty() {
            tag.name.clone()
        } else {
            format!("{}: {}", tag.name, tag.description)
        });
    }

    // Pairwise interaction rules, each fires at most once
    let mut fired_rules = Vec::new();
    for rule in &registry.interactions {
        let [a, b] = &rule.pair;
        if !(selection.contains(a) && selection.contains(b)) {
            continue;
        }
        total = add_points(total, rule.extra_score)?;
        tracing::debug!(rule = %rule.id, bonus = rule.extra_score, "interaction rule fired");
        fired_rules.push(rule.id.clone());
        contributions.push(ScoreContribution {
            source: ContributionSource::Interaction,
            id: rule.id.clone(),
            points: rule.extra_score,
            reason: format!("{} + {}: {}", a, b, rule.issue),
        });
        issues.push(rule.issue.clone());
        for rec in &rule.recommendations {
            push_unique(&mut recommendations, rec);
        }
    }

    // General advisories, independent of rules
    for advisory in &registry.advisories {
        let applies = match &advisory.trigger {
            AdvisoryTrigger::Tag(id) => selection.contains(id),
            AdvisoryTrigger::OxidationProne => selected.iter().any(|t| t.oxidation_prone),
        };
        if applies {
            push_unique(&mut recommendations, &advisory.recommendation);
        }
    }

    let risk_level = RiskLevel::from_score(total, &scoring.thresholds);
    let compatibility_verdict = risk_level.verdict();

    tracing::info!(
        score = total,
        level = %risk_level,
        verdict = %compatibility_verdict,
        rules = fired_rules.len(),
        "compatibility assessed"
    );

    Ok(AssessmentResult {
        total_score: total,
        risk_level,
        compatibility_verdict,
        issues,
        recommendations,
        contributions,
        fired_rules,
    })
}

/// Every selected id must be a registry tag of the matching category.
fn check_selection(
    selection: &SelectionState,
    registry: &RegistryDef,
) -> Result<(), PharmacalcError> {
    for category in TagCategory::ALL {
        for id in selection.set(category) {
            registry.tag_in_category(category, id)?;
        }
    }
    Ok(())
}

fn add_points(total: u32, points: u32) -> Result<u32, PharmacalcError> {
    total
        .checked_add(points)
        .ok_or_else(|| score_overflow("total"))
}

fn score_overflow(at: &str) -> PharmacalcError {
    PharmacalcError::RegistryInvalid(format!("score overflows at '{at}'"))
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::outcome::CompatibilityVerdict;
    use crate::model::RiskWeight;
    use crate::registry::schema::{
        AdvisoryDef, InteractionRuleDef, RegistryDef, ScoringDef, TagDef,
    };

    fn tag(id: &str, category: TagCategory, weight: RiskWeight) -> TagDef {
        TagDef {
            id: id.into(),
            name: id.to_uppercase(),
            category,
            weight,
            description: format!("{id} description"),
            oxidation_prone: false,
        }
    }

    fn make_registry() -> RegistryDef {
        let mut phenol = tag("phenol", TagCategory::DrugFunctionalGroup, RiskWeight::Medium);
        phenol.oxidation_prone = true;
        RegistryDef {
            name: "Test".into(),
            description: None,
            version: "1.0".into(),
            scoring: ScoringDef::default(),
            tags: vec![
                tag("amine", TagCategory::DrugFunctionalGroup, RiskWeight::High),
                phenol,
                tag("amide", TagCategory::DrugFunctionalGroup, RiskWeight::Low),
                tag("lactose", TagCategory::ExcipientClass, RiskWeight::High),
                tag("mcc", TagCategory::ExcipientClass, RiskWeight::Low),
                tag("stearate", TagCategory::ExcipientClass, RiskWeight::Medium),
                tag("humid", TagCategory::EnvironmentalFactor, RiskWeight::High),
                tag("light", TagCategory::EnvironmentalFactor, RiskWeight::Medium),
                tag("milling", TagCategory::EnvironmentalFactor, RiskWeight::Low),
            ],
            interactions: vec![
                InteractionRuleDef {
                    id: "maillard".into(),
                    pair: ["amine".into(), "lactose".into()],
                    extra_score: 5,
                    issue: "Maillard reaction".into(),
                    recommendations: vec!["Replace lactose".into(), "Keep dry".into()],
                },
                InteractionRuleDef {
                    id: "humid_lactose".into(),
                    pair: ["humid".into(), "lactose".into()],
                    extra_score: 2,
                    issue: "Moisture uptake by lactose".into(),
                    recommendations: vec!["Keep dry".into()],
                },
            ],
            advisories: vec![
                AdvisoryDef {
                    trigger: AdvisoryTrigger::Tag("humid".into()),
                    recommendation: "Use moisture-barrier packaging".into(),
                },
                AdvisoryDef {
                    trigger: AdvisoryTrigger::OxidationProne,
                    recommendation: "Consider antioxidant addition".into(),
                },
            ],
        }
    }

    fn select(drugs: &[&str], excipients: &[&str], factors: &[&str]) -> SelectionState {
        SelectionState {
            drug_groups: drugs.iter().map(|s| s.to_string()).collect(),
            excipients: excipients.iter().map(|s| s.to_string()).collect(),
            factors: factors.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_base_score_only() {
        let result = evaluate(&select(&["amide"], &["mcc"], &[]), &make_registry()).unwrap();
        assert_eq!(result.total_score, 2);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.compatibility_verdict, CompatibilityVerdict::Compatible);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_interaction_rule_fires() {
        let result = evaluate(&select(&["amine"], &["lactose"], &[]), &make_registry()).unwrap();
        assert_eq!(result.total_score, 3 + 3 + 5);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.fired_rules, vec!["maillard"]);
        assert!(result.issues.iter().any(|i| i.contains("Maillard")));
        assert_eq!(result.recommendations, vec!["Replace lactose", "Keep dry"]);
    }

    #[test]
    fn test_half_pair_does_not_fire() {
        let result = evaluate(&select(&["amine"], &["mcc"], &[]), &make_registry()).unwrap();
        assert_eq!(result.total_score, 4);
        assert!(result.fired_rules.is_empty());
        assert_eq!(result.score_from(ContributionSource::Interaction), 0);
    }

    #[test]
    fn test_environmental_multipliers() {
        let reg = make_registry();
        // mcc (1) + humid 3x4 + light 2x2 + milling 1x1
        let result = evaluate(&select(&[], &["mcc"], &["humid", "light", "milling"]), &reg).unwrap();
        assert_eq!(result.score_from(ContributionSource::Factor), 12 + 4 + 1);
        assert_eq!(result.total_score, 18);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(
            result.compatibility_verdict,
            CompatibilityVerdict::Incompatible
        );
        assert_eq!(result.issues.len(), 3);
        assert_eq!(result.issues[0], "HUMID: humid description");
    }

    #[test]
    fn test_recommendations_deduplicated() {
        let result = evaluate(
            &select(&["amine"], &["lactose"], &["humid"]),
            &make_registry(),
        )
        .unwrap();
        assert_eq!(result.fired_rules, vec!["maillard", "humid_lactose"]);
        assert_eq!(
            result.recommendations,
            vec![
                "Replace lactose",
                "Keep dry",
                "Use moisture-barrier packaging"
            ]
        );
        // humid issue first, then the two rules
        assert_eq!(result.issues.len(), 3);
        assert!(result.issues[1].contains("Maillard"));
    }

    #[test]
    fn test_oxidation_advisory() {
        let result = evaluate(&select(&["phenol"], &[], &[]), &make_registry()).unwrap();
        assert_eq!(
            result.recommendations,
            vec!["Consider antioxidant addition"]
        );
    }

    #[test]
    fn test_empty_selection_rejected() {
        let reg = make_registry();
        assert!(matches!(
            evaluate(&SelectionState::default(), &reg),
            Err(PharmacalcError::EmptySelection)
        ));
        assert!(matches!(
            evaluate(&select(&[], &[], &["humid", "light"]), &reg),
            Err(PharmacalcError::EmptySelection)
        ));
    }

    #[test]
    fn test_unknown_or_misfiled_tag_rejected() {
        let reg = make_registry();
        assert!(matches!(
            evaluate(&select(&["amine"], &["sucrose"], &[]), &reg),
            Err(PharmacalcError::InvalidTag { .. })
        ));
        // lactose is an excipient, not a drug group
        assert!(matches!(
            evaluate(&select(&["lactose"], &[], &[]), &reg),
            Err(PharmacalcError::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_custom_scoring() {
        let mut reg = make_registry();
        reg.scoring.multipliers.high = 1;
        reg.scoring.thresholds.low_max = 10;
        reg.scoring.thresholds.medium_max = 20;
        reg.scoring.thresholds.high_max = 30;
        let result = evaluate(&select(&["amide"], &[], &["humid"]), &reg).unwrap();
        assert_eq!(result.total_score, 1 + 3);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_unvalidated_registry_overflow_is_an_error() {
        let mut reg = make_registry();
        reg.interactions[0].extra_score = u32::MAX;
        let err = evaluate(&select(&["amine"], &["lactose"], &[]), &reg).unwrap_err();
        assert_eq!(err.error_code(), "REGISTRY_INVALID");

        let mut reg = make_registry();
        reg.scoring.multipliers.high = 2_000_000_000;
        let err = evaluate(&select(&["amine"], &["mcc"], &["humid"]), &reg).unwrap_err();
        assert!(matches!(err, PharmacalcError::RegistryInvalid(_)));
    }

    #[test]
    fn test_deterministic() {
        let reg = make_registry();
        let sel = select(&["amine", "phenol"], &["lactose", "stearate"], &["humid", "light"]);
        assert_eq!(evaluate(&sel, &reg).unwrap(), evaluate(&sel, &reg).unwrap());
    }
}
