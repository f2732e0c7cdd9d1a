//! Integration tests for the compatibility assessment against the built-in
//! registry, plus the worked calculator examples.

use pharmacalc_core::assess::{evaluate, AssessmentResult, CompatibilityVerdict, RiskLevel};
use pharmacalc_core::error::PharmacalcError;
use pharmacalc_core::formulas::{bsa, child_pugh, renal, round_display, temperature};
use pharmacalc_core::model::TagCategory;
use pharmacalc_core::registry::builtin::default_registry;
use pharmacalc_core::selection::{SelectionManager, SelectionState};
use pharmacalc_core::{assess_tags, build_selection};
use rust_decimal_macros::dec;

fn assess(drugs: &[&str], excipients: &[&str], factors: &[&str]) -> AssessmentResult {
    assess_tags(default_registry(), drugs, excipients, factors).unwrap()
}

// ---------------------------------------------------------------------------
// Test 1: Primary amine + lactose fires the Maillard rule
// ---------------------------------------------------------------------------
#[test]
fn amine_with_lactose_fires_maillard() {
    let result = assess(&["primary_amine"], &["lactose"], &[]);

    // 3 + 3 + 5 bonus
    assert_eq!(result.total_score, 11);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.compatibility_verdict, CompatibilityVerdict::Caution);
    assert_eq!(result.fired_rules, vec!["maillard_primary"]);
    assert!(result.issues.iter().any(|i| i.contains("Maillard")));
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.contains("non-reducing filler")));
}

#[test]
fn one_half_of_a_pair_adds_no_bonus() {
    let amine_only = assess(&["primary_amine"], &["microcrystalline_cellulose"], &[]);
    assert_eq!(amine_only.total_score, 3 + 1);
    assert!(amine_only.fired_rules.is_empty());

    let lactose_only = assess(&["amide"], &["lactose"], &[]);
    assert_eq!(lactose_only.total_score, 1 + 3);
    assert!(lactose_only.issues.is_empty());
}

// ---------------------------------------------------------------------------
// Test 2: Threshold boundaries with real tag combinations
// ---------------------------------------------------------------------------
#[test]
fn threshold_boundaries() {
    // ester 2 + lactose 3
    let r = assess(&["ester"], &["lactose"], &[]);
    assert_eq!((r.total_score, r.risk_level), (5, RiskLevel::Low));
    assert_eq!(r.compatibility_verdict, CompatibilityVerdict::Compatible);

    // primary amine 3 + magnesium stearate 2 + amide 1
    let r = assess(&["primary_amine", "amide"], &["magnesium_stearate"], &[]);
    assert_eq!((r.total_score, r.risk_level), (6, RiskLevel::Medium));
    assert_eq!(r.compatibility_verdict, CompatibilityVerdict::Caution);

    // thiol 3 + lactose 3 + light 2x2
    let r = assess(&["thiol"], &["lactose"], &["light_exposure"]);
    assert_eq!((r.total_score, r.risk_level), (10, RiskLevel::Medium));

    let r = assess(&["primary_amine"], &["lactose"], &[]);
    assert_eq!((r.total_score, r.risk_level), (11, RiskLevel::High));

    // 11 + light 4
    let r = assess(&["primary_amine"], &["lactose"], &["light_exposure"]);
    assert_eq!((r.total_score, r.risk_level), (15, RiskLevel::High));

    // 15 + milling 1x1
    let r = assess(
        &["primary_amine"],
        &["lactose"],
        &["light_exposure", "mechanical_stress"],
    );
    assert_eq!((r.total_score, r.risk_level), (16, RiskLevel::Critical));
    assert_eq!(r.compatibility_verdict, CompatibilityVerdict::Incompatible);
}

// ---------------------------------------------------------------------------
// Test 3: Environmental factors add issues and general advisories
// ---------------------------------------------------------------------------
#[test]
fn humidity_adds_issue_and_packaging_advice() {
    let r = assess(&["ester"], &["magnesium_stearate"], &["high_humidity"]);

    // ester 2 + stearate 2 + humidity 3x4 + stearate/ester hydrolysis 4
    assert_eq!(r.total_score, 20);
    assert_eq!(r.risk_level, RiskLevel::Critical);
    assert!(r.issues[0].starts_with("High humidity: "));
    assert!(r.issues[1].contains("Ester hydrolysis"));
    assert_eq!(
        r.recommendations.last().map(String::as_str),
        Some("Use moisture-barrier packaging")
    );
}

#[test]
fn recommendations_are_not_repeated() {
    // The beta-lactam rule and the humidity advisory both suggest
    // moisture-barrier packaging.
    let r = assess(&["beta_lactam"], &["microcrystalline_cellulose"], &["high_humidity"]);
    let count = r
        .recommendations
        .iter()
        .filter(|rec| rec.as_str() == "Use moisture-barrier packaging")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn oxidation_prone_tag_suggests_antioxidant() {
    let r = assess(&["thiol"], &["microcrystalline_cellulose"], &[]);
    assert_eq!(r.recommendations, vec!["Consider antioxidant addition"]);

    let r = assess(&["amide"], &["microcrystalline_cellulose"], &[]);
    assert!(r.recommendations.is_empty());
}

// ---------------------------------------------------------------------------
// Test 4: Guards
// ---------------------------------------------------------------------------
#[test]
fn factors_alone_are_not_enough() {
    let err = assess_tags(
        default_registry(),
        &[] as &[&str],
        &[],
        &["high_humidity", "light_exposure"],
    )
    .unwrap_err();
    assert!(matches!(err, PharmacalcError::EmptySelection));
    assert_eq!(err.error_code(), "EMPTY_SELECTION");

    assert!(matches!(
        evaluate(&SelectionState::default(), default_registry()),
        Err(PharmacalcError::EmptySelection)
    ));
}

#[test]
fn unknown_tag_is_rejected() {
    let err = assess_tags(default_registry(), &["primary_amine"], &["sucrose"], &[]).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TAG");

    // A JSON selection that bypasses the manager is checked too
    let selection: SelectionState =
        serde_json::from_str(r#"{ "drugGroups": ["lactose"], "excipients": [] }"#).unwrap();
    assert!(matches!(
        evaluate(&selection, default_registry()),
        Err(PharmacalcError::InvalidTag { .. })
    ));
}

// ---------------------------------------------------------------------------
// Test 5: Determinism and monotonicity over the whole tag universe
// ---------------------------------------------------------------------------
#[test]
fn evaluation_is_deterministic() {
    let registry = default_registry();
    let selection = build_selection(
        registry,
        &["primary_amine", "phenol", "ester"],
        &["lactose", "povidone", "magnesium_stearate"],
        &["high_humidity", "oxygen_exposure"],
    )
    .unwrap();
    let first = evaluate(&selection, registry).unwrap();
    let second = evaluate(&selection, registry).unwrap();
    assert_eq!(first, second);
}

#[test]
fn adding_a_tag_never_lowers_the_score() {
    let registry = default_registry();
    let mut manager = SelectionManager::new(registry);
    manager
        .toggle(TagCategory::DrugFunctionalGroup, "secondary_amine")
        .unwrap();
    manager
        .toggle(TagCategory::ExcipientClass, "starch")
        .unwrap();
    let base = evaluate(&manager.snapshot(), registry).unwrap();

    for tag in &registry.tags {
        if manager.snapshot().contains(&tag.id) {
            continue;
        }
        manager.toggle(tag.category, &tag.id).unwrap();
        let with_tag = evaluate(&manager.snapshot(), registry).unwrap();
        assert!(
            with_tag.total_score >= base.total_score + tag.weight.score(),
            "adding {} lowered the score",
            tag.id
        );

        // Removing it again restores the original result exactly
        manager.toggle(tag.category, &tag.id).unwrap();
        assert_eq!(evaluate(&manager.snapshot(), registry).unwrap(), base);
    }
}

// ---------------------------------------------------------------------------
// Test 6: JSON shape for presentation layers
// ---------------------------------------------------------------------------
#[test]
fn result_serializes_in_camel_case() {
    let r = assess(&["primary_amine"], &["lactose"], &[]);
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["totalScore"], 11);
    assert_eq!(json["riskLevel"], "High");
    assert_eq!(json["compatibilityVerdict"], "Caution");
    assert!(json["issues"].is_array());
    assert!(json["recommendations"].is_array());
}

// ---------------------------------------------------------------------------
// Test 7: Worked calculator examples
// ---------------------------------------------------------------------------
#[test]
fn worked_formula_examples() {
    let f = temperature::convert(
        25.0,
        temperature::TemperatureUnit::Celsius,
        temperature::TemperatureUnit::Fahrenheit,
    )
    .unwrap();
    assert_eq!(f, 77.0);

    let area = bsa::body_surface_area(170.0, 70.0, bsa::BsaMethod::Mosteller).unwrap();
    assert!((area - 1.8184).abs() < 1e-3);

    let crcl = renal::creatinine_clearance(30.0, 70.0, 0.8, renal::Sex::Male).unwrap();
    assert_eq!(round_display(crcl.value, 2), Some(dec!(133.68)));

    let cp = child_pugh::score(&child_pugh::ChildPughInput {
        bilirubin_mg_dl: 1.2,
        albumin_g_dl: 4.0,
        inr: 1.2,
        ascites: child_pugh::ClinicalGrade::None,
        encephalopathy: child_pugh::ClinicalGrade::None,
    })
    .unwrap();
    assert_eq!(cp.total, 5);
    assert_eq!(cp.class, child_pugh::ChildPughClass::A);
}

#[test]
fn formula_guards_short_circuit() {
    let err = bsa::body_surface_area(f64::NAN, 70.0, bsa::BsaMethod::Mosteller).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert!(renal::creatinine_clearance(30.0, -70.0, 0.8, renal::Sex::Female).is_err());
}
