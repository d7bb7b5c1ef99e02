use super::common::*;
use crate::selection::domain::{ComponentCategory, CriterionWeight, RequirementSet};
use crate::selection::evaluation::{
    BearingRules, CategoryRules, EvaluationEngine, EvaluationError,
};

fn names(outcome: &crate::selection::EvaluationOutcome) -> Vec<&str> {
    outcome
        .criteria
        .iter()
        .map(|criterion| criterion.name.as_str())
        .collect()
}

#[test]
fn reference_bearing_meets_every_rule_for_typical_requirements() {
    let engine = EvaluationEngine::standard();
    let bearing = reference_record("bearing-001");

    let outcome = engine
        .evaluate(ComponentCategory::Bearing, &bearing_requirements(), &bearing)
        .expect("bearing evaluates");

    assert_eq!(
        names(&outcome),
        vec![
            "Dynamic Load Capacity",
            "Speed Rating",
            "L10 Life (Bearing Life)",
            "Bore Size",
            "Environmental Compatibility",
            "Lubrication Type",
            "Material Availability",
        ]
    );
    assert!(outcome.criteria[..4].iter().all(|criterion| criterion.met));
    assert_eq!(outcome.matched_count, 7);
    assert_eq!(outcome.match_score, 100);

    let load = &outcome.criteria[0];
    assert_eq!(load.actual_value, "28.9 kN");
    assert_eq!(load.requirement, "≥ 20 kN");
    assert_eq!(load.weight, CriterionWeight::Critical);

    let bore = &outcome.criteria[3];
    assert_eq!(bore.actual_value, "40 mm");
    assert_eq!(bore.requirement, "≈ 40 mm");
    assert_eq!(bore.weight, CriterionWeight::High);
}

#[test]
fn criteria_count_is_stable_across_candidates() {
    let engine = EvaluationEngine::standard();
    let requirements = bearing_requirements().with("dynamicLoad", "30");

    let skf = engine
        .evaluate(
            ComponentCategory::Bearing,
            &requirements,
            &reference_record("bearing-001"),
        )
        .expect("skf evaluates");
    let timken = engine
        .evaluate(
            ComponentCategory::Bearing,
            &requirements,
            &reference_record("bearing-002"),
        )
        .expect("timken evaluates");

    assert_eq!(names(&skf), names(&timken));
    assert_eq!(skf.match_score, 86);
    assert_eq!(timken.match_score, 100);
    assert!(!skf.criteria[0].met);
    assert_eq!(timken.criteria[0].actual_value, "47.5 kN");
}

#[test]
fn motor_criteria_names_do_not_depend_on_efficiency_class() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new().with("power", "1.5");

    let ie3 = engine
        .evaluate(
            ComponentCategory::Motor,
            &requirements,
            &reference_record("motor-001"),
        )
        .expect("ie3 motor evaluates");
    let ie2 = engine
        .evaluate(ComponentCategory::Motor, &requirements, &ie2_motor())
        .expect("ie2 motor evaluates");

    assert_eq!(names(&ie3), names(&ie2));
    assert_eq!(ie3.criteria[5].actual_value, "IE3 (85.3% efficiency)");
    assert_eq!(ie2.criteria[5].actual_value, "IE2 (82.5% efficiency)");
}

#[test]
fn malformed_numbers_read_as_zero_and_pass_capacity_rules() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new()
        .with("dynamicLoad", "lots")
        .with("speed", "")
        .with("targetL10Life", "n/a");

    let outcome = engine
        .evaluate(
            ComponentCategory::Bearing,
            &requirements,
            &reference_record("bearing-001"),
        )
        .expect("bearing evaluates");

    assert!(outcome.criteria[0].met);
    assert_eq!(outcome.criteria[0].requirement, "≥ 0 kN");
    assert!(outcome.criteria[1].met);
    assert!(outcome.criteria[2].met);
    // bore defaults to 0, which is far outside the 40 mm bore
    assert!(!outcome.criteria[3].met);
    assert_eq!(outcome.match_score, 86);
}

#[test]
fn numeric_prefixes_are_honoured() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new()
        .with("dynamicLoad", "30kN")
        .with("boreSize", "41.9mm");

    let outcome = engine
        .evaluate(
            ComponentCategory::Bearing,
            &requirements,
            &reference_record("bearing-001"),
        )
        .expect("bearing evaluates");

    assert!(!outcome.criteria[0].met);
    assert_eq!(outcome.criteria[0].requirement, "≥ 30 kN");
    assert_eq!(outcome.criteria[3].requirement, "≈ 41 mm");
    assert!(outcome.criteria[3].met);
}

#[test]
fn bearing_environment_and_enumerations() {
    let engine = EvaluationEngine::standard();
    let requirements = bearing_requirements()
        .with("bearingEnvironment", "Highly Corrosive")
        .with("lubrication", "Dry Film")
        .with("bearingMaterial", "Stainless Steel (440C)");

    let outcome = engine
        .evaluate(
            ComponentCategory::Bearing,
            &requirements,
            &reference_record("bearing-001"),
        )
        .expect("bearing evaluates");

    let environment = &outcome.criteria[4];
    assert!(!environment.met);
    assert_eq!(
        environment.actual_value,
        "Sealed bearing suitable for Highly Corrosive"
    );
    assert!(!outcome.criteria[5].met);
    assert_eq!(outcome.criteria[5].requirement, "Lubrication: Dry Film");
    assert!(outcome.criteria[6].met);
    assert_eq!(outcome.matched_count, 5);
    assert_eq!(outcome.match_score, 71);
}

#[test]
fn motor_matches_on_power_and_speed() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new()
        .with("power", "1.5")
        .with("speed", "1500");

    let outcome = engine
        .evaluate(
            ComponentCategory::Motor,
            &requirements,
            &reference_record("motor-001"),
        )
        .expect("motor evaluates");

    assert_eq!(outcome.criteria.len(), 6);
    assert_eq!(outcome.criteria[0].name, "Power Output");
    assert!(outcome.criteria[0].met);
    assert_eq!(outcome.criteria[0].requirement, "≈ 1.5 kW (±20%)");
    assert_eq!(outcome.criteria[1].name, "Speed Rating");
    assert!(outcome.criteria[1].met);
    assert_eq!(outcome.criteria[2].actual_value, "S3, S4, S5 compatible");
    assert_eq!(outcome.criteria[5].name, "Energy Efficiency");
    assert_eq!(outcome.criteria[5].actual_value, "IE3 (85.3% efficiency)");
    assert_eq!(outcome.match_score, 100);
}

#[test]
fn motor_without_power_requirement_misses_the_band() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new().with("motorEnvironment", "Explosive Atmosphere");

    let outcome = engine
        .evaluate(
            ComponentCategory::Motor,
            &requirements,
            &reference_record("motor-001"),
        )
        .expect("motor evaluates");

    assert!(!outcome.criteria[0].met);
    assert!(!outcome.criteria[1].met);
    assert!(!outcome.criteria[4].met);
    assert_eq!(outcome.matched_count, 3);
    assert_eq!(outcome.match_score, 50);
}

#[test]
fn gear_module_tolerance_is_half_a_millimetre() {
    let engine = EvaluationEngine::standard();
    let gear = reference_record("gear-001");

    let close = engine
        .evaluate(
            ComponentCategory::Gear,
            &RequirementSet::new().with("moduleSize", "2.5").with("power", "15"),
            &gear,
        )
        .expect("gear evaluates");
    assert!(close.criteria[0].met);
    assert!(close.criteria[1].met);
    assert_eq!(close.criteria[1].actual_value, "2 mm");
    assert_eq!(close.criteria[2].actual_value, "16CrNiMo4 Steel (High-strength)");
    assert_eq!(close.match_score, 100);

    let far = engine
        .evaluate(
            ComponentCategory::Gear,
            &RequirementSet::new()
                .with("moduleSize", "2.6")
                .with("power", "20")
                .with("oilType", "ISO VG 220"),
            &gear,
        )
        .expect("gear evaluates");
    assert!(!far.criteria[0].met);
    assert!(!far.criteria[1].met);
    assert!(!far.criteria[4].met);
    assert_eq!(far.match_score, 40);
}

#[test]
fn seal_rules_cover_medium_and_pressure() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new()
        .with("sealDiameter", "31")
        .with("pressure", "60")
        .with("sealEnvironment", "Steam");

    let outcome = engine
        .evaluate(
            ComponentCategory::Seal,
            &requirements,
            &reference_record("seal-001"),
        )
        .expect("seal evaluates");

    assert_eq!(outcome.criteria.len(), 5);
    assert!(outcome.criteria[0].met);
    assert!(!outcome.criteria[1].met);
    assert!(!outcome.criteria[2].met);
    assert_eq!(outcome.criteria[4].actual_value, "-30 to +100 °C");
    assert_eq!(outcome.criteria[4].requirement, "Operating: 20-60 °C");
    assert_eq!(outcome.match_score, 60);
}

#[test]
fn fastener_environment_uses_substring_match() {
    let engine = EvaluationEngine::standard();
    let requirements = RequirementSet::new()
        .with("fastenerEnvironment", "Highly Corrosive Marine")
        .with("fastenerMaterial", "Steel Grade 12.9");

    let outcome = engine
        .evaluate(
            ComponentCategory::Fastener,
            &requirements,
            &reference_record("fastener-001"),
        )
        .expect("fastener evaluates");

    assert_eq!(outcome.criteria[0].requirement, "Size: M8");
    assert!(!outcome.criteria[2].met);
    assert_eq!(outcome.criteria[2].actual_value, "Grade 8.8 (High-strength)");
    assert!(!outcome.criteria[3].met);
    assert_eq!(
        outcome.criteria[3].actual_value,
        "Zinc-plated for mild environments"
    );
    assert_eq!(outcome.criteria[4].actual_value, "-20 to +150 °C");
    assert_eq!(outcome.match_score, 60);
}

#[test]
fn evaluation_is_deterministic() {
    let engine = EvaluationEngine::standard();
    let bearing = reference_record("bearing-001");
    let requirements = bearing_requirements();

    let first = engine
        .evaluate(ComponentCategory::Bearing, &requirements, &bearing)
        .expect("first run");
    let second = engine
        .evaluate(ComponentCategory::Bearing, &requirements, &bearing)
        .expect("second run");

    assert_eq!(first, second);
}

#[test]
fn score_matches_rounded_ratio_for_every_category() {
    let engine = EvaluationEngine::standard();
    let cases = [
        (ComponentCategory::Bearing, "bearing-001"),
        (ComponentCategory::Motor, "motor-001"),
        (ComponentCategory::Gear, "gear-001"),
        (ComponentCategory::Seal, "seal-001"),
        (ComponentCategory::Fastener, "fastener-001"),
    ];

    for (category, id) in cases {
        let outcome = engine
            .evaluate(category, &RequirementSet::new(), &reference_record(id))
            .expect("evaluates");
        let met = outcome.criteria.iter().filter(|c| c.met).count();
        let expected = ((met as f64) * 100.0 / outcome.criteria.len() as f64).round() as u8;
        assert_eq!(outcome.matched_count, met, "{category}");
        assert_eq!(outcome.match_score, expected, "{category}");
        assert!(outcome.match_score <= 100);
    }
}

#[test]
fn evaluating_against_the_wrong_category_is_rejected() {
    let engine = EvaluationEngine::standard();

    let err = engine
        .evaluate(
            ComponentCategory::Motor,
            &RequirementSet::new(),
            &reference_record("bearing-001"),
        )
        .expect_err("ratings do not match");

    assert_eq!(
        err,
        EvaluationError::RatingsMismatch {
            expected: ComponentCategory::Motor,
            found: ComponentCategory::Bearing,
        }
    );
}

#[test]
fn engine_reports_unregistered_categories() {
    let engine = EvaluationEngine::with_rules(vec![Box::new(BearingRules) as Box<dyn CategoryRules>]);

    assert!(engine.supports(ComponentCategory::Bearing));
    assert!(!engine.supports(ComponentCategory::Motor));

    let err = engine
        .evaluate(
            ComponentCategory::Motor,
            &RequirementSet::new(),
            &reference_record("motor-001"),
        )
        .expect_err("motor rules missing");
    assert_eq!(err, EvaluationError::UnsupportedCategory(ComponentCategory::Motor));
}
