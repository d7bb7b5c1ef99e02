use std::sync::Arc;

use chrono::{TimeZone, Utc};
use cots_selector::config::SelectorConfig;
use cots_selector::selection::{
    export, ComponentCategory, RecommendationService, RequirementSet, SelectorState,
    StaticCatalog,
};

fn service() -> RecommendationService<StaticCatalog> {
    RecommendationService::new(
        Arc::new(StaticCatalog::reference()),
        &SelectorConfig::default(),
    )
}

#[test]
fn engineer_selects_a_bearing_and_exports_the_shortlist() {
    let service = service();
    let generated_at = Utc
        .with_ymd_and_hms(2025, 1, 15, 9, 0, 0)
        .single()
        .expect("valid timestamp");

    let state = SelectorState::new()
        .with_field("dynamicLoad", "30")
        .with_field("speed", "6000")
        .with_field("boreSize", "40")
        .with_field("bearingEnvironment", "Dusty")
        .with_field("lubrication", "Grease");

    let results = service
        .recommend(Some("bearing"), state.requirements())
        .expect("bearing recommendations");
    assert_eq!(results.category, ComponentCategory::Bearing);
    assert_eq!(results.total_results, results.recommendations.len());

    let state = state
        .with_results(results)
        .add_to_cart("bearing-002")
        .set_cart_quantity("bearing-002", 4);

    let timken = &state.recommendations()[1];
    assert!(timken.criteria_matches[0].met, "47.5 kN covers a 30 kN load");
    assert!(timken.match_score >= state.recommendations()[0].match_score);

    let sheet = state
        .spec_sheet_request("bearing-002")
        .expect("result in current set");
    let specs = export::specs_document(&sheet, generated_at).expect("spec sheet renders");
    let specs_body = specs.body;
    assert!(specs_body.contains("Component Name,Tapered Roller Bearing 30208\n"));
    assert!(specs_body.contains("Dynamic Load Capacity,MET,47.5 kN,≥ 30 kN,critical\n"));

    let datasheet = export::datasheet_document(&sheet, generated_at);
    let datasheet_body = datasheet.body;
    assert!(datasheet_body.contains("Generated:        2025-01-15"));

    let bom = state.cart_bom_request(Some("Gearbox Retrofit".to_string()));
    let document = export::bom_document(&bom, service.default_project_name(), generated_at)
        .expect("bom renders");
    assert!(document.filename.starts_with("BOM-Gearbox Retrofit-"));
    let bom_body = document.body;
    assert!(bom_body.contains("Total Components,1\n"));
    assert!(bom_body.contains(",4,$40-50,160.00,"));
    assert!(bom_body.ends_with("Total Estimated Cost,,,,,,160.00\n"));
}

#[test]
fn each_category_returns_catalog_entries() {
    let service = service();

    for category in ComponentCategory::ALL {
        let set = service
            .recommend_category(category, &RequirementSet::new())
            .expect("reference catalog evaluates");
        assert!(!set.is_empty(), "{category} has reference entries");
        for recommendation in &set.recommendations {
            assert!(recommendation.match_score <= 100);
            assert!(!recommendation.vendor_url.is_empty());
            assert_eq!(
                recommendation.matched_count,
                recommendation
                    .criteria_matches
                    .iter()
                    .filter(|criterion| criterion.met)
                    .count()
            );
        }
    }
}
