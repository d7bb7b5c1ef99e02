use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::SelectorConfig;
use crate::selection::catalog::{CatalogError, CatalogProvider, StaticCatalog};
use crate::selection::domain::{
    ComponentCategory, ComponentRatings, ComponentRecord, RequirementSet,
};
use crate::selection::service::RecommendationService;

pub(super) fn reference_service() -> RecommendationService<StaticCatalog> {
    RecommendationService::new(
        Arc::new(StaticCatalog::reference()),
        &SelectorConfig::default(),
    )
}

pub(super) fn service_with<C: CatalogProvider + 'static>(catalog: C) -> RecommendationService<C> {
    RecommendationService::new(Arc::new(catalog), &SelectorConfig::default())
}

pub(super) fn reference_record(id: &str) -> ComponentRecord {
    StaticCatalog::reference()
        .all()
        .expect("reference catalog loads")
        .into_iter()
        .find(|record| record.id == id)
        .expect("record exists in reference catalog")
}

/// The reference motor relabelled as a cheaper IE2 variant.
pub(super) fn ie2_motor() -> ComponentRecord {
    let mut motor = reference_record("motor-001");
    motor.id = "motor-ie2".to_string();
    if let ComponentRatings::Motor(ratings) = &mut motor.ratings {
        ratings.efficiency_class = "IE2".to_string();
        ratings.efficiency_pct = 82.5;
    }
    motor
}

pub(super) fn bearing_requirements() -> RequirementSet {
    RequirementSet::new()
        .with("dynamicLoad", "20")
        .with("speed", "8000")
        .with("boreSize", "40")
        .with("targetL10Life", "10000")
}

pub(super) fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Catalog whose backing store is down.
pub(super) struct UnavailableCatalog;

impl CatalogProvider for UnavailableCatalog {
    fn candidates(
        &self,
        _category: ComponentCategory,
    ) -> Result<Vec<ComponentRecord>, CatalogError> {
        Err(CatalogError::Unavailable("catalog store offline".to_string()))
    }
}

/// Catalog that files every record under bearings regardless of its ratings.
pub(super) struct MislabeledCatalog;

impl CatalogProvider for MislabeledCatalog {
    fn candidates(
        &self,
        _category: ComponentCategory,
    ) -> Result<Vec<ComponentRecord>, CatalogError> {
        Ok(vec![reference_record("motor-001")])
    }
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
