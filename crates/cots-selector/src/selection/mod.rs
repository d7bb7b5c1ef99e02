//! Component selection: catalog lookup, criteria evaluation, recommendation assembly,
//! document exports, and the session cart.

pub mod cart;
pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod export;
pub mod metrics;
pub mod router;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub use cart::{Cart, CartItem};
pub use catalog::{CatalogError, CatalogProvider, CatalogQuery, StaticCatalog};
pub use domain::{
    Alternative, BearingRatings, ComponentCategory, ComponentRatings, ComponentRecord,
    CriterionResult, CriterionWeight, FastenerRatings, GearRatings, MotorRatings,
    ParseCategoryError, PerformanceMetric, Recommendation, RecommendationSet, RequirementSet,
    SealRatings,
};
pub use evaluation::{CategoryRules, EvaluationEngine, EvaluationError, EvaluationOutcome};
pub use export::{
    BomLine, BomRequest, ExportDocument, ExportError, SpecSheetRequest, PLACEHOLDER,
};
pub use router::selector_router;
pub use service::{RecommendationService, SelectionError, NO_CANDIDATES_MESSAGE};
pub use state::SelectorState;
