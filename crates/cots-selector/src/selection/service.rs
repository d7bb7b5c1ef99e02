use std::sync::Arc;

use tracing::{info, warn};

use super::catalog::{CatalogError, CatalogProvider, CatalogQuery};
use super::domain::{
    ComponentCategory, ComponentRecord, ParseCategoryError, Recommendation, RecommendationSet,
    RequirementSet,
};
use super::evaluation::{EvaluationEngine, EvaluationError};
use crate::config::{SelectorConfig, DEFAULT_PROJECT_NAME};

pub const NO_CANDIDATES_MESSAGE: &str = "No components found for the selected type";

/// Assembles recommendations from the injected catalog and the evaluation engine.
pub struct RecommendationService<C> {
    catalog: Arc<C>,
    engine: Arc<EvaluationEngine>,
    vendor_search_url: String,
    default_project_name: String,
}

impl<C> RecommendationService<C>
where
    C: CatalogProvider + 'static,
{
    pub fn new(catalog: Arc<C>, config: &SelectorConfig) -> Self {
        Self::with_engine(
            catalog,
            Arc::new(EvaluationEngine::standard()),
            config.vendor_search_url.clone(),
        )
        .with_project_name(config.default_project_name.clone())
    }

    pub fn with_engine(
        catalog: Arc<C>,
        engine: Arc<EvaluationEngine>,
        vendor_search_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            engine,
            vendor_search_url: vendor_search_url.into(),
            default_project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.default_project_name = name.into();
        self
    }

    /// BOM project name used when a request does not name one.
    pub fn default_project_name(&self) -> &str {
        &self.default_project_name
    }

    /// Entry point for caller-supplied category tags.
    pub fn recommend(
        &self,
        component_type: Option<&str>,
        requirements: &RequirementSet,
    ) -> Result<RecommendationSet, SelectionError> {
        let category = ComponentCategory::parse_optional(component_type).map_err(|error| {
            warn!(component_type = ?component_type, %error, "rejected recommendation request");
            SelectionError::InvalidCategory(error)
        })?;
        self.recommend_category(category, requirements)
    }

    /// Evaluates every candidate in catalog order. Scores do not reorder results.
    pub fn recommend_category(
        &self,
        category: ComponentCategory,
        requirements: &RequirementSet,
    ) -> Result<RecommendationSet, SelectionError> {
        let candidates = self.catalog.candidates(category)?;

        if candidates.is_empty() {
            warn!(category = %category, "catalog has no candidates");
            return Ok(RecommendationSet {
                category,
                recommendations: Vec::new(),
                total_results: 0,
                message: Some(NO_CANDIDATES_MESSAGE.to_string()),
            });
        }

        let recommendations = candidates
            .into_iter()
            .map(|component| self.assemble(category, requirements, component))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            category = %category,
            candidates = recommendations.len(),
            fields = requirements.len(),
            "assembled recommendations"
        );

        Ok(RecommendationSet {
            category,
            total_results: recommendations.len(),
            recommendations,
            message: None,
        })
    }

    /// Catalog listing filtered by `query`, in catalog order.
    pub fn catalog(&self, query: &CatalogQuery) -> Result<Vec<ComponentRecord>, SelectionError> {
        let records = match query.category {
            Some(category) => self.catalog.candidates(category)?,
            None => self.catalog.all()?,
        };
        Ok(records
            .into_iter()
            .filter(|record| query.matches(record))
            .collect())
    }

    /// Link for a record without its own vendor URL.
    pub fn vendor_url_for(&self, component: &ComponentRecord) -> String {
        match component.vendor_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => url.to_string(),
            None => format!(
                "{}{}",
                self.vendor_search_url,
                urlencoding::encode(&component.name)
            ),
        }
    }

    fn assemble(
        &self,
        category: ComponentCategory,
        requirements: &RequirementSet,
        component: ComponentRecord,
    ) -> Result<Recommendation, SelectionError> {
        let outcome = self.engine.evaluate(category, requirements, &component)?;
        let performance_metrics = self.engine.report(category, requirements, &component)?;
        let vendor_url = self.vendor_url_for(&component);
        let specifications = component.specifications();

        Ok(Recommendation {
            id: component.id,
            name: component.name,
            manufacturer: component.manufacturer,
            part_number: component.part_number,
            rating: component.rating,
            price: component.price,
            availability: component.availability,
            lead_time: component.lead_time,
            specifications,
            pros: component.pros,
            cons: component.cons,
            alternatives: component.alternatives,
            vendor_url,
            match_score: outcome.match_score,
            matched_count: outcome.matched_count,
            criteria_matches: outcome.criteria,
            performance_metrics,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error(transparent)]
    InvalidCategory(#[from] ParseCategoryError),
    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl SelectionError {
    /// True when the caller sent something we cannot act on.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SelectionError::InvalidCategory(_))
    }
}
