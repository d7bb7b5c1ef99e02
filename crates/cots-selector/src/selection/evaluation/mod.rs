//! Per-category criteria evaluation and match scoring.
//!
//! Each category registers one [`CategoryRules`] strategy. The engine dispatches on
//! [`ComponentCategory`] and never re-reads display strings; reference values come from
//! the record's typed ratings.

mod categories;
pub(crate) mod rules;

use std::collections::BTreeMap;

use serde::Serialize;

pub use categories::{BearingRules, FastenerRules, GearRules, MotorRules, SealRules};

use super::domain::{
    ComponentCategory, ComponentRatings, ComponentRecord, CriterionResult, PerformanceMetric,
    RequirementSet,
};

/// Fixed, ordered rule set for one component category.
pub trait CategoryRules: Send + Sync {
    fn category(&self) -> ComponentCategory;

    /// Criteria in a fixed order. The count never depends on the inputs.
    fn criteria(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<CriterionResult>, EvaluationError>;

    /// Advisory comparisons; these never feed the score.
    fn metrics(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("no evaluation rules registered for {0}")]
    UnsupportedCategory(ComponentCategory),
    #[error("expected {expected} ratings, found {found}")]
    RatingsMismatch {
        expected: ComponentCategory,
        found: ComponentCategory,
    },
}

/// Criteria and score for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub criteria: Vec<CriterionResult>,
    pub match_score: u8,
    pub matched_count: usize,
}

impl EvaluationOutcome {
    fn from_criteria(criteria: Vec<CriterionResult>) -> Self {
        let matched_count = criteria.iter().filter(|criterion| criterion.met).count();
        let match_score = rules::match_score(matched_count, criteria.len());
        Self {
            criteria,
            match_score,
            matched_count,
        }
    }
}

/// Stateless dispatcher over the registered category strategies.
pub struct EvaluationEngine {
    rules: BTreeMap<ComponentCategory, Box<dyn CategoryRules>>,
}

impl EvaluationEngine {
    /// All five built-in categories.
    pub fn standard() -> Self {
        Self::with_rules(vec![
            Box::new(BearingRules) as Box<dyn CategoryRules>,
            Box::new(MotorRules),
            Box::new(GearRules),
            Box::new(SealRules),
            Box::new(FastenerRules),
        ])
    }

    /// Later entries replace earlier ones for the same category.
    pub fn with_rules(rules: Vec<Box<dyn CategoryRules>>) -> Self {
        let rules = rules
            .into_iter()
            .map(|strategy| (strategy.category(), strategy))
            .collect();
        Self { rules }
    }

    pub fn supports(&self, category: ComponentCategory) -> bool {
        self.rules.contains_key(&category)
    }

    pub fn evaluate(
        &self,
        category: ComponentCategory,
        requirements: &RequirementSet,
        component: &ComponentRecord,
    ) -> Result<EvaluationOutcome, EvaluationError> {
        let strategy = self.strategy_for(category, component)?;
        let criteria = strategy.criteria(requirements, &component.ratings)?;
        Ok(EvaluationOutcome::from_criteria(criteria))
    }

    pub fn report(
        &self,
        category: ComponentCategory,
        requirements: &RequirementSet,
        component: &ComponentRecord,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError> {
        let strategy = self.strategy_for(category, component)?;
        strategy.metrics(requirements, &component.ratings)
    }

    fn strategy_for(
        &self,
        category: ComponentCategory,
        component: &ComponentRecord,
    ) -> Result<&dyn CategoryRules, EvaluationError> {
        let found = component.category();
        if found != category {
            return Err(EvaluationError::RatingsMismatch {
                expected: category,
                found,
            });
        }

        self.rules
            .get(&category)
            .map(|strategy| strategy.as_ref())
            .ok_or(EvaluationError::UnsupportedCategory(category))
    }
}

impl Default for EvaluationEngine {
    fn default() -> Self {
        Self::standard()
    }
}
