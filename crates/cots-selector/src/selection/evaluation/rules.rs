use crate::selection::domain::{CriterionResult, CriterionWeight};

/// Capacity-style check: the component rating covers the requirement.
pub(crate) fn at_least(rating: f64, required: f64) -> bool {
    rating >= required
}

/// Dimensional match within an absolute tolerance.
pub(crate) fn within(actual: f64, target: f64, tolerance: f64) -> bool {
    actual == target || (actual - target).abs() <= tolerance
}

/// Percentage band around the requirement. A zero requirement admits nothing but zero.
pub(crate) fn within_ratio(actual: f64, target: f64, ratio: f64) -> bool {
    actual >= target * (1.0 - ratio) && actual <= target * (1.0 + ratio)
}

pub(crate) fn one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

pub(crate) fn lacks(value: &str, excluded: &str) -> bool {
    !value.contains(excluded)
}

/// Accumulates criteria in evaluation order.
#[derive(Debug, Default)]
pub(crate) struct CriteriaSheet {
    criteria: Vec<CriterionResult>,
}

impl CriteriaSheet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        name: &str,
        actual_value: String,
        requirement: String,
        met: bool,
        weight: CriterionWeight,
    ) -> &mut Self {
        self.criteria.push(CriterionResult {
            name: name.to_string(),
            actual_value,
            requirement,
            met,
            weight,
        });
        self
    }

    pub(crate) fn finish(self) -> Vec<CriterionResult> {
        self.criteria
    }
}

/// `round(100 * met / total)`, zero when there is nothing to meet.
pub(crate) fn match_score(met: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = (met.min(total) as f64) * 100.0 / total as f64;
    ratio.round() as u8
}
