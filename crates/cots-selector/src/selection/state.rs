use super::cart::{Cart, CartItem};
use super::domain::{Recommendation, RecommendationSet, RequirementSet};
use super::export::{BomLine, BomRequest, SpecSheetRequest};

/// Client-side selector session: form input, last results, cart and error banner.
///
/// Transitions take the state by value and return the next state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorState {
    requirements: RequirementSet,
    results: Option<RecommendationSet>,
    cart: Cart,
    error: Option<String>,
}

impl SelectorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.requirements.insert(key, value);
        self
    }

    /// A new result set replaces the previous one and clears any error.
    pub fn with_results(mut self, results: RecommendationSet) -> Self {
        self.results = Some(results);
        self.error = None;
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Unknown ids leave the cart untouched.
    pub fn add_to_cart(mut self, component_id: &str) -> Self {
        let item = self.results.as_ref().and_then(|set| {
            set.recommendations
                .iter()
                .find(|recommendation| recommendation.id == component_id)
                .map(|recommendation| CartItem::from_recommendation(recommendation, set.category))
        });
        if let Some(item) = item {
            self.cart = self.cart.add(item);
        }
        self
    }

    pub fn set_cart_quantity(mut self, component_id: &str, quantity: u32) -> Self {
        self.cart = self.cart.set_quantity(component_id, quantity);
        self
    }

    pub fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    pub fn results(&self) -> Option<&RecommendationSet> {
        self.results.as_ref()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        self.results
            .as_ref()
            .map(|set| set.recommendations.as_slice())
            .unwrap_or(&[])
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Every current result at quantity one.
    pub fn bom_request(&self, project_name: Option<String>) -> BomRequest {
        BomRequest {
            project_name,
            components: self
                .recommendations()
                .iter()
                .map(|recommendation| BomLine::from_recommendation(recommendation, 1))
                .collect(),
        }
    }

    pub fn cart_bom_request(&self, project_name: Option<String>) -> BomRequest {
        BomRequest {
            project_name,
            components: self.cart.bom_lines(),
        }
    }

    pub fn spec_sheet_request(&self, component_id: &str) -> Option<SpecSheetRequest> {
        let set = self.results.as_ref()?;
        set.recommendations
            .iter()
            .find(|recommendation| recommendation.id == component_id)
            .map(|recommendation| SpecSheetRequest::from_recommendation(recommendation, set.category))
    }
}
