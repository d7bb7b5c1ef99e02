use serde::{Deserialize, Serialize};

use super::domain::{ComponentCategory, Recommendation};
use super::export::{unit_price, BomLine};

/// One line in the session cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub component_id: String,
    pub name: String,
    pub manufacturer: String,
    pub category: ComponentCategory,
    pub quantity: u32,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<String>,
    pub availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_url: Option<String>,
}

impl CartItem {
    pub fn from_recommendation(recommendation: &Recommendation, category: ComponentCategory) -> Self {
        Self {
            component_id: recommendation.id.clone(),
            name: recommendation.name.clone(),
            manufacturer: recommendation.manufacturer.clone(),
            category,
            quantity: 1,
            price: recommendation.price.clone(),
            part_number: recommendation.part_number.clone(),
            lead_time: recommendation.lead_time.clone(),
            availability: recommendation.availability.clone(),
            vendor_url: Some(recommendation.vendor_url.clone()).filter(|url| !url.is_empty()),
        }
    }

    pub fn line_total(&self) -> f64 {
        unit_price(&self.price).unwrap_or(0.0) * f64::from(self.quantity)
    }
}

/// Session-local cart. Every operation consumes the cart and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-adding a component bumps its quantity instead of duplicating the line.
    pub fn add(mut self, item: CartItem) -> Self {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.component_id == item.component_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(CartItem { quantity: 1, ..item }),
        }
        self
    }

    pub fn remove(mut self, component_id: &str) -> Self {
        self.items.retain(|item| item.component_id != component_id);
        self
    }

    /// A quantity of zero drops the line.
    pub fn set_quantity(self, component_id: &str, quantity: u32) -> Self {
        if quantity == 0 {
            return self.remove(component_id);
        }
        let mut cart = self;
        if let Some(item) = cart
            .items
            .iter_mut()
            .find(|item| item.component_id == component_id)
        {
            item.quantity = quantity;
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, component_id: &str) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.component_id == component_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Lower-bound estimate; unpriced lines count as zero.
    pub fn estimated_total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// `(name, url)` for every line that carries a vendor link.
    pub fn vendor_links(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .filter_map(|item| {
                item.vendor_url
                    .as_deref()
                    .map(|url| (item.name.as_str(), url))
            })
            .collect()
    }

    pub fn bom_lines(&self) -> Vec<BomLine> {
        self.items
            .iter()
            .map(|item| BomLine {
                name: item.name.clone(),
                manufacturer: item.manufacturer.clone(),
                part_number: item.part_number.clone(),
                quantity: item.quantity,
                price: Some(item.price.clone()),
                availability: Some(item.availability.clone()),
                lead_time: item.lead_time.clone(),
                vendor_url: item.vendor_url.clone(),
            })
            .collect()
    }
}
