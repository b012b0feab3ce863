use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Totals below this are `Low`.
pub const LOW_PRICE_THRESHOLD: f64 = 30.0;
/// Totals above this are `High`.
pub const HIGH_PRICE_THRESHOLD: f64 = 50.0;

pub const STAPLE_CATEGORIES: &[&str] = &["主食", "staples", "staple"];
pub const DRINK_CATEGORIES: &[&str] = &["饮品", "beverages", "drinks"];
pub const DESSERT_CATEGORIES: &[&str] = &["甜品", "desserts", "dessert"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceLevel {
    Low,
    Medium,
    High,
}

impl PriceLevel {
    pub fn from_total(total: f64) -> Self {
        if total < LOW_PRICE_THRESHOLD {
            PriceLevel::Low
        } else if total > HIGH_PRICE_THRESHOLD {
            PriceLevel::High
        } else {
            PriceLevel::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceLevel::Low => "low",
            PriceLevel::Medium => "medium",
            PriceLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_price: f64,
    pub item_count: u64,
    pub categories: Vec<String>,
    pub price_level: PriceLevel,
    pub has_staple: bool,
    pub has_drink: bool,
    pub has_dessert: bool,
    pub average_price: f64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}
