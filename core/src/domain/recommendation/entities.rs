use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::menu::entities::MenuItem;

/// A recommendation as surfaced to the UI. Name, price and category always
/// come from the catalog; only `reason` is taken from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub reason: String,
}

impl RecommendationRecord {
    pub fn from_menu_item(item: &MenuItem, reason: Option<&str>) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .or_else(|| item.recommendations.clone())
            .unwrap_or_else(|| item.description.clone());

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            reason,
        }
    }
}

/// A clickable shortcut; choosing it sends `message` as if typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionPick {
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    #[default]
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_dishes: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<RecommendationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_picks: Vec<OptionPick>,
    #[serde(skip)]
    pub source: ReplySource,
}

impl ChatReply {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recommended_dishes: Vec::new(),
            recommendations: Vec::new(),
            option_picks: Vec::new(),
            source: ReplySource::Model,
        }
    }
}
