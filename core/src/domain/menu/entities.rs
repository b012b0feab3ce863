use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::{app_errors::CoreError, language::Language};

pub const MAX_SPICY_LEVEL: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub spicy_level: u8,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    /// Short selling line shown under the dish card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Nutrition {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: String,
    pub rating: u8,
    pub comment: String,
    pub author: String,
}

/// Immutable menu reference data, one list per language.
///
/// Both variants are validated on construction: ids are non-empty and unique
/// within a language, and spicy levels stay within `0..=MAX_SPICY_LEVEL`.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCatalog {
    zh: Vec<MenuItem>,
    en: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(zh: Vec<MenuItem>, en: Vec<MenuItem>) -> Result<Self, CoreError> {
        validate_items(Language::Zh, &zh)?;
        validate_items(Language::En, &en)?;

        Ok(Self { zh, en })
    }

    pub fn items(&self, language: Language) -> &[MenuItem] {
        match language {
            Language::Zh => &self.zh,
            Language::En => &self.en,
        }
    }

    pub fn find(&self, language: Language, id: &str) -> Option<&MenuItem> {
        let id = id.trim();
        self.items(language).iter().find(|item| item.id == id)
    }

    pub fn find_by_name(&self, language: Language, name: &str) -> Option<&MenuItem> {
        let name = name.trim();
        self.items(language)
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self, language: Language) -> usize {
        self.items(language).len()
    }
}

fn validate_items(language: Language, items: &[MenuItem]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();

    for item in items {
        if item.id.trim().is_empty() {
            return Err(CoreError::MenuCatalog(format!(
                "{language} menu contains an item without id ({})",
                item.name
            )));
        }

        if !seen.insert(item.id.as_str()) {
            return Err(CoreError::MenuCatalog(format!(
                "{language} menu contains duplicate id {}",
                item.id
            )));
        }

        if item.spicy_level > MAX_SPICY_LEVEL {
            return Err(CoreError::MenuCatalog(format!(
                "{language} menu item {} has spicy level {}",
                item.id, item.spicy_level
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn dish(id: &str, name: &str, price: f64, category: &str, spicy: u8) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: category.to_string(),
            spicy_level: spicy,
            ingredients: vec!["salt".to_string()],
            image: None,
            nutrition: None,
            recommendations: None,
            reviews: Vec::new(),
        }
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let items = vec![
            dish("rice", "Rice", 2.0, "Staples", 0),
            dish("rice", "More rice", 2.0, "Staples", 0),
        ];
        let result = MenuCatalog::new(Vec::new(), items);
        assert!(matches!(result, Err(CoreError::MenuCatalog(_))));
    }

    #[test]
    fn test_rejects_out_of_range_spicy_level() {
        let items = vec![dish("fire", "Fire", 9.0, "Hot Dishes", 3)];
        assert!(MenuCatalog::new(items, Vec::new()).is_err());
    }

    #[test]
    fn test_find_by_id_and_name() {
        let catalog = MenuCatalog::new(
            vec![dish("rice", "米饭", 2.0, "主食", 0)],
            vec![dish("rice", "Steamed Rice", 2.0, "Staples", 0)],
        )
        .unwrap();

        assert_eq!(catalog.find(Language::En, " rice ").unwrap().name, "Steamed Rice");
        assert_eq!(catalog.find(Language::Zh, "rice").unwrap().name, "米饭");
        assert_eq!(
            catalog.find_by_name(Language::En, "steamed rice").unwrap().id,
            "rice"
        );
        assert!(catalog.find(Language::En, "noodles").is_none());
    }

    #[test]
    fn test_menu_item_reads_camel_case_json() {
        let raw = r#"{"id":"mala-tofu","name":"Spicy Mapo Tofu","price":2.9,"description":"d","category":"Side Dishes","spicyLevel":2,"ingredients":["Soft tofu"],"nutrition":{"calories":150,"carbs":8,"protein":12,"fat":7}}"#;
        let item: MenuItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.spicy_level, 2);
        assert_eq!(item.nutrition.unwrap().calories, 150.0);
        assert!(item.reviews.is_empty());
    }
}
