//! Deterministic dish selection used when the model output is unusable.

use serde::{Deserialize, Serialize};

use crate::domain::menu::entities::MenuItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DishPreference {
    /// Fixed allow-list of dish ids, in preference order.
    Dishes(Vec<String>),
    Categories(Vec<String>),
    MaxSpicy(u8),
    MinSpicy(u8),
}

impl DishPreference {
    fn select<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        match self {
            DishPreference::Dishes(ids) => ids
                .iter()
                .filter_map(|id| items.iter().find(|item| &item.id == id))
                .collect(),
            DishPreference::Categories(categories) => items
                .iter()
                .filter(|item| {
                    categories
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(&item.category))
                })
                .collect(),
            DishPreference::MaxSpicy(level) => items
                .iter()
                .filter(|item| item.spicy_level <= *level)
                .collect(),
            DishPreference::MinSpicy(level) => items
                .iter()
                .filter(|item| item.spicy_level >= *level)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub keywords: Vec<String>,
    pub preference: DishPreference,
}

impl FallbackRule {
    pub fn new(keywords: &[&str], preference: DishPreference) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            preference,
        }
    }

    pub fn matches(&self, preferences: &str) -> bool {
        let preferences = preferences.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| preferences.contains(&keyword.to_lowercase()))
    }
}

/// Ordered rule table. The first matching rule wins, so negated signals
/// ("不油腻", "not spicy") are listed before the plain ones they contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    pub rules: Vec<FallbackRule>,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();

        Self {
            rules: vec![
                FallbackRule::new(
                    &[
                        "不油", "不辣", "清淡", "清爽", "减脂", "not oily", "not spicy", "light",
                        "mild", "healthy",
                    ],
                    DishPreference::MaxSpicy(0),
                ),
                FallbackRule::new(
                    &["油", "重口", "下饭", "rich", "oily", "hearty", "greasy"],
                    DishPreference::Dishes(strings(&[
                        "hongshaorou-quail-eggs",
                        "meicai-kourou",
                        "salted-egg-yolk-lionhead",
                        "lajiao-chaorou",
                        "classic-bear-burger",
                    ])),
                ),
                FallbackRule::new(&["辣", "spicy"], DishPreference::MinSpicy(2)),
                FallbackRule::new(
                    &["主食", "米饭", "面", "粉", "noodle", "staple"],
                    DishPreference::Categories(strings(&["主食", "Staples"])),
                ),
                FallbackRule::new(
                    &["西餐", "汉堡", "牛排", "western", "burger", "steak"],
                    DishPreference::Categories(strings(&["汉堡", "牛排", "Burgers", "Steaks"])),
                ),
                FallbackRule::new(
                    &["汤", "soup"],
                    DishPreference::Categories(strings(&["汤品", "Soups"])),
                ),
                FallbackRule::new(
                    &["喝", "饮", "drink", "beverage", "tea"],
                    DishPreference::Categories(strings(&["饮品", "Beverages"])),
                ),
            ],
        }
    }
}

impl FallbackPolicy {
    pub fn matching_rule(&self, preferences: &str) -> Option<&FallbackRule> {
        self.rules.iter().find(|rule| rule.matches(preferences))
    }

    /// Up to `count` distinct dishes: the matching rule's picks first, then
    /// the rest of the catalog in listed order.
    pub fn select(&self, items: &[MenuItem], preferences: &str, count: usize) -> Vec<MenuItem> {
        let preferred = self
            .matching_rule(preferences)
            .map(|rule| rule.preference.select(items))
            .unwrap_or_default();

        let mut picked: Vec<&MenuItem> = Vec::with_capacity(count);
        for item in preferred.into_iter().chain(items.iter()) {
            if picked.len() >= count {
                break;
            }
            if !picked.iter().any(|p| p.id == item.id) {
                picked.push(item);
            }
        }

        picked.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::entities::tests::dish;

    fn menu() -> Vec<MenuItem> {
        vec![
            dish("gongbao-chicken", "Kung Pao Chicken", 8.8, "Stir-Fry", 2),
            dish("steamed-egg", "Silky Steamed Egg", 3.9, "Steamed Dishes", 0),
            dish("hongshaorou-quail-eggs", "Braised Pork", 19.9, "Hot Dishes", 0),
            dish("rice", "Steamed Rice", 2.0, "Staples", 0),
            dish("meicai-kourou", "Steamed Pork", 12.9, "Hot Dishes", 0),
        ]
    }

    fn ids(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_rich_signal_prefers_allow_list() {
        let picked = FallbackPolicy::default().select(&menu(), "我想吃点重口味的", 3);
        assert_eq!(
            ids(&picked),
            vec!["hongshaorou-quail-eggs", "meicai-kourou", "gongbao-chicken"]
        );
    }

    #[test]
    fn test_negated_signal_is_checked_first() {
        let picked = FallbackPolicy::default().select(&menu(), "不油腻的", 2);
        assert_eq!(ids(&picked), vec!["steamed-egg", "hongshaorou-quail-eggs"]);
    }

    #[test]
    fn test_spicy_signal() {
        let picked = FallbackPolicy::default().select(&menu(), "Something SPICY please", 1);
        assert_eq!(ids(&picked), vec!["gongbao-chicken"]);
    }

    #[test]
    fn test_no_signal_uses_catalog_order() {
        let picked = FallbackPolicy::default().select(&menu(), "surprise me", 2);
        assert_eq!(ids(&picked), vec!["gongbao-chicken", "steamed-egg"]);
    }

    #[test]
    fn test_never_returns_more_than_catalog() {
        let picked = FallbackPolicy::default().select(&menu(), "", 6);
        assert_eq!(picked.len(), 5);
        assert!(FallbackPolicy::default().select(&[], "rich", 3).is_empty());
    }

    #[test]
    fn test_rules_deserialize_from_json() {
        let raw = r#"{"rules":[{"keywords":["fish"],"preference":{"kind":"categories","value":["Seafood"]}}]}"#;
        let policy: FallbackPolicy = serde_json::from_str(raw).unwrap();
        assert!(policy.matching_rule("Any FISH today?").is_some());
        assert!(policy.matching_rule("beef").is_none());
    }
}
