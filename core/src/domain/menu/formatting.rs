//! Renders the catalog into the forms embedded in model prompts.
//!
//! The model has no other access to the menu, so every id that should be
//! recommendable must appear here verbatim.

use serde_json::{Value, json};

use crate::domain::{common::entities::language::Language, menu::entities::MenuItem};

/// Renders a price without trailing zeros: `19.90` -> `19.9`, `2.00` -> `2`.
pub fn format_price(price: f64) -> String {
    let text = format!("{price:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

pub fn spicy_label(language: Language, level: u8) -> &'static str {
    match (language, level) {
        (Language::Zh, 0) => "不辣",
        (Language::Zh, 1) => "微辣",
        (Language::Zh, _) => "中辣",
        (Language::En, 0) => "not spicy",
        (Language::En, 1) => "mild",
        (Language::En, _) => "medium spicy",
    }
}

/// Compact line-per-dish listing grouped by category in catalog order.
pub fn format_menu_for_prompt(items: &[MenuItem], language: Language) -> String {
    let mut categories: Vec<&str> = Vec::new();
    for item in items {
        if !categories.contains(&item.category.as_str()) {
            categories.push(&item.category);
        }
    }

    let ingredients_sep = match language {
        Language::Zh => "、",
        Language::En => ", ",
    };

    let mut out = String::new();
    for category in categories {
        out.push_str(&format!("[{category}]\n"));

        for item in items.iter().filter(|i| i.category == category) {
            out.push_str(&format!(
                "- id={} | {} | ¥{} | {} | {}",
                item.id,
                item.name,
                format_price(item.price),
                spicy_label(language, item.spicy_level),
                item.description
            ));

            if !item.ingredients.is_empty() {
                out.push_str(" | ");
                out.push_str(&item.ingredients.join(ingredients_sep));
            }

            if let Some(tagline) = &item.recommendations {
                out.push_str(" | ");
                out.push_str(tagline);
            }

            out.push('\n');
        }
    }

    out
}

/// JSON form used by the recommendation-generation call.
pub fn menu_as_json(items: &[MenuItem]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| {
                json!({
                    "id": item.id,
                    "name": item.name,
                    "price": item.price,
                    "category": item.category,
                    "spicyLevel": item.spicy_level,
                    "description": item.description,
                })
            })
            .collect(),
    )
}
