use crate::domain::{
    cart::{
        entities::CartItem,
        value_objects::{
            CartSummary, DESSERT_CATEGORIES, DRINK_CATEGORIES, PriceLevel, STAPLE_CATEGORIES,
        },
    },
    common::entities::language::Language,
    menu::{entities::MenuCatalog, formatting::format_price},
};

/// Reduces the replayed cart to the figures the prompt needs.
///
/// Prices come from the catalog when the id resolves; the client-sent price
/// is only used for lines the catalog does not know.
pub fn summarize_cart(items: &[CartItem], catalog: &MenuCatalog, language: Language) -> CartSummary {
    let mut total_price = 0.0;
    let mut item_count = 0u64;
    let mut categories: Vec<String> = Vec::new();

    for line in items.iter().filter(|line| line.quantity > 0) {
        let known = catalog.find(language, &line.id);
        let price = known.map(|item| item.price).unwrap_or(line.price);
        let category = known
            .map(|item| item.category.as_str())
            .unwrap_or(line.category.as_str());

        total_price += price * f64::from(line.quantity);
        item_count = item_count.saturating_add(u64::from(line.quantity));

        if !category.is_empty() && !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }

    let total_price = round_cents(total_price);
    let average_price = if item_count == 0 {
        0.0
    } else {
        round_cents(total_price / item_count as f64)
    };

    CartSummary {
        total_price,
        item_count,
        price_level: PriceLevel::from_total(total_price),
        has_staple: contains_any(&categories, STAPLE_CATEGORIES),
        has_drink: contains_any(&categories, DRINK_CATEGORIES),
        has_dessert: contains_any(&categories, DESSERT_CATEGORIES),
        categories,
        average_price,
    }
}

/// One paragraph for the system instruction.
pub fn describe_cart(summary: &CartSummary, language: Language) -> String {
    let yes_no = |flag: bool| match (language, flag) {
        (Language::Zh, true) => "有",
        (Language::Zh, false) => "无",
        (Language::En, true) => "yes",
        (Language::En, false) => "no",
    };

    match language {
        Language::Zh => format!(
            "购物车：共{}件，总价¥{}，均价¥{}，价位{}，分类：{}；主食：{}，饮品：{}，甜品：{}。",
            summary.item_count,
            format_price(summary.total_price),
            format_price(summary.average_price),
            summary.price_level.as_str(),
            summary.categories.join("、"),
            yes_no(summary.has_staple),
            yes_no(summary.has_drink),
            yes_no(summary.has_dessert),
        ),
        Language::En => format!(
            "Cart: {} items, total ¥{}, average ¥{}, price level {}, categories: {}; staple: {}, drink: {}, dessert: {}.",
            summary.item_count,
            format_price(summary.total_price),
            format_price(summary.average_price),
            summary.price_level.as_str(),
            summary.categories.join(", "),
            yes_no(summary.has_staple),
            yes_no(summary.has_drink),
            yes_no(summary.has_dessert),
        ),
    }
}

fn contains_any(categories: &[String], wanted: &[&str]) -> bool {
    categories
        .iter()
        .any(|c| wanted.iter().any(|w| c.to_lowercase() == *w))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::entities::tests::dish;

    fn line(id: &str, price: f64, quantity: u32, category: &str) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: id.to_string(),
            price,
            quantity,
            category: category.to_string(),
        }
    }

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(
            Vec::new(),
            vec![
                dish("rice", "Steamed Rice", 2.0, "Staples", 0),
                dish("cola", "Cola", 6.0, "Beverages", 0),
                dish("steak", "Steak", 49.0, "Steaks", 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_three_items_totaling_18_is_low() {
        let cart = vec![
            line("a", 6.0, 1, "Snacks"),
            line("b", 6.0, 1, "Snacks"),
            line("c", 6.0, 1, "Snacks"),
        ];
        let summary = summarize_cart(&cart, &catalog(), Language::En);
        assert_eq!(summary.total_price, 18.0);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.price_level, PriceLevel::Low);
        assert_eq!(summary.average_price, 6.0);
    }

    #[test]
    fn test_three_items_totaling_55_is_high() {
        let cart = vec![line("steak", 0.0, 1, ""), line("cola", 6.0, 1, ""), line("x", 0.0, 1, "")];
        let summary = summarize_cart(&cart, &catalog(), Language::En);
        assert_eq!(summary.total_price, 55.0);
        assert_eq!(summary.price_level, PriceLevel::High);
    }

    #[test]
    fn test_medium_band_is_inclusive() {
        assert_eq!(PriceLevel::from_total(30.0), PriceLevel::Medium);
        assert_eq!(PriceLevel::from_total(50.0), PriceLevel::Medium);
        assert_eq!(PriceLevel::from_total(29.99), PriceLevel::Low);
        assert_eq!(PriceLevel::from_total(50.01), PriceLevel::High);
    }

    #[test]
    fn test_flags_and_categories() {
        let cart = vec![
            line("rice", 2.0, 2, "Staples"),
            line("cola", 6.0, 1, "Beverages"),
            line("gone", 99.0, 0, "Desserts"),
        ];
        let summary = summarize_cart(&cart, &catalog(), Language::En);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_price, 10.0);
        assert_eq!(summary.categories, vec!["Staples", "Beverages"]);
        assert!(summary.has_staple);
        assert!(summary.has_drink);
        assert!(!summary.has_dessert);
    }

    #[test]
    fn test_huge_quantities_do_not_overflow() {
        let huge = line("rice", 2.0, 3_000_000_000, "Staples");
        let summary = summarize_cart(&[huge.clone(), huge], &catalog(), Language::En);
        assert_eq!(summary.item_count, 6_000_000_000);
        assert_eq!(summary.total_price, 12_000_000_000.0);
        assert_eq!(summary.average_price, 2.0);
        assert_eq!(summary.price_level, PriceLevel::High);
    }

    #[test]
    fn test_catalog_price_wins_over_client_price() {
        let cart = vec![line("rice", 100.0, 1, "Staples")];
        let summary = summarize_cart(&cart, &catalog(), Language::En);
        assert_eq!(summary.total_price, 2.0);
    }

    #[test]
    fn test_empty_cart() {
        let summary = summarize_cart(&[], &catalog(), Language::En);
        assert!(summary.is_empty());
        assert_eq!(summary.average_price, 0.0);
        assert_eq!(summary.price_level, PriceLevel::Low);
    }

    #[test]
    fn test_describe_mentions_level() {
        let cart = vec![line("steak", 49.0, 2, "Steaks")];
        let summary = summarize_cart(&cart, &catalog(), Language::Zh);
        assert_eq!(summary.categories, vec!["Steaks"]);
        let text = describe_cart(&summary, Language::En);
        assert!(text.contains("price level high"));
        assert!(text.contains("total ¥98"));
    }
}
