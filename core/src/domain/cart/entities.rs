use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A cart line as replayed by the client. Only the fields the summarizer
/// needs are carried. The client drops a line when its quantity reaches 0,
/// so a replayed line always holds between 1 and 99 portions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 1, max = 99, message = "quantity must be between 1 and 99"))]
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_quantity(quantity: u32) -> CartItem {
        CartItem {
            id: "rice".to_string(),
            name: "Rice".to_string(),
            price: 2.0,
            quantity,
            category: "Staples".to_string(),
        }
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(with_quantity(1).validate().is_ok());
        assert!(with_quantity(99).validate().is_ok());
        assert!(with_quantity(0).validate().is_err());
        assert!(with_quantity(100).validate().is_err());
        assert!(with_quantity(3_000_000_000).validate().is_err());
    }
}
