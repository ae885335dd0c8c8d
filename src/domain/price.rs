//! Price data for a tariff: the record the engine consumes and the
//! customer-safe listing row.

use crate::domain::{Decimal, ProductId};
use serde::{Deserialize, Serialize};

/// Both price sides resolved for one tariff.
///
/// `cost_price` is commercially sensitive. The record deliberately has no
/// serde impls: cost prices leave the process only through the dealer view,
/// never by serializing this struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRecord {
    /// Net list price per unit, from the public side of the vault.
    pub list_price: Decimal,
    /// Net cost price per unit, from the commercial side of the vault.
    pub cost_price: Decimal,
}

impl PriceRecord {
    /// Create a PriceRecord from both resolved prices.
    pub fn new(list_price: Decimal, cost_price: Decimal) -> Self {
        PriceRecord {
            list_price,
            cost_price,
        }
    }
}

/// Customer-safe tariff listing entry. Carries no price fields of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Stable tariff identifier.
    pub id: ProductId,
    /// Display name, e.g. "Vodafone Red Business Prime".
    pub name: String,
    /// Optional grouping label; omitted from JSON when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductInfo {
    /// Create a ProductInfo.
    pub fn new(id: ProductId, name: impl Into<String>, category: Option<String>) -> Self {
        ProductInfo {
            id,
            name: name.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> ProductId {
        ProductId::parse("123e4567-e89b-12d3-a456-426614174000").unwrap()
    }

    #[test]
    fn test_product_info_serializes_camel_case() {
        let info = ProductInfo::new(test_id(), "Red Business Prime", Some("mobile".to_string()));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["id"], "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(json["name"], "Red Business Prime");
        assert_eq!(json["category"], "mobile");
    }

    #[test]
    fn test_product_info_omits_missing_category() {
        let info = ProductInfo::new(test_id(), "Red Business Prime", None);
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_price_record_holds_both_sides() {
        let record = PriceRecord::new(Decimal::from(1000), Decimal::from(500));
        assert_eq!(record.list_price, Decimal::from(1000));
        assert_eq!(record.cost_price, Decimal::from(500));
    }
}
