//! Mock price source for testing without a database.

use super::{PriceSource, PriceSourceError};
use crate::domain::{Decimal, PriceRecord, ProductId, ProductInfo};
use async_trait::async_trait;

#[derive(Debug, Clone)]
struct MockEntry {
    info: ProductInfo,
    list_price: Decimal,
    cost_price: Option<Decimal>,
}

/// Mock price source returning predefined tariffs.
#[derive(Debug, Clone, Default)]
pub struct MockPriceSource {
    entries: Vec<MockEntry>,
    fail_with: Option<String>,
}

impl MockPriceSource {
    /// Create a new mock with no tariffs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully priced tariff.
    pub fn with_product(
        mut self,
        info: ProductInfo,
        list_price: Decimal,
        cost_price: Decimal,
    ) -> Self {
        self.entries.push(MockEntry {
            info,
            list_price,
            cost_price: Some(cost_price),
        });
        self
    }

    /// Add a tariff that has a public entry but no commercial terms.
    pub fn with_public_only(mut self, info: ProductInfo, list_price: Decimal) -> Self {
        self.entries.push(MockEntry {
            info,
            list_price,
            cost_price: None,
        });
        self
    }

    /// Make every operation fail with a store error.
    pub fn with_store_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn resolve_prices(
        &self,
        product_id: ProductId,
    ) -> Result<PriceRecord, PriceSourceError> {
        if let Some(msg) = &self.fail_with {
            return Err(PriceSourceError::Store(msg.clone()));
        }

        let entry = self
            .entries
            .iter()
            .find(|e| e.info.id == product_id)
            .ok_or(PriceSourceError::ProductNotFound(product_id))?;

        let cost_price = entry
            .cost_price
            .ok_or(PriceSourceError::PricingUnavailable(product_id))?;

        Ok(PriceRecord::new(entry.list_price, cost_price))
    }

    async fn list_products(&self) -> Result<Vec<ProductInfo>, PriceSourceError> {
        if let Some(msg) = &self.fail_with {
            return Err(PriceSourceError::Store(msg.clone()));
        }

        let mut products: Vec<ProductInfo> =
            self.entries.iter().map(|e| e.info.clone()).collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, name: &str) -> ProductInfo {
        ProductInfo::new(ProductId::parse(id).unwrap(), name, None)
    }

    const ID_A: &str = "123e4567-e89b-12d3-a456-426614174000";
    const ID_B: &str = "223e4567-e89b-12d3-a456-426614174000";

    #[tokio::test]
    async fn test_mock_resolves_known_product() {
        let mock = MockPriceSource::new().with_product(
            info(ID_A, "Alpha"),
            Decimal::from(1000),
            Decimal::from(500),
        );

        let record = mock
            .resolve_prices(ProductId::parse(ID_A).unwrap())
            .await
            .unwrap();
        assert_eq!(record.list_price, Decimal::from(1000));
        assert_eq!(record.cost_price, Decimal::from(500));
    }

    #[tokio::test]
    async fn test_mock_unknown_product() {
        let mock = MockPriceSource::new();
        let err = mock
            .resolve_prices(ProductId::parse(ID_A).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, PriceSourceError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_mock_public_only_product() {
        let mock = MockPriceSource::new().with_public_only(info(ID_A, "Alpha"), Decimal::from(10));
        let err = mock
            .resolve_prices(ProductId::parse(ID_A).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, PriceSourceError::PricingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_mock_lists_products_sorted_by_name() {
        let mock = MockPriceSource::new()
            .with_product(info(ID_B, "Zen"), Decimal::from(1), Decimal::from(1))
            .with_product(info(ID_A, "Alpha"), Decimal::from(1), Decimal::from(1));

        let products = mock.list_products().await.unwrap();
        assert_eq!(products[0].name, "Alpha");
        assert_eq!(products[1].name, "Zen");
    }

    #[tokio::test]
    async fn test_mock_store_failure() {
        let mock = MockPriceSource::new().with_store_failure("boom");
        let err = mock.list_products().await.unwrap_err();
        assert!(matches!(err, PriceSourceError::Store(_)));
    }
}
