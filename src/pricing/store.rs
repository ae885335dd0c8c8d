//! SQLite-backed price source over the split tariff vault.

use super::{PriceSource, PriceSourceError};
use crate::db::Repository;
use crate::domain::{PriceRecord, ProductId, ProductInfo};
use async_trait::async_trait;
use futures::future::try_join;
use std::fmt;
use std::sync::Arc;

/// Price source reading the public and commercial vault tables.
#[derive(Clone)]
pub struct TariffStore {
    repo: Arc<Repository>,
}

impl TariffStore {
    /// Create a TariffStore over a repository.
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

impl fmt::Debug for TariffStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TariffStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl PriceSource for TariffStore {
    async fn resolve_prices(
        &self,
        product_id: ProductId,
    ) -> Result<PriceRecord, PriceSourceError> {
        // Both vault sides are read concurrently. The public side decides
        // between "not found" and "pricing unavailable" when either is empty.
        let (list, cost) = try_join(
            self.repo.get_list_price(product_id),
            self.repo.get_cost_price(product_id),
        )
        .await
        .map_err(|e| PriceSourceError::Store(e.to_string()))?;

        let list_price = list.ok_or(PriceSourceError::ProductNotFound(product_id))?;
        let cost_price = cost.ok_or(PriceSourceError::PricingUnavailable(product_id))?;

        Ok(PriceRecord::new(list_price, cost_price))
    }

    async fn list_products(&self) -> Result<Vec<ProductInfo>, PriceSourceError> {
        self.repo
            .list_products()
            .await
            .map_err(|e| PriceSourceError::Store(e.to_string()))
    }
}
