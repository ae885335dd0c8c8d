//! Price resolution abstraction the calculation path depends on.
//!
//! The engine never touches storage; it receives a `PriceRecord` resolved
//! through this trait. `TariffStore` is the real SQLite-backed source,
//! `MockPriceSource` serves tests.

use crate::domain::{PriceRecord, ProductId, ProductInfo};
use async_trait::async_trait;
use std::fmt;

pub mod mock;
pub mod store;

pub use mock::MockPriceSource;
pub use store::TariffStore;

/// Source of tariff prices and listings.
#[async_trait]
pub trait PriceSource: Send + Sync + fmt::Debug {
    /// Resolve both price sides for one tariff.
    ///
    /// # Returns
    /// The list and cost price pair, or a distinct error for each way the
    /// lookup can come up short.
    async fn resolve_prices(&self, product_id: ProductId)
        -> Result<PriceRecord, PriceSourceError>;

    /// List customer-safe tariff entries in a deterministic order.
    async fn list_products(&self) -> Result<Vec<ProductInfo>, PriceSourceError>;
}

/// Error type for price source operations.
#[derive(Debug, Clone)]
pub enum PriceSourceError {
    /// No public tariff entry with this id.
    ProductNotFound(ProductId),
    /// Public entry exists but the commercial terms are missing.
    PricingUnavailable(ProductId),
    /// Backend failure (pool, query, connection).
    Store(String),
}

impl fmt::Display for PriceSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSourceError::ProductNotFound(id) => {
                write!(f, "No public tariff entry for {}", id)
            }
            PriceSourceError::PricingUnavailable(id) => {
                write!(f, "No commercial terms for tariff {}", id)
            }
            PriceSourceError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for PriceSourceError {}
