//! Domain types for the margin calculator.
//!
//! This module provides:
//! - Lossless monetary values via the Decimal wrapper
//! - Domain primitives: ProductId, CustomerType
//! - Price data: the resolved PriceRecord and the customer-safe ProductInfo

pub mod decimal;
pub mod price;
pub mod primitives;

pub use decimal::Decimal;
pub use price::{PriceRecord, ProductInfo};
pub use primitives::{CustomerType, ProductId, ProductIdError};
