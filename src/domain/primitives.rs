//! Domain primitives: ProductId, CustomerType.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when a product identifier is not a well-formed UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Product ID must be a valid UUID")]
pub struct ProductIdError;

/// Stable tariff identifier (UUID).
///
/// Opaque to the calculator; the only structure it relies on is UUID syntax,
/// which is validated at the boundary so lookups never run with garbage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Create a ProductId from a UUID.
    pub fn new(id: Uuid) -> Self {
        ProductId(id)
    }

    /// Parse a ProductId from its string form.
    ///
    /// # Errors
    /// Returns an error if the string is not a well-formed UUID.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s).map(ProductId).map_err(|_| ProductIdError)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Customer segment a calculation is run for.
///
/// Closed set; anything off the list is rejected at validation, never
/// coerced. The segment does not change the math today but is part of the
/// input contract and is carried through for downstream pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerType {
    /// Standard business customer.
    Business,
    /// Premium segment.
    Premium,
    /// Enterprise accounts.
    Enterprise,
}

impl CustomerType {
    /// All accepted wire values, in declaration order.
    pub const ALL: [&'static str; 3] = ["BUSINESS", "PREMIUM", "ENTERPRISE"];

    /// Parse the exact wire form. Case-sensitive by contract.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BUSINESS" => Some(CustomerType::Business),
            "PREMIUM" => Some(CustomerType::Premium),
            "ENTERPRISE" => Some(CustomerType::Enterprise),
            _ => None,
        }
    }

    /// Get the wire form as a string reference.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Business => "BUSINESS",
            CustomerType::Premium => "PREMIUM",
            CustomerType::Enterprise => "ENTERPRISE",
        }
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
