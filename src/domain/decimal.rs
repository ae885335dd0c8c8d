//! Lossless decimal numeric type backed by rust_decimal.
//!
//! All money in the calculator (list prices, cost prices, margins) flows
//! through this type. Canonical string form is what the database stores;
//! JSON serialization is a plain number.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lossless decimal numeric type for price and margin calculations.
///
/// Backed by rust_decimal to avoid floating-point drift.
/// Serializes to JSON number (not string) by default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Convert from an f64 taken off the wire.
    ///
    /// Returns `None` for NaN and infinities, which is how non-finite
    /// numbers are kept out of the calculation pipeline.
    pub fn from_f64(value: f64) -> Option<Self> {
        RustDecimal::from_f64(value).map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        // Use normalize() to remove trailing zeros, then format without exponent
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Returns the value 100.
    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// Round to two decimal places, midpoint away from zero.
    ///
    /// Output values are rounded exactly once, here, at the boundary.
    /// Intermediate arithmetic stays at full precision.
    pub fn round_2dp(&self) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

// Arithmetic operations
impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_parse_roundtrip() {
        let test_cases = vec![
            "123.456",
            "0.0001",
            "1000000",
            "-123.456",
            "0",
            "999999999.999999999",
        ];

        for s in test_cases {
            let decimal = Decimal::from_str_canonical(s).expect("parse failed");
            let formatted = decimal.to_canonical_string();
            let reparsed = Decimal::from_str_canonical(&formatted).expect("reparse failed");
            assert_eq!(decimal, reparsed, "roundtrip failed for {}", s);
        }
    }

    #[test]
    fn test_decimal_canonical_no_exponent() {
        // rust_decimal supports scientific notation parsing
        let decimal = Decimal::from_str_canonical("123").expect("parse failed");
        let formatted = decimal.to_canonical_string();
        assert!(
            !formatted.contains('e'),
            "formatted string should not contain exponent"
        );
        assert_eq!(formatted, "123");
    }

    #[test]
    fn test_decimal_arithmetic() {
        let a = Decimal::from_str_canonical("10.5").unwrap();
        let b = Decimal::from_str_canonical("2.5").unwrap();

        let sum = a + b;
        assert_eq!(sum.to_canonical_string(), "13");

        let diff = a - b;
        assert_eq!(diff.to_canonical_string(), "8");

        let prod = a * b;
        assert_eq!(prod.to_canonical_string(), "26.25");

        let quot = a / b;
        assert_eq!(quot.to_canonical_string(), "4.2");

        let negated = -a;
        assert_eq!(negated.to_canonical_string(), "-10.5");
    }

    #[test]
    fn test_decimal_json_serialization() {
        let decimal = Decimal::from_str_canonical("123.456").unwrap();
        let json = serde_json::to_value(decimal).unwrap();
        // Should serialize as a JSON number, not a string
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_decimal_from_f64_rejects_non_finite() {
        assert!(Decimal::from_f64(12.34).is_some());
        assert!(Decimal::from_f64(0.0).is_some());
        assert!(Decimal::from_f64(f64::NAN).is_none());
        assert!(Decimal::from_f64(f64::INFINITY).is_none());
        assert!(Decimal::from_f64(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn test_decimal_round_2dp_midpoint_away_from_zero() {
        // "2.004" rounds to 2.00, which normalizes to "2"
        let cases = vec![
            ("2.005", "2.01"),
            ("2.004", "2"),
            ("-2.675", "-2.68"),
            ("33.333333333", "33.33"),
            ("50", "50"),
        ];
        for (input, expected) in cases {
            let rounded = Decimal::from_str_canonical(input).unwrap().round_2dp();
            assert_eq!(rounded.to_canonical_string(), expected, "rounding {}", input);
        }
    }

    #[test]
    fn test_decimal_display() {
        let decimal = Decimal::from_str_canonical("99.99").unwrap();
        assert_eq!(decimal.to_string(), "99.99");
    }

    #[test]
    fn test_decimal_from_i64() {
        let decimal = Decimal::from(1000);
        assert_eq!(decimal.to_canonical_string(), "1000");
    }

    #[test]
    fn test_decimal_ordering() {
        let a = Decimal::from_str_canonical("10").unwrap();
        let b = Decimal::from_str_canonical("20").unwrap();
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a, a);
    }
}
