//! Pure margin economics.
//!
//! `calculate_economics` is the deterministic core of the service: decimal
//! in, decimal out, no I/O, no clock, no shared state. Callers may invoke it
//! from any number of tasks concurrently.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};

/// Currency code attached to every calculation result.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Precondition failure on engine inputs.
///
/// The HTTP validator normally rejects bad input before the engine runs, but
/// the engine re-checks because internal callers (imports, scripts) can reach
/// it directly with values from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// An input violated a precondition. The message names the field in its
    /// display form, e.g. "List Price cannot be negative".
    #[error("{0}")]
    InvalidArgument(&'static str),
}

/// Result of one margin calculation.
///
/// All four fields are rounded to two decimal places exactly once, when this
/// struct is built. `margin` and `margin_percent` may be negative;
/// `recommended_price` never is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicsResult {
    /// Absolute margin: revenue minus cost.
    pub margin: Decimal,
    /// Margin as a percentage of revenue; 0 when revenue is 0 by policy.
    pub margin_percent: Decimal,
    /// Total price to quote: list price times volume.
    pub recommended_price: Decimal,
    /// ISO currency code, currently always "EUR".
    pub currency: String,
}

/// Calculate margin economics for one tariff at a given volume.
///
/// revenue = list_price * volume, cost = cost_price * volume,
/// margin = revenue - cost, margin_percent = margin / revenue * 100.
/// When revenue is zero the percentage is defined as zero rather than
/// dividing.
///
/// # Errors
/// Returns `InvalidArgument` when `list_price` or `cost_price` is negative
/// or `volume` is not strictly positive.
pub fn calculate_economics(
    list_price: Decimal,
    cost_price: Decimal,
    volume: Decimal,
) -> Result<EconomicsResult, EngineError> {
    if list_price.is_negative() {
        return Err(EngineError::InvalidArgument("List Price cannot be negative"));
    }
    if cost_price.is_negative() {
        return Err(EngineError::InvalidArgument("Cost Price cannot be negative"));
    }
    if !volume.is_positive() {
        return Err(EngineError::InvalidArgument("Volume must be positive"));
    }

    let revenue = list_price * volume;
    let cost = cost_price * volume;
    let margin = revenue - cost;

    let margin_percent = if revenue.is_zero() {
        Decimal::zero()
    } else {
        (margin / revenue) * Decimal::hundred()
    };

    Ok(EconomicsResult {
        margin: margin.round_2dp(),
        margin_percent: margin_percent.round_2dp(),
        recommended_price: revenue.round_2dp(),
        currency: DEFAULT_CURRENCY.to_string(),
    })
}
