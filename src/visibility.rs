//! View-mode gating for commercially sensitive content.
//!
//! Margin figures, cost prices and provision data are dealer-only. The gate
//! does not hide fields, it removes them: a customer-mode view never carries
//! the sensitive keys at all, so no styling or client bug can reveal them.

use crate::domain::Decimal;
use crate::engine::EconomicsResult;
use serde::{Deserialize, Serialize};

/// Who the rendered output is for.
///
/// Always an explicit parameter; nothing in the crate assumes a default
/// mode. On the wire, any unrecognized value degrades to `Customer`, the
/// least-privileged mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Dealer-facing: full economics visible.
    Dealer,
    /// Customer-facing: quote data only.
    #[serde(other)]
    Customer,
}

impl ViewMode {
    /// Parse a wire string. Unknown values fail closed to `Customer`.
    pub fn parse(s: &str) -> ViewMode {
        match s {
            "dealer" => ViewMode::Dealer,
            _ => ViewMode::Customer,
        }
    }

    /// Get the wire form as a string reference.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Dealer => "dealer",
            ViewMode::Customer => "customer",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True iff dealer-only content may be shown in this mode.
pub fn is_dealer_content_allowed(mode: ViewMode) -> bool {
    mode == ViewMode::Dealer
}

/// True iff customer-targeted content may be shown in this mode.
pub fn is_customer_content_allowed(mode: ViewMode) -> bool {
    mode == ViewMode::Customer
}

/// Gate a piece of content on a mode.
///
/// Returns the content when `mode` matches `allowed`, otherwise the
/// fallback. A `None` fallback means the content is absent entirely, which
/// is the form every serialized surface uses.
pub fn render_if_allowed<T>(
    mode: ViewMode,
    allowed: ViewMode,
    content: T,
    fallback: Option<T>,
) -> Option<T> {
    if mode == allowed {
        Some(content)
    } else {
        fallback
    }
}

/// A calculation result shaped for one audience.
///
/// The quote fields are always present. The economics fields exist only in
/// dealer mode; in customer mode they are `None` and skipped during
/// serialization, so the keys do not appear in the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationView {
    pub recommended_price: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_percent: Option<Decimal>,
}

impl CalculationView {
    /// Shape a full result for the given audience.
    pub fn present(result: &EconomicsResult, mode: ViewMode) -> Self {
        CalculationView {
            recommended_price: result.recommended_price,
            currency: result.currency.clone(),
            margin: render_if_allowed(mode, ViewMode::Dealer, result.margin, None),
            margin_percent: render_if_allowed(mode, ViewMode::Dealer, result.margin_percent, None),
        }
    }
}
