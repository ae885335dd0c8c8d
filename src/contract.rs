//! Wire contract validation for calculation requests and responses.
//!
//! Both validators work on raw `serde_json::Value` so they can run on either
//! side of the network boundary, and both report every offending field in one
//! pass instead of stopping at the first. The output validator is a strict
//! allow-list: a response that claims to be a calculation result is rebuilt
//! field by field, and anything not on the list is dropped.

use crate::domain::{CustomerType, Decimal, ProductId};
use crate::engine::{EconomicsResult, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field, e.g. "productId".
    pub field: String,
    /// Human-readable reason, e.g. "Volume must be at least 1".
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Itemized validation failure: one entry per offending field, in the order
/// the fields were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    /// A failure on a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldErrors(vec![FieldError::new(field, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if some entry names the given field.
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A validated calculation request.
///
/// Built per request by `validate_input`, immutable afterwards, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub product_id: ProductId,
    pub volume: u32,
    pub customer_type: CustomerType,
}

impl CalculationInput {
    pub fn new(product_id: ProductId, volume: u32, customer_type: CustomerType) -> Self {
        CalculationInput {
            product_id,
            volume,
            customer_type,
        }
    }

    /// Volume as a decimal, for the engine.
    pub fn volume_decimal(&self) -> Decimal {
        Decimal::from(i64::from(self.volume))
    }
}

/// Validate a raw request body into a `CalculationInput`.
///
/// Checks `productId` (UUID syntax), `volume` (whole number, at least 1;
/// numeric strings are coerced) and `customerType` (closed enum). Every
/// failing field is reported.
///
/// # Errors
/// Returns the full list of field failures.
pub fn validate_input(raw: &Value) -> Result<CalculationInput, FieldErrors> {
    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            return Err(FieldErrors::single(
                "payload",
                "Request body must be a JSON object",
            ))
        }
    };

    let mut errors = Vec::new();

    let product_id = match obj.get("productId") {
        Some(Value::String(s)) => match ProductId::parse(s) {
            Ok(id) => Some(id),
            Err(e) => {
                errors.push(FieldError::new("productId", e.to_string()));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new("productId", "Product ID must be a string"));
            None
        }
        None => {
            errors.push(FieldError::new("productId", "Product ID is required"));
            None
        }
    };

    let volume = match obj.get("volume") {
        Some(value) => match coerce_volume(value) {
            Ok(v) => Some(v),
            Err(message) => {
                errors.push(FieldError::new("volume", message));
                None
            }
        },
        None => {
            errors.push(FieldError::new("volume", "Volume is required"));
            None
        }
    };

    let customer_type = match obj.get("customerType") {
        Some(Value::String(s)) => match CustomerType::parse(s) {
            Some(ct) => Some(ct),
            None => {
                errors.push(FieldError::new("customerType", customer_type_message()));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new("customerType", customer_type_message()));
            None
        }
        None => {
            errors.push(FieldError::new("customerType", "Customer Type is required"));
            None
        }
    };

    match (product_id, volume, customer_type) {
        (Some(product_id), Some(volume), Some(customer_type)) => {
            Ok(CalculationInput::new(product_id, volume, customer_type))
        }
        _ => Err(FieldErrors(errors)),
    }
}

fn customer_type_message() -> String {
    format!(
        "Customer Type must be one of {}",
        CustomerType::ALL.join(", ")
    )
}

fn coerce_volume(value: &Value) -> Result<u32, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let number = number.ok_or_else(|| "Volume must be a number".to_string())?;
    if !number.is_finite() || number.fract() != 0.0 {
        return Err("Volume must be a whole number".to_string());
    }
    if number < 1.0 {
        return Err("Volume must be at least 1".to_string());
    }
    if number > f64::from(u32::MAX) {
        return Err("Volume is too large".to_string());
    }
    Ok(number as u32)
}

/// Validate a raw response payload into an `EconomicsResult`.
///
/// The three numeric fields must be present and finite;
/// `recommendedPrice` must not be negative; `currency` defaults to "EUR"
/// when absent and must be a 3-letter uppercase code when present. Fields
/// not on the allow-list are dropped without comment.
///
/// # Errors
/// Returns the full list of field failures.
pub fn validate_output(raw: &Value) -> Result<EconomicsResult, FieldErrors> {
    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            return Err(FieldErrors::single(
                "payload",
                "Calculation result must be a JSON object",
            ))
        }
    };

    let mut errors = Vec::new();

    let margin = require_finite_number(obj, "margin", "Margin", &mut errors);
    let margin_percent = require_finite_number(obj, "marginPercent", "Margin Percent", &mut errors);
    let recommended_price =
        require_finite_number(obj, "recommendedPrice", "Recommended Price", &mut errors);

    if let Some(price) = recommended_price {
        if price.is_negative() {
            errors.push(FieldError::new(
                "recommendedPrice",
                "Recommended Price cannot be negative",
            ));
        }
    }

    let currency = match obj.get("currency") {
        None => Some(DEFAULT_CURRENCY.to_string()),
        Some(Value::String(s)) if is_currency_code(s) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(
                "currency",
                "Currency must be a 3-letter uppercase code",
            ));
            None
        }
    };

    match (margin, margin_percent, recommended_price, currency) {
        (Some(margin), Some(margin_percent), Some(recommended_price), Some(currency))
            if errors.is_empty() =>
        {
            Ok(EconomicsResult {
                margin,
                margin_percent,
                recommended_price,
                currency,
            })
        }
        _ => Err(FieldErrors(errors)),
    }
}

fn require_finite_number(
    obj: &Map<String, Value>,
    field: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::new(field, format!("{} is required", label)));
            None
        }
        Some(value) => match value.as_f64().and_then(Decimal::from_f64) {
            Some(d) => Some(d),
            None => {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be a finite number", label),
                ));
                None
            }
        },
    }
}

fn is_currency_code(s: &str) -> bool {
    s.len() == 3 && s.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRODUCT: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_validate_input_accepts_well_formed_request() {
        let input = validate_input(&json!({
            "productId": PRODUCT,
            "volume": 2,
            "customerType": "BUSINESS",
        }))
        .unwrap();
        assert_eq!(input.product_id.to_string(), PRODUCT);
        assert_eq!(input.volume, 2);
        assert_eq!(input.customer_type, CustomerType::Business);
    }

    #[test]
    fn test_validate_input_coerces_numeric_string_volume() {
        let input = validate_input(&json!({
            "productId": PRODUCT,
            "volume": "7",
            "customerType": "PREMIUM",
        }))
        .unwrap();
        assert_eq!(input.volume, 7);
    }

    #[test]
    fn test_validate_input_rejects_zero_volume() {
        let errors = validate_input(&json!({
            "productId": PRODUCT,
            "volume": 0,
            "customerType": "BUSINESS",
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.mentions("volume"));
        assert!(errors.0[0].message.contains("at least 1"));
    }

    #[test]
    fn test_validate_input_rejects_fractional_volume() {
        let errors = validate_input(&json!({
            "productId": PRODUCT,
            "volume": 1.5,
            "customerType": "BUSINESS",
        }))
        .unwrap_err();
        assert!(errors.mentions("volume"));
        assert!(errors.0[0].message.contains("whole number"));
    }

    #[test]
    fn test_validate_input_rejects_malformed_product_id() {
        let errors = validate_input(&json!({
            "productId": "not-a-uuid",
            "volume": 1,
            "customerType": "BUSINESS",
        }))
        .unwrap_err();
        assert!(errors.mentions("productId"));
        assert!(errors.0[0].message.contains("UUID"));
    }

    #[test]
    fn test_validate_input_rejects_unknown_customer_type() {
        let errors = validate_input(&json!({
            "productId": PRODUCT,
            "volume": 1,
            "customerType": "UNKNOWN",
        }))
        .unwrap_err();
        assert!(errors.mentions("customerType"));
        assert!(errors.0[0].message.contains("BUSINESS"));
    }

    #[test]
    fn test_validate_input_reports_every_failing_field() {
        let errors = validate_input(&json!({
            "productId": "nope",
            "volume": -3,
            "customerType": "RETAIL",
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.mentions("productId"));
        assert!(errors.mentions("volume"));
        assert!(errors.mentions("customerType"));
    }

    #[test]
    fn test_validate_input_reports_missing_fields() {
        let errors = validate_input(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 3);
        for e in &errors.0 {
            assert!(e.message.contains("required"), "{}: {}", e.field, e.message);
        }
    }

    #[test]
    fn test_validate_input_rejects_non_object_payload() {
        let errors = validate_input(&json!([1, 2, 3])).unwrap_err();
        assert!(errors.mentions("payload"));
    }

    #[test]
    fn test_validate_output_accepts_complete_result() {
        let result = validate_output(&json!({
            "margin": 1000.0,
            "marginPercent": 50.0,
            "recommendedPrice": 2000.0,
            "currency": "EUR",
        }))
        .unwrap();
        assert_eq!(result.margin, Decimal::from(1000));
        assert_eq!(result.currency, "EUR");
    }

    #[test]
    fn test_validate_output_defaults_currency() {
        let result = validate_output(&json!({
            "margin": 0.0,
            "marginPercent": 0.0,
            "recommendedPrice": 500.0,
        }))
        .unwrap();
        assert_eq!(result.currency, "EUR");
    }

    #[test]
    fn test_validate_output_drops_unknown_fields() {
        let result = validate_output(&json!({
            "margin": 10.0,
            "marginPercent": 10.0,
            "recommendedPrice": 100.0,
            "currency": "EUR",
            "internalCostBasis": 90.0,
            "debug": {"sql": "select *"},
        }))
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("internalCostBasis").is_none());
        assert!(json.get("debug").is_none());
    }

    #[test]
    fn test_validate_output_rejects_missing_numbers() {
        let errors = validate_output(&json!({"currency": "EUR"})).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.mentions("margin"));
        assert!(errors.mentions("marginPercent"));
        assert!(errors.mentions("recommendedPrice"));
    }

    #[test]
    fn test_validate_output_rejects_non_numeric_margin() {
        let errors = validate_output(&json!({
            "margin": "plenty",
            "marginPercent": 50.0,
            "recommendedPrice": 2000.0,
        }))
        .unwrap_err();
        assert!(errors.mentions("margin"));
        assert!(errors.0[0].message.contains("finite number"));
    }

    #[test]
    fn test_validate_output_rejects_negative_recommended_price() {
        let errors = validate_output(&json!({
            "margin": 0.0,
            "marginPercent": 0.0,
            "recommendedPrice": -1.0,
        }))
        .unwrap_err();
        assert!(errors.mentions("recommendedPrice"));
        assert!(errors.0[0].message.contains("negative"));
    }

    #[test]
    fn test_validate_output_rejects_malformed_currency() {
        for bad in [json!("eur"), json!("EURO"), json!(3), json!(null)] {
            let errors = validate_output(&json!({
                "margin": 0.0,
                "marginPercent": 0.0,
                "recommendedPrice": 1.0,
                "currency": bad,
            }))
            .unwrap_err();
            assert!(errors.mentions("currency"));
        }
    }

    #[test]
    fn test_field_errors_display_lists_fields() {
        let errors = FieldErrors(vec![
            FieldError::new("volume", "Volume must be at least 1"),
            FieldError::new("productId", "Product ID must be a valid UUID"),
        ]);
        let rendered = errors.to_string();
        assert!(rendered.contains("volume: Volume must be at least 1"));
        assert!(rendered.contains("; productId:"));
    }

    #[test]
    fn test_calculation_input_serializes_camel_case() {
        let input = CalculationInput::new(
            ProductId::parse(PRODUCT).unwrap(),
            3,
            CustomerType::Enterprise,
        );
        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["productId"], PRODUCT);
        assert_eq!(json["volume"], 3);
        assert_eq!(json["customerType"], "ENTERPRISE");
    }
}
