use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::contract::FieldErrors;
use crate::pricing::PriceSourceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Pricing unavailable: {0}")]
    PricingUnavailable(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

impl AppError {
    /// HTTP status this error maps to. Shared by the response path and
    /// request telemetry.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PricingUnavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<PriceSourceError> for AppError {
    fn from(err: PriceSourceError) -> Self {
        match err {
            PriceSourceError::ProductNotFound(_) => {
                AppError::NotFound("Product Not Found".to_string())
            }
            PriceSourceError::PricingUnavailable(_) => {
                AppError::PricingUnavailable("Product Pricing Unavailable".to_string())
            }
            PriceSourceError::Store(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(errors) => Json(json!({
                "error": "Validation failed",
                "fields": errors.0,
            })),
            other => Json(json!({
                "error": user_message(other),
            })),
        };

        (status, body).into_response()
    }
}

// Bare message without the variant prefix; the prefixed Display form is for
// logs and telemetry.
fn user_message(err: &AppError) -> String {
    match err {
        AppError::Config(msg)
        | AppError::Internal(msg)
        | AppError::NotFound(msg)
        | AppError::PricingUnavailable(msg)
        | AppError::BadRequest(msg)
        | AppError::Unauthorized(msg) => msg.clone(),
        AppError::Validation(errors) => errors.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::FieldError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::PricingUnavailable("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation(FieldErrors(vec![])).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_price_source_error_mapping() {
        let id = crate::domain::ProductId::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();

        let err: AppError = PriceSourceError::ProductNotFound(id).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = PriceSourceError::PricingUnavailable(id).into();
        assert!(matches!(err, AppError::PricingUnavailable(_)));

        let err: AppError = PriceSourceError::Store("down".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_validation_display_includes_fields() {
        let err = AppError::Validation(FieldErrors(vec![FieldError::new(
            "volume",
            "Volume must be at least 1",
        )]));
        assert!(err.to_string().contains("volume"));
    }
}
