//! POST /v1/calculate: validate, resolve prices, run the engine.
//!
//! Every request writes one api_logs row, success or failure, carrying a
//! fresh request id and the wall time spent. A telemetry failure is logged
//! and swallowed; it never affects the response.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{error, warn};
use uuid::Uuid;

use crate::api::AppState;
use crate::contract::validate_input;
use crate::db::ApiLogEntry;
use crate::engine::{calculate_economics, EconomicsResult};
use crate::error::AppError;

/// Telemetry name for this operation.
pub const FUNCTION_NAME: &str = "calculate-margin";

/// Response envelope: the result always travels under `data`.
#[derive(Debug, Serialize)]
pub struct CalculateEnvelope {
    pub data: EconomicsResult,
}

pub async fn post_calculate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CalculateEnvelope>, AppError> {
    let started = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let outcome = run_calculation(&state, &body).await;

    let (status_code, error_message) = match &outcome {
        Ok(_) => (200, None),
        Err(e) => (e.status().as_u16(), Some(e.to_string())),
    };

    let entry = ApiLogEntry {
        function_name: FUNCTION_NAME.to_string(),
        status_code,
        duration_ms: started.elapsed().as_millis() as i64,
        request_id,
        error_message,
    };
    if let Err(e) = state.repo.insert_api_log(&entry).await {
        warn!(error = %e, "Failed to write api_logs entry");
    }

    outcome.map(|result| Json(CalculateEnvelope { data: result }))
}

async fn run_calculation(state: &AppState, raw: &[u8]) -> Result<EconomicsResult, AppError> {
    let body: Value = serde_json::from_slice(raw)
        .map_err(|_| AppError::BadRequest("Request body must be valid JSON".to_string()))?;

    let input = validate_input(&body)?;

    let prices = state.price_source.resolve_prices(input.product_id).await?;

    // Input passed validation, so a precondition failure here means the
    // stored prices are bad. That is our fault, not the caller's.
    calculate_economics(prices.list_price, prices.cost_price, input.volume_decimal()).map_err(
        |e| {
            error!(product_id = %input.product_id, error = %e, "Engine rejected stored prices");
            AppError::Internal("Calculation failed".to_string())
        },
    )
}
