//! POST /v1/admin/tariffs: token-guarded bulk tariff upsert.
//!
//! Replies 200 when every row applied, 207 when some rows were rejected;
//! the body itemizes rejected rows either way.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::AppState;
use crate::error::AppError;
use crate::import::{apply_tariffs, RowError, TariffUpsert};

/// Header carrying the shared import secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub tariffs: Vec<TariffUpsert>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub inserted: usize,
    pub errors: Vec<RowError>,
}

pub async fn post_tariffs(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    authorize(&state, &headers)?;

    let request: ImportRequest = serde_json::from_slice(&body).map_err(|_| {
        AppError::BadRequest("Request body must be a JSON object with a tariffs array".to_string())
    })?;

    let outcome = apply_tariffs(&state.repo, &request.tariffs).await;

    info!(
        inserted = outcome.inserted,
        rejected = outcome.errors.len(),
        "Tariff import applied"
    );

    let status = if outcome.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    let response = ImportResponse {
        success: outcome.is_complete(),
        inserted: outcome.inserted,
        errors: outcome.errors,
    };

    Ok((status, Json(response)).into_response())
}

// Token equality. No token configured means nobody gets in, not everybody.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let expected = state
        .config
        .admin_import_token
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided != Some(expected) {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(())
}
