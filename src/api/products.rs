//! GET /v1/products: customer-safe tariff listing.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::ProductInfo;
use crate::error::AppError;

/// Listing response. Entries carry id, name and category only; price data
/// never appears on this surface.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductInfo>,
}

pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = state.price_source.list_products().await?;
    Ok(Json(ProductsResponse { products }))
}
