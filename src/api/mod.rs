pub mod admin;
pub mod calculate;
pub mod health;
pub mod products;

use crate::config::Config;
use crate::db::Repository;
use crate::pricing::PriceSource;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub price_source: Arc<dyn PriceSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, price_source: Arc<dyn PriceSource>, config: Config) -> Self {
        Self {
            repo,
            price_source,
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/calculate", post(calculate::post_calculate))
        .route("/v1/products", get(products::get_products))
        .route("/v1/admin/tariffs", post(admin::post_tariffs))
        .layer(cors)
        .with_state(state)
}
