pub mod api;
pub mod client;
pub mod config;
pub mod contract;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod import;
pub mod pricing;
pub mod visibility;

pub use client::{EngineClient, EngineClientError};
pub use config::Config;
pub use contract::{validate_input, validate_output, CalculationInput, FieldError, FieldErrors};
pub use db::{init_db, Repository};
pub use domain::{CustomerType, Decimal, PriceRecord, ProductId, ProductInfo};
pub use engine::{calculate_economics, EconomicsResult, EngineError};
pub use error::AppError;
pub use import::{apply_tariffs, seed_from_csv_path, ImportOutcome, TariffUpsert};
pub use pricing::{MockPriceSource, PriceSource, PriceSourceError, TariffStore};
pub use visibility::{CalculationView, ViewMode};
