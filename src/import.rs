//! Bulk tariff import: endpoint rows and CSV seeding.
//!
//! Imports are best-effort per row: a bad row is recorded with its 1-based
//! row number and the rest of the batch still applies. Field names follow
//! the vault columns, not the calculation API.

use crate::db::{CommercialTermsRow, PublicTariffRow, Repository};
use crate::domain::{Decimal, ProductId};
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;
use tracing::{info, warn};

/// One tariff row as submitted by the import endpoint or the seed CSV.
///
/// `cost_price_netto` is optional: a row without it creates a listable
/// tariff that cannot be calculated until commercial terms arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffUpsert {
    pub tariff_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub list_price_netto: f64,
    #[serde(default)]
    pub cost_price_netto: Option<f64>,
    #[serde(default)]
    pub duration_months: Option<i64>,
    #[serde(default)]
    pub promo_id: Option<String>,
    #[serde(default)]
    pub sub_level: Option<String>,
}

/// One rejected row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Result of applying a batch of tariff rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub inserted: usize,
    pub errors: Vec<RowError>,
}

impl ImportOutcome {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Error that fails a whole seed file, as opposed to a single row.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Apply a batch of tariff rows, collecting per-row failures.
pub async fn apply_tariffs(repo: &Repository, rows: &[TariffUpsert]) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for (index, row) in rows.iter().enumerate() {
        match apply_one(repo, row).await {
            Ok(()) => outcome.inserted += 1,
            Err(message) => outcome.errors.push(RowError {
                row: index + 1,
                message,
            }),
        }
    }

    outcome
}

/// Read tariff rows from CSV and apply them to the vault.
///
/// Rows that fail to parse are collected alongside rows the vault rejects;
/// only an unreadable file or a structurally broken CSV fails the call.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub async fn seed_from_csv_path(repo: &Repository, path: &str) -> Result<ImportOutcome, ImportError> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_string(),
        source,
    })?;

    let outcome = seed_from_csv(repo, file).await?;

    info!(
        path = path,
        inserted = outcome.inserted,
        rejected = outcome.errors.len(),
        "Tariff seed applied"
    );
    for err in &outcome.errors {
        warn!(row = err.row, message = %err.message, "Seed row rejected");
    }

    Ok(outcome)
}

/// Read tariff rows from any CSV reader and apply them to the vault.
pub async fn seed_from_csv<R: Read>(
    repo: &Repository,
    reader: R,
) -> Result<ImportOutcome, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut outcome = ImportOutcome::default();

    for (index, record) in csv_reader.deserialize::<TariffUpsert>().enumerate() {
        match record {
            Ok(row) => match apply_one(repo, &row).await {
                Ok(()) => outcome.inserted += 1,
                Err(message) => outcome.errors.push(RowError {
                    row: index + 1,
                    message,
                }),
            },
            Err(e) => outcome.errors.push(RowError {
                row: index + 1,
                message: e.to_string(),
            }),
        }
    }

    Ok(outcome)
}

async fn apply_one(repo: &Repository, row: &TariffUpsert) -> Result<(), String> {
    let id = ProductId::parse(&row.tariff_id)
        .map_err(|_| format!("tariff_id must be a valid UUID, got {:?}", row.tariff_id))?;

    let list_price = Decimal::from_f64(row.list_price_netto)
        .ok_or_else(|| "list_price_netto must be a finite number".to_string())?;
    if list_price.is_negative() {
        return Err("list_price_netto cannot be negative".to_string());
    }

    let commercial = match row.cost_price_netto {
        Some(raw) => {
            let cost_price = Decimal::from_f64(raw)
                .ok_or_else(|| "cost_price_netto must be a finite number".to_string())?;
            if cost_price.is_negative() {
                return Err("cost_price_netto cannot be negative".to_string());
            }
            Some(CommercialTermsRow {
                tariff_id: id,
                cost_price_netto: cost_price,
                promo_id: row.promo_id.clone(),
                sub_level: row.sub_level.clone(),
            })
        }
        None => None,
    };

    let public = PublicTariffRow {
        id,
        name: row.name.clone(),
        category: row.category.clone(),
        list_price_netto: list_price,
        duration_months: row.duration_months,
    };

    repo.upsert_tariff(&public, commercial.as_ref())
        .await
        .map_err(|e| e.to_string())
}
