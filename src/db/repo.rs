//! Repository layer for the tariff vault and request telemetry.

use crate::domain::{Decimal, ProductId, ProductInfo};
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::warn;

/// Public side of one tariff: what any caller may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicTariffRow {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub list_price_netto: Decimal,
    pub duration_months: Option<i64>,
}

/// Commercial terms for one tariff: dealer-only cost data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommercialTermsRow {
    pub tariff_id: ProductId,
    pub cost_price_netto: Decimal,
    pub promo_id: Option<String>,
    pub sub_level: Option<String>,
}

/// One request telemetry entry. `created_at` is stamped on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiLogEntry {
    pub function_name: String,
    pub status_code: u16,
    pub duration_ms: i64,
    pub request_id: String,
    pub error_message: Option<String>,
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Cheap connectivity check for the readiness probe.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // Tariff vault operations
    // =========================================================================

    /// Upsert one tariff: the public row, and the commercial terms when
    /// present, in a single transaction. A tariff without commercial terms
    /// is listable but not calculable.
    ///
    /// # Errors
    /// Returns an error if the transaction fails; nothing is written then.
    pub async fn upsert_tariff(
        &self,
        public: &PublicTariffRow,
        commercial: Option<&CommercialTermsRow>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO tariffs_public (id, name, category, list_price_netto, duration_months)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                list_price_netto = excluded.list_price_netto,
                duration_months = excluded.duration_months
            "#,
        )
        .bind(public.id.to_string())
        .bind(&public.name)
        .bind(public.category.as_deref())
        .bind(public.list_price_netto.to_canonical_string())
        .bind(public.duration_months)
        .execute(&mut *tx)
        .await?;

        if let Some(terms) = commercial {
            sqlx::query(
                r#"
                INSERT INTO tariffs_commercial (tariff_id, cost_price_netto, promo_id, sub_level)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(tariff_id) DO UPDATE SET
                    cost_price_netto = excluded.cost_price_netto,
                    promo_id = excluded.promo_id,
                    sub_level = excluded.sub_level
                "#,
            )
            .bind(terms.tariff_id.to_string())
            .bind(terms.cost_price_netto.to_canonical_string())
            .bind(terms.promo_id.as_deref())
            .bind(terms.sub_level.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get the net list price for a tariff from the public side.
    ///
    /// Returns `None` when the tariff does not exist. A stored price that
    /// fails to parse is treated as missing rather than defaulted, so a
    /// corrupt row can never produce a zero-priced quote.
    pub async fn get_list_price(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        let row = sqlx::query("SELECT list_price_netto FROM tariffs_public WHERE id = ?")
            .bind(product_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|r| {
            let raw: String = r.get("list_price_netto");
            parse_stored_price(&raw, "tariffs_public.list_price_netto", product_id)
        }))
    }

    /// Get the net cost price for a tariff from the commercial side.
    ///
    /// Returns `None` when no commercial terms exist; same parse policy as
    /// `get_list_price`.
    pub async fn get_cost_price(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        let row = sqlx::query("SELECT cost_price_netto FROM tariffs_commercial WHERE tariff_id = ?")
            .bind(product_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|r| {
            let raw: String = r.get("cost_price_netto");
            parse_stored_price(&raw, "tariffs_commercial.cost_price_netto", product_id)
        }))
    }

    /// List customer-safe tariff entries, ordered by name then id.
    ///
    /// Rows with a malformed id are skipped with a warning instead of
    /// failing the whole listing.
    pub async fn list_products(&self) -> Result<Vec<ProductInfo>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category
            FROM tariffs_public
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let products = rows
            .iter()
            .filter_map(|row| {
                let id_str: String = row.get("id");
                let name: String = row.get("name");
                let category: Option<String> = row.get("category");

                match ProductId::parse(&id_str) {
                    Ok(id) => Some(ProductInfo::new(id, name, category)),
                    Err(e) => {
                        warn!(id = %id_str, error = %e, "Skipping tariff with malformed id");
                        None
                    }
                }
            })
            .collect();

        Ok(products)
    }

    // =========================================================================
    // Request telemetry
    // =========================================================================

    /// Insert one telemetry entry with the current timestamp.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_api_log(&self, entry: &ApiLogEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO api_logs
            (function_name, status_code, duration_ms, request_id, error_message, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.function_name)
        .bind(i64::from(entry.status_code))
        .bind(entry.duration_ms)
        .bind(&entry.request_id)
        .bind(entry.error_message.as_deref())
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn parse_stored_price(raw: &str, column: &str, product_id: ProductId) -> Option<Decimal> {
    match Decimal::from_str_canonical(raw) {
        Ok(price) => Some(price),
        Err(e) => {
            warn!(
                product_id = %product_id,
                column = column,
                raw = raw,
                error = %e,
                "Stored price failed to parse, treating as missing"
            );
            None
        }
    }
}
