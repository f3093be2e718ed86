//! # OnSale Repository
//!
//! Database operations for promotional records. "Latest" semantics live
//! here and nowhere else: the product side only calls
//! [`latest_for_product`](OnSaleRepository::latest_for_product) and takes
//! whatever it gets.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::rows::OnSaleRow;
use catalog_core::{CatalogResult, NewOnSale, OnSale};

const ON_SALE_COLUMNS: &str =
    "id, product_id, price_cents, quantity, begin_time, end_time, created_at, updated_at";

/// Repository for on-sale database operations.
#[derive(Debug, Clone)]
pub struct OnSaleRepository {
    pool: SqlitePool,
}

impl OnSaleRepository {
    /// Creates a new OnSaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OnSaleRepository { pool }
    }

    /// Returns a product's latest on-sale records: those whose
    /// `[begin_time, end_time]` window contains the current instant,
    /// newest window first.
    pub async fn latest_for_product(&self, product_id: i64) -> CatalogResult<Vec<OnSale>> {
        debug!(product_id = product_id, "Fetching latest on-sale records");

        let now = Utc::now();
        let rows = sqlx::query_as::<_, OnSaleRow>(&format!(
            "SELECT {ON_SALE_COLUMNS} FROM on_sale \
             WHERE product_id = ?1 AND begin_time <= ?2 AND end_time >= ?2 \
             ORDER BY begin_time DESC, id DESC"
        ))
        .bind(product_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OnSale::from).collect())
    }

    /// Inserts an on-sale record and returns the stored representation,
    /// including the generated identifier.
    pub async fn create(&self, new: NewOnSale) -> CatalogResult<OnSale> {
        debug!(product_id = new.product_id, "Creating on-sale record");

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO on_sale (product_id, price_cents, quantity, begin_time, end_time, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(new.product_id)
        .bind(new.price_cents)
        .bind(new.quantity)
        .bind(new.begin_time)
        .bind(new.end_time)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row = sqlx::query_as::<_, OnSaleRow>(&format!(
            "SELECT {ON_SALE_COLUMNS} FROM on_sale WHERE id = ?1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(OnSale::from(row))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
