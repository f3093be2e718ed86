//! # Composite Projection Repository
//!
//! The pre-joined, read-only projection used by the single-query lookup
//! variants: one statement LEFT-JOINs a product with its current on-sale
//! records and its goods-group siblings, yielding one flat row per joined
//! combination. [`crate::rows::fold_composite`] groups the rows back into
//! expanded products.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::rows::ProductCompositeRow;
use catalog_core::CatalogResult;

/// Shared body of the composite query; callers prepend SELECT/WHERE bits.
///
/// Row order matters to the fold: products arrive contiguously (p.id), with
/// on-sale records newest first, mirroring the expand-after-fetch path.
const COMPOSITE_QUERY: &str = "SELECT \
         p.id, p.name, p.goods_id, \
         p.created_by_id, p.created_by_name, p.updated_by_id, p.updated_by_name, \
         p.created_at, p.updated_at, \
         o.id AS on_sale_id, o.price_cents AS on_sale_price_cents, \
         o.quantity AS on_sale_quantity, o.begin_time AS on_sale_begin_time, \
         o.end_time AS on_sale_end_time, o.created_at AS on_sale_created_at, \
         o.updated_at AS on_sale_updated_at, \
         s.id AS sibling_id, s.name AS sibling_name, s.goods_id AS sibling_goods_id, \
         s.created_by_id AS sibling_created_by_id, \
         s.created_by_name AS sibling_created_by_name, \
         s.updated_by_id AS sibling_updated_by_id, \
         s.updated_by_name AS sibling_updated_by_name, \
         s.created_at AS sibling_created_at, s.updated_at AS sibling_updated_at \
     FROM products p \
     LEFT JOIN on_sale o \
            ON o.product_id = p.id AND o.begin_time <= ?2 AND o.end_time >= ?2 \
     LEFT JOIN products s \
            ON s.goods_id = p.goods_id AND s.id <> p.id";

const COMPOSITE_ORDER: &str = "ORDER BY p.id, o.begin_time DESC, o.id DESC, s.id";

/// Read-only repository over the composite projection.
#[derive(Debug, Clone)]
pub struct ProductCompositeRepository {
    pool: SqlitePool,
}

impl ProductCompositeRepository {
    /// Creates a new ProductCompositeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductCompositeRepository { pool }
    }

    /// Fetches the joined rows for all products matching a name exactly.
    pub(crate) async fn fetch_by_name(&self, name: &str) -> CatalogResult<Vec<ProductCompositeRow>> {
        debug!(name = %name, "Fetching composite rows by name");

        let rows = sqlx::query_as::<_, ProductCompositeRow>(&format!(
            "{COMPOSITE_QUERY} WHERE p.name = ?1 {COMPOSITE_ORDER}"
        ))
        .bind(name)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches the joined rows for a single product identifier.
    pub(crate) async fn fetch_by_id(&self, id: i64) -> CatalogResult<Vec<ProductCompositeRow>> {
        debug!(id = id, "Fetching composite rows by id");

        let rows = sqlx::query_as::<_, ProductCompositeRow>(&format!(
            "{COMPOSITE_QUERY} WHERE p.id = ?1 {COMPOSITE_ORDER}"
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
