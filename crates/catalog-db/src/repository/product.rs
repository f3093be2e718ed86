//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - Exact-match lookups by name and id, with optional expansion
//! - Create / partial update / delete
//! - Single-query variants over the pre-joined composite projection
//!
//! ## Expansion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 find_by_id(id, all = true)                              │
//! │                                                                         │
//! │  1. base row        SELECT ... FROM products WHERE id = ?              │
//! │  2. on-sale         OnSaleRepository::latest_for_product(id)           │
//! │  3. siblings        SELECT ... WHERE goods_id = ? AND id <> ?          │
//! │                                                                         │
//! │  All three steps must succeed or the whole operation fails;            │
//! │  partial data is discarded, never returned.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::repository::composite::ProductCompositeRepository;
use crate::repository::on_sale::OnSaleRepository;
use crate::rows::{fold_composite, ProductRow};
use catalog_core::{CatalogError, CatalogResult, NewProduct, Product, ProductPatch, UserRef};

const PRODUCT_COLUMNS: &str = "id, name, goods_id, \
     created_by_id, created_by_name, updated_by_id, updated_by_name, \
     created_at, updated_at";

/// Repository for product database operations.
///
/// Owns its collaborators: the on-sale repository supplying promotional
/// records during expansion, and the composite repository supplying the
/// pre-joined projection.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let widgets = repo.find_by_name("Widget", true).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    on_sale: OnSaleRepository,
    composite: ProductCompositeRepository,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository {
            on_sale: OnSaleRepository::new(pool.clone()),
            composite: ProductCompositeRepository::new(pool.clone()),
            pool,
        }
    }

    /// Finds products by exact name match.
    ///
    /// With `all = true` every result is expanded with its current on-sale
    /// records and its goods-group siblings. No match yields an empty vec,
    /// never an error.
    pub async fn find_by_name(&self, name: &str, all: bool) -> CatalogResult<Vec<Product>> {
        debug!(name = %name, all = all, "Finding products by name");

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1 ORDER BY id"
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let product = if all {
                self.load_full(row).await?
            } else {
                Product::from(row)
            };
            products.push(product);
        }

        debug!(count = products.len(), "Name lookup returned products");
        Ok(products)
    }

    /// Finds a product by its identifier.
    ///
    /// Fails with `NotFound` if no row matches. Expansion as in
    /// [`find_by_name`](Self::find_by_name).
    pub async fn find_by_id(&self, id: i64, all: bool) -> CatalogResult<Product> {
        debug!(id = id, all = all, "Finding product by id");

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CatalogError::not_found("product", id))?;

        if all {
            self.load_full(row).await
        } else {
            Ok(Product::from(row))
        }
    }

    /// Creates a product.
    ///
    /// Stamps the creator and creation time from the given actor and the
    /// current instant, inserts, and returns the stored representation
    /// including the generated identifier.
    pub async fn create(&self, new: NewProduct, actor: &UserRef) -> CatalogResult<Product> {
        debug!(name = %new.name, actor_id = actor.id, "Creating product");

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO products (name, goods_id, created_by_id, created_by_name, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&new.name)
        .bind(new.goods_id)
        .bind(actor.id)
        .bind(&actor.name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Product::from(row))
    }

    /// Applies a partial update.
    ///
    /// Only the patch's `Some` fields are written; the modifier and
    /// modification time are stamped from the given actor and the current
    /// instant. Fails with `NotFound` when zero rows are affected.
    pub async fn update(&self, patch: ProductPatch, actor: &UserRef) -> CatalogResult<()> {
        debug!(id = patch.id, actor_id = actor.id, "Updating product");

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE products SET \
                 name = COALESCE(?2, name), \
                 goods_id = COALESCE(?3, goods_id), \
                 updated_by_id = ?4, \
                 updated_by_name = ?5, \
                 updated_at = ?6 \
             WHERE id = ?1",
        )
        .bind(patch.id)
        .bind(patch.name)
        .bind(patch.goods_id)
        .bind(actor.id)
        .bind(&actor.name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("product", patch.id));
        }

        Ok(())
    }

    /// Deletes a product by identifier.
    ///
    /// Fails with `NotFound` when zero rows are affected. On-sale records
    /// go with it (FK cascade).
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("product", id));
        }

        Ok(())
    }

    /// Finds expanded products by name in a single pre-joined query,
    /// instead of the expand-after-fetch path.
    pub async fn find_by_name_with_all(&self, name: &str) -> CatalogResult<Vec<Product>> {
        let rows = self.composite.fetch_by_name(name).await?;
        let products = fold_composite(rows);

        debug!(count = products.len(), "Composite name lookup returned products");
        Ok(products)
    }

    /// Finds an expanded product by identifier in a single pre-joined query.
    ///
    /// Fails with `NotFound` if no row matches.
    pub async fn find_by_id_with_all(&self, id: i64) -> CatalogResult<Product> {
        let rows = self.composite.fetch_by_id(id).await?;

        fold_composite(rows)
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::not_found("product", id))
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> CatalogResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Expands a base row: current on-sale records via the collaborator,
    /// then goods-group siblings. Fails whole on any step.
    async fn load_full(&self, row: ProductRow) -> CatalogResult<Product> {
        let on_sale_list = self.on_sale.latest_for_product(row.id).await?;
        let siblings = self.load_siblings(&row).await?;

        let mut product = Product::from(row);
        product.on_sale_list = Some(on_sale_list);
        product.other_products = Some(siblings);
        Ok(product)
    }

    /// All other rows sharing the base row's goods_id, excluding the row
    /// itself, as plain products. An ungrouped product has no siblings.
    async fn load_siblings(&self, row: &ProductRow) -> CatalogResult<Vec<Product>> {
        let Some(goods_id) = row.goods_id else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE goods_id = ?1 AND id <> ?2 ORDER BY id"
        ))
        .bind(goods_id)
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use catalog_core::NewOnSale;
    use chrono::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn actor() -> UserRef {
        UserRef::new(1, "u1")
    }

    fn new_product(name: &str, goods_id: Option<i64>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            goods_id,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_without_matches_is_empty_not_error() {
        let db = test_db().await;

        let products = db.products().find_by_name("nothing here", true).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_unknown_is_not_found() {
        let db = test_db().await;

        let err = db.products().find_by_id(999, false).await.unwrap_err();
        assert_eq!(err, CatalogError::not_found("product", 999));
    }

    #[tokio::test]
    async fn test_create_stamps_creator_and_assigns_id() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo
            .create(new_product("Widget", Some(7)), &actor())
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.name, "Widget");
        assert_eq!(created.goods_id, Some(7));
        assert_eq!(created.created_by, actor());
        assert!(created.updated_by.is_none());
        assert!(created.updated_at.is_none());

        // Fresh product, nothing shares goodsId=7: expansion yields empty
        // lists, not missing ones.
        let found = repo.find_by_id(created.id, true).await.unwrap();
        assert_eq!(found.name, "Widget");
        assert_eq!(found.created_by, actor());
        assert_eq!(found.on_sale_list, Some(Vec::new()));
        assert_eq!(found.other_products, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_unexpanded_lookup_leaves_related_lists_unset() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.create(new_product("Widget", None), &actor()).await.unwrap();
        let found = repo.find_by_id(created.id, false).await.unwrap();

        assert!(found.on_sale_list.is_none());
        assert!(found.other_products.is_none());
    }

    #[tokio::test]
    async fn test_expansion_returns_goods_group_siblings_excluding_self() {
        let db = test_db().await;
        let repo = db.products();

        let a = repo.create(new_product("Widget A", Some(7)), &actor()).await.unwrap();
        let b = repo.create(new_product("Widget B", Some(7)), &actor()).await.unwrap();
        let c = repo.create(new_product("Widget C", Some(7)), &actor()).await.unwrap();
        // Different goods group, must not appear.
        repo.create(new_product("Gadget", Some(8)), &actor()).await.unwrap();

        let expanded = repo.find_by_id(a.id, true).await.unwrap();
        let siblings = expanded.other_products.unwrap();

        let ids: Vec<i64> = siblings.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, c.id]);
        assert!(!ids.contains(&a.id));
        // Siblings come back plain, never nested-expanded.
        assert!(siblings.iter().all(|s| s.on_sale_list.is_none()));
    }

    #[tokio::test]
    async fn test_expansion_includes_only_current_on_sale() {
        let db = test_db().await;
        let repo = db.products();
        let now = Utc::now();

        let product = repo.create(new_product("Widget", Some(7)), &actor()).await.unwrap();

        let open = db
            .on_sales()
            .create(NewOnSale {
                product_id: product.id,
                price_cents: 499,
                quantity: 10,
                begin_time: now - Duration::hours(1),
                end_time: now + Duration::hours(1),
            })
            .await
            .unwrap();
        // Expired window, must not appear.
        db.on_sales()
            .create(NewOnSale {
                product_id: product.id,
                price_cents: 399,
                quantity: 10,
                begin_time: now - Duration::hours(3),
                end_time: now - Duration::hours(2),
            })
            .await
            .unwrap();

        let expanded = repo.find_by_id(product.id, true).await.unwrap();
        let on_sale = expanded.on_sale_list.unwrap();

        assert_eq!(on_sale.len(), 1);
        assert_eq!(on_sale[0].id, open.id);
        assert_eq!(on_sale[0].price_cents, 499);
    }

    #[tokio::test]
    async fn test_update_writes_only_patched_fields() {
        let db = test_db().await;
        let repo = db.products();
        let modifier = UserRef::new(2, "u2");

        let created = repo.create(new_product("Widget", Some(7)), &actor()).await.unwrap();

        repo.update(
            ProductPatch {
                id: created.id,
                name: Some("Widget v2".to_string()),
                goods_id: None,
            },
            &modifier,
        )
        .await
        .unwrap();

        let found = repo.find_by_id(created.id, false).await.unwrap();
        assert_eq!(found.name, "Widget v2");
        assert_eq!(found.goods_id, Some(7));
        assert_eq!(found.created_by, actor());
        assert_eq!(found.updated_by, Some(modifier));
        assert!(found.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let db = test_db().await;

        let err = db
            .products()
            .update(ProductPatch::empty(999), &actor())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::not_found("product", 999));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.create(new_product("Widget", None), &actor()).await.unwrap();
        repo.delete(created.id).await.unwrap();

        let err = repo.find_by_id(created.id, false).await.unwrap_err();
        assert_eq!(err, CatalogError::not_found("product", created.id));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let db = test_db().await;

        let err = db.products().delete(999).await.unwrap_err();
        assert_eq!(err, CatalogError::not_found("product", 999));
    }

    #[tokio::test]
    async fn test_composite_matches_expand_after_fetch_path() {
        let db = test_db().await;
        let repo = db.products();
        let now = Utc::now();

        let a = repo.create(new_product("Widget", Some(7)), &actor()).await.unwrap();
        repo.create(new_product("Widget", Some(7)), &actor()).await.unwrap();
        repo.create(new_product("Other", Some(7)), &actor()).await.unwrap();
        db.on_sales()
            .create(NewOnSale {
                product_id: a.id,
                price_cents: 499,
                quantity: 5,
                begin_time: now - Duration::hours(1),
                end_time: now + Duration::hours(1),
            })
            .await
            .unwrap();

        let expanded = repo.find_by_name("Widget", true).await.unwrap();
        let composite = repo.find_by_name_with_all("Widget").await.unwrap();
        assert_eq!(composite, expanded);

        let by_id = repo.find_by_id_with_all(a.id).await.unwrap();
        assert_eq!(by_id, repo.find_by_id(a.id, true).await.unwrap());
    }

    #[tokio::test]
    async fn test_composite_by_id_unknown_is_not_found() {
        let db = test_db().await;

        let err = db.products().find_by_id_with_all(999).await.unwrap_err();
        assert_eq!(err, CatalogError::not_found("product", 999));
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.products();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create(new_product("Widget", None), &actor()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
