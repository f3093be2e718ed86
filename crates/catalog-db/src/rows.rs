//! # Row Types
//!
//! Storage representations of the catalog tables, owned exclusively by this
//! crate. Every row is copied into a domain object before leaving the data
//! layer; callers never see these types.
//!
//! ## Row Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Row → Domain Copy                                │
//! │                                                                         │
//! │  products table ──► ProductRow ──► From ──► Product                    │
//! │  on_sale table  ──► OnSaleRow  ──► From ──► OnSale                     │
//! │                                                                         │
//! │  pre-joined projection ──► ProductCompositeRow ──► fold_composite      │
//! │  (one flat row per        (nullable on-sale and     groups by product  │
//! │   product × on-sale        sibling columns)          id, de-duplicates │
//! │   × sibling combo)                                   joined records)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use catalog_core::{OnSale, Product, UserRef};

// =============================================================================
// Base Rows
// =============================================================================

/// A persisted product record, flat as stored.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub goods_id: Option<i64>,
    pub created_by_id: i64,
    pub created_by_name: String,
    pub updated_by_id: Option<i64>,
    pub updated_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            goods_id: row.goods_id,
            created_by: UserRef {
                id: row.created_by_id,
                name: row.created_by_name,
            },
            updated_by: user_ref(row.updated_by_id, row.updated_by_name),
            created_at: row.created_at,
            updated_at: row.updated_at,
            on_sale_list: None,
            other_products: None,
        }
    }
}

/// A persisted on-sale record, flat as stored.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct OnSaleRow {
    pub id: i64,
    pub product_id: i64,
    pub price_cents: i64,
    pub quantity: i64,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OnSaleRow> for OnSale {
    fn from(row: OnSaleRow) -> Self {
        OnSale {
            id: row.id,
            product_id: row.product_id,
            price_cents: row.price_cents,
            quantity: row.quantity,
            begin_time: row.begin_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Both halves of an audit pair must be present to name a modifier.
fn user_ref(id: Option<i64>, name: Option<String>) -> Option<UserRef> {
    match (id, name) {
        (Some(id), Some(name)) => Some(UserRef { id, name }),
        _ => None,
    }
}

// =============================================================================
// Composite Row
// =============================================================================

/// One flat row of the pre-joined projection: product columns plus nullable
/// on-sale and sibling columns. Read-only, never written back.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ProductCompositeRow {
    pub id: i64,
    pub name: String,
    pub goods_id: Option<i64>,
    pub created_by_id: i64,
    pub created_by_name: String,
    pub updated_by_id: Option<i64>,
    pub updated_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,

    pub on_sale_id: Option<i64>,
    pub on_sale_price_cents: Option<i64>,
    pub on_sale_quantity: Option<i64>,
    pub on_sale_begin_time: Option<DateTime<Utc>>,
    pub on_sale_end_time: Option<DateTime<Utc>>,
    pub on_sale_created_at: Option<DateTime<Utc>>,
    pub on_sale_updated_at: Option<DateTime<Utc>>,

    pub sibling_id: Option<i64>,
    pub sibling_name: Option<String>,
    pub sibling_goods_id: Option<i64>,
    pub sibling_created_by_id: Option<i64>,
    pub sibling_created_by_name: Option<String>,
    pub sibling_updated_by_id: Option<i64>,
    pub sibling_updated_by_name: Option<String>,
    pub sibling_created_at: Option<DateTime<Utc>>,
    pub sibling_updated_at: Option<DateTime<Utc>>,
}

impl ProductCompositeRow {
    /// The expanded product this row belongs to, with empty related lists.
    fn base_product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            goods_id: self.goods_id,
            created_by: UserRef {
                id: self.created_by_id,
                name: self.created_by_name.clone(),
            },
            updated_by: user_ref(self.updated_by_id, self.updated_by_name.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
            on_sale_list: Some(Vec::new()),
            other_products: Some(Vec::new()),
        }
    }

    /// The on-sale record carried by this row, if the join matched one.
    fn on_sale(&self) -> Option<OnSale> {
        Some(OnSale {
            id: self.on_sale_id?,
            product_id: self.id,
            price_cents: self.on_sale_price_cents?,
            quantity: self.on_sale_quantity?,
            begin_time: self.on_sale_begin_time?,
            end_time: self.on_sale_end_time?,
            created_at: self.on_sale_created_at?,
            updated_at: self.on_sale_updated_at,
        })
    }

    /// The sibling product carried by this row, if the join matched one.
    /// Siblings come back plain: no nested expansion.
    fn sibling(&self) -> Option<Product> {
        Some(Product {
            id: self.sibling_id?,
            name: self.sibling_name.clone()?,
            goods_id: self.sibling_goods_id,
            created_by: UserRef {
                id: self.sibling_created_by_id?,
                name: self.sibling_created_by_name.clone()?,
            },
            updated_by: user_ref(self.sibling_updated_by_id, self.sibling_updated_by_name.clone()),
            created_at: self.sibling_created_at?,
            updated_at: self.sibling_updated_at,
            on_sale_list: None,
            other_products: None,
        })
    }
}

/// Folds a run of composite rows (ordered by product id) into expanded
/// products, de-duplicating the on-sale and sibling records the join
/// multiplied out.
pub(crate) fn fold_composite(rows: Vec<ProductCompositeRow>) -> Vec<Product> {
    let mut products: Vec<Product> = Vec::new();
    let mut current: Option<Product> = None;

    for row in rows {
        if current.as_ref().map(|p| p.id) != Some(row.id) {
            if let Some(done) = current.take() {
                products.push(done);
            }
            current = Some(row.base_product());
        }

        let Some(product) = current.as_mut() else {
            continue;
        };

        if let (Some(on_sale), Some(list)) = (row.on_sale(), product.on_sale_list.as_mut()) {
            if !list.iter().any(|o| o.id == on_sale.id) {
                list.push(on_sale);
            }
        }
        if let (Some(sibling), Some(list)) = (row.sibling(), product.other_products.as_mut()) {
            if !list.iter().any(|s| s.id == sibling.id) {
                list.push(sibling);
            }
        }
    }

    if let Some(done) = current {
        products.push(done);
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn composite_row(id: i64) -> ProductCompositeRow {
        ProductCompositeRow {
            id,
            name: format!("product-{id}"),
            goods_id: Some(7),
            created_by_id: 1,
            created_by_name: "u1".to_string(),
            updated_by_id: None,
            updated_by_name: None,
            created_at: ts(1_000),
            updated_at: None,
            on_sale_id: None,
            on_sale_price_cents: None,
            on_sale_quantity: None,
            on_sale_begin_time: None,
            on_sale_end_time: None,
            on_sale_created_at: None,
            on_sale_updated_at: None,
            sibling_id: None,
            sibling_name: None,
            sibling_goods_id: None,
            sibling_created_by_id: None,
            sibling_created_by_name: None,
            sibling_updated_by_id: None,
            sibling_updated_by_name: None,
            sibling_created_at: None,
            sibling_updated_at: None,
        }
    }

    fn with_on_sale(mut row: ProductCompositeRow, on_sale_id: i64) -> ProductCompositeRow {
        row.on_sale_id = Some(on_sale_id);
        row.on_sale_price_cents = Some(499);
        row.on_sale_quantity = Some(10);
        row.on_sale_begin_time = Some(ts(500));
        row.on_sale_end_time = Some(ts(2_000));
        row.on_sale_created_at = Some(ts(500));
        row
    }

    fn with_sibling(mut row: ProductCompositeRow, sibling_id: i64) -> ProductCompositeRow {
        row.sibling_id = Some(sibling_id);
        row.sibling_name = Some(format!("sibling-{sibling_id}"));
        row.sibling_goods_id = Some(7);
        row.sibling_created_by_id = Some(1);
        row.sibling_created_by_name = Some("u1".to_string());
        row.sibling_created_at = Some(ts(900));
        row
    }

    #[test]
    fn test_fold_empty() {
        assert!(fold_composite(Vec::new()).is_empty());
    }

    #[test]
    fn test_fold_lone_product_has_empty_lists() {
        let products = fold_composite(vec![composite_row(1)]);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].on_sale_list, Some(Vec::new()));
        assert_eq!(products[0].other_products, Some(Vec::new()));
    }

    #[test]
    fn test_fold_deduplicates_cross_product() {
        // Two on-sale records × two siblings produce four joined rows.
        let rows = vec![
            with_sibling(with_on_sale(composite_row(1), 10), 2),
            with_sibling(with_on_sale(composite_row(1), 10), 3),
            with_sibling(with_on_sale(composite_row(1), 11), 2),
            with_sibling(with_on_sale(composite_row(1), 11), 3),
        ];
        let products = fold_composite(rows);
        assert_eq!(products.len(), 1);

        let on_sale = products[0].on_sale_list.as_ref().unwrap();
        let siblings = products[0].other_products.as_ref().unwrap();
        assert_eq!(on_sale.iter().map(|o| o.id).collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(siblings.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_fold_groups_adjacent_products() {
        let rows = vec![
            with_on_sale(composite_row(1), 10),
            composite_row(2),
            with_sibling(composite_row(3), 1),
        ];
        let products = fold_composite(rows);
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(products[1].on_sale_list, Some(Vec::new()));
        assert_eq!(products[2].other_products.as_ref().unwrap()[0].id, 1);
    }

    #[test]
    fn test_siblings_are_not_nested_expanded() {
        let products = fold_composite(vec![with_sibling(composite_row(1), 2)]);
        let sibling = &products[0].other_products.as_ref().unwrap()[0];
        assert!(sibling.on_sale_list.is_none());
        assert!(sibling.other_products.is_none());
    }
}
