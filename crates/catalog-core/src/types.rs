//! # Domain Types
//!
//! Core domain types for the product catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     OnSale      │   │    UserRef      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  product_id     │   │  name           │       │
//! │  │  goods_id       │   │  price_cents    │   └─────────────────┘       │
//! │  │  on_sale_list   │   │  begin/end time │                             │
//! │  │  other_products │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewProduct    │   │   NewOnSale     │   │  ProductPatch   │       │
//! │  │  insert draft   │   │  insert draft   │   │  partial update │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Audit fields (`created_by`, `created_at`, ...) are stamped by the
//! repositories, never by callers: the insert drafts simply have no place to
//! put them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// UserRef
// =============================================================================

/// The user or principal performing a create/update, recorded for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

impl UserRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        UserRef { id, name: name.into() }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Constructed by the data layer from a persisted row, never directly from
/// storage types. The two related lists are `None` unless the caller asked
/// for expansion; an expanded product with no related records carries
/// `Some(vec![])`, so absence of data and absence of expansion stay
/// distinguishable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Generated identifier, unique across the catalog.
    pub id: i64,

    /// Display name. Lookups match on it exactly.
    pub name: String,

    /// Goods-group reference. Products sharing a goods_id are sibling
    /// variants of the same goods; `None` means the product is ungrouped.
    pub goods_id: Option<i64>,

    /// Who created the product.
    pub created_by: UserRef,

    /// Who last modified the product, if it was ever modified.
    pub updated_by: Option<UserRef>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last modified, if ever.
    pub updated_at: Option<DateTime<Utc>>,

    /// Currently valid on-sale records. `None` = not expanded.
    pub on_sale_list: Option<Vec<OnSale>>,

    /// Sibling variants sharing the same goods_id, excluding this product.
    /// `None` = not expanded. Siblings are plain products: they are never
    /// themselves expanded.
    pub other_products: Option<Vec<Product>>,
}

/// Insert draft for a product.
///
/// Identifier and audit fields are assigned by the repository on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub goods_id: Option<i64>,
}

/// Partial update for a product.
///
/// Only `Some` fields are written; `None` leaves the stored value untouched.
/// The modifier and modification time are stamped by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub id: i64,
    pub name: Option<String>,
    pub goods_id: Option<i64>,
}

impl ProductPatch {
    /// A patch touching nothing but the audit fields.
    pub fn empty(id: i64) -> Self {
        ProductPatch { id, ..Default::default() }
    }
}

// =============================================================================
// OnSale
// =============================================================================

/// A promotional record attached to a product, valid within a
/// `[begin_time, end_time]` window.
///
/// Prices are integer cents. Which records count as "latest" is owned by the
/// on-sale repository, not by the product side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnSale {
    pub id: i64,
    pub product_id: i64,
    /// Sale price in cents (smallest currency unit).
    pub price_cents: i64,
    /// Units available at the sale price.
    pub quantity: i64,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert draft for an on-sale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOnSale {
    pub product_id: i64,
    pub price_cents: i64,
    pub quantity: i64,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_touches_nothing() {
        let patch = ProductPatch::empty(9);
        assert_eq!(patch.id, 9);
        assert!(patch.name.is_none());
        assert!(patch.goods_id.is_none());
    }

    #[test]
    fn test_user_ref_new() {
        let actor = UserRef::new(1, "u1");
        assert_eq!(actor, UserRef { id: 1, name: "u1".to_string() });
    }
}
