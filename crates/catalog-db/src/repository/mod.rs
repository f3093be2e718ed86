//! # Repository Module
//!
//! Database repository implementations for the product catalog.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - product lookups, CRUD, and the
//!   single-query composite variants
//! - [`on_sale::OnSaleRepository`] - promotional records ("latest" semantics
//!   live here)
//! - `composite` (crate-internal) - the pre-joined read-only projection
//!   backing the composite variants; its rows never leave the crate

pub(crate) mod composite;
pub mod on_sale;
pub mod product;
