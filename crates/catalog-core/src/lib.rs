//! # catalog-core: Pure Domain Types for the Product Catalog
//!
//! This crate contains the catalog's domain objects and the business error
//! taxonomy, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Catalog Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Domain-service caller                        │   │
//! │  │        works with Product / OnSale / CatalogError only          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐              ┌───────────┐                     │   │
//! │  │   │   types   │              │   error   │                     │   │
//! │  │   │  Product  │              │ NotFound  │                     │   │
//! │  │   │  OnSale   │              │ Internal  │                     │   │
//! │  │   └───────────┘              └───────────┘                     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   catalog-db (Database Layer)                   │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, OnSale, UserRef, drafts, patches)
//! - [`error`] - The two-kind business error taxonomy

pub mod error;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use types::*;
