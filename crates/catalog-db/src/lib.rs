//! # catalog-db: Database Layer for the Product Catalog
//!
//! This crate provides database access for the product catalog. It uses
//! SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Catalog Data Flow                           │
//! │                                                                         │
//! │  Domain-service caller                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ product       │    │  (embedded)  │  │   │
//! │  │   │               │    │ on_sale       │    │              │  │   │
//! │  │   │ SqlitePool    │    │ composite     │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                        ┌───────▼───────┐                      │   │
//! │  │                        │   rows.rs     │  row → domain copy   │   │
//! │  │                        └───────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - `rows` (crate-internal) - storage row types and the row → domain copies
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/catalog.db")).await?;
//! let widgets = db.products().find_by_name("Widget", true).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repository;

mod rows;

pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::on_sale::OnSaleRepository;
pub use repository::product::ProductRepository;
