//! PostgreSQL storage adapter.
//!
//! This module implements the [`CatalogSource`] port defined in
//! `storefront-core` using PostgreSQL as the backing store.
//!
//! # Architecture
//!
//! - [`Database`] - Connection pool and migrations
//! - [`PgCatalogSource`] - Store-scoped read queries over the catalog tables
//!
//! # Usage
//!
//! ```ignore
//! let config = DatabaseConfig::new(&database_url);
//! let db = Database::connect(&config).await?;
//! db.migrate().await?;
//!
//! let catalog = PgCatalogSource::new(&db);
//! ```
//!
//! [`CatalogSource`]: storefront_core::ports::CatalogSource

mod catalog_repo;
mod database;
mod helpers;

pub use catalog_repo::PgCatalogSource;
pub use database::{Database, DatabaseConfig};
