//! Storage layer for the storefront catalog API.
//!
//! This crate provides implementations of the [`CatalogSource`] port
//! defined in `storefront-core`:
//!
//! - [`postgres::PgCatalogSource`] - PostgreSQL catalog (connection pooling,
//!   migrations, scoped read queries)
//! - [`memory::MemoryCatalog`] - In-process catalog for tests and demo mode
//!
//! # Usage
//!
//! ```ignore
//! use storefront_storage::{Database, DatabaseConfig, PgCatalogSource};
//!
//! // Connect to the database
//! let config = DatabaseConfig::new(&database_url);
//! let db = Database::connect(&config).await?;
//!
//! // Run migrations
//! db.migrate().await?;
//!
//! let catalog = Arc::new(PgCatalogSource::new(&db));
//! ```
//!
//! [`CatalogSource`]: storefront_core::ports::CatalogSource

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::{Database, DatabaseConfig, PgCatalogSource};
