//! GraphQL API for the storefront catalog.
//!
//! Exposes products, variants, images and collections as Relay-style
//! connections. Every connection field accepts `first`, `after`, `last`,
//! `before`, `reverse` and a per-kind `sortKey`, and is resolved by the
//! core [`Paginator`](storefront_core::services::Paginator).
//!
//! # Building a Schema
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront_core::models::StoreScope;
//! use storefront_core::services::Paginator;
//! use storefront_graphql::build_schema;
//! use storefront_storage::MemoryCatalog;
//!
//! let schema = build_schema(
//!     Arc::new(MemoryCatalog::sample()),
//!     StoreScope::new(1),
//!     Paginator::default(),
//! );
//! ```

mod connection;
mod objects;
mod schema;
mod server;
mod types;

pub use connection::{catalog_error, PageInfo};
pub use objects::{
    Collection, CollectionConnection, CollectionSortKeys, Image, ImageConnection, Product,
    ProductCollectionSortKeys, ProductConnection, ProductImageSortKeys, ProductSortKeys,
    ProductVariant, ProductVariantConnection, ProductVariantSortKeys,
};
pub use schema::{
    build_schema, schema_builder, CatalogQuery, Shop, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH,
};
pub use server::{router, serve, serve_with_shutdown, ServerConfig};
pub use types::StorefrontSchema;
