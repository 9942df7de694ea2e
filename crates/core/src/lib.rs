//! Core domain layer for the storefront catalog API.
//!
//! This crate contains the domain models, port traits (interfaces), and the
//! ordering/pagination engine behind every list-valued field of the API.
//! It follows hexagonal architecture principles - this is the innermost
//! layer with no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    storefront (binary)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │   storefront-graphql (API)   │   storefront-storage         │
//! │                              │   (PostgreSQL / in-memory)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   storefront-core  ← YOU ARE HERE           │
//! │            (models, ports, ordering, pagination)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Catalog entities and their per-kind sort keys
//! - [`ports`] - Interface traits and the connection types
//! - [`services`] - Ordering engine, paginator, cursors, global IDs, search
//! - [`error`] - Domain error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Resolving a connection
//!
//! 1. A field resolver fetches raw entities from a [`ports::CatalogSource`]
//! 2. [`services::order`] sorts them by the requested sort key, ties broken
//!    by ascending ID, optionally reversed
//! 3. [`services::Paginator`] turns `after`/`before` cursors into window
//!    bounds, applies `first`/`last` and computes `pageInfo` against the
//!    full order
//! 4. Every edge gets a cursor bound to the ordering that produced it
//!
//! ```ignore
//! use storefront_core::ports::ConnectionArgs;
//! use storefront_core::models::ProductSortKey;
//! use storefront_core::services::Paginator;
//!
//! let args = ConnectionArgs::first(10).sorted_by(ProductSortKey::Title);
//! let page = Paginator::default().resolve(products, &args)?;
//! ```

pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;
pub mod services;
