//! GraphQL type definitions.

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::schema::CatalogQuery;

/// The storefront catalog schema.
pub type StorefrontSchema = Schema<CatalogQuery, EmptyMutation, EmptySubscription>;
