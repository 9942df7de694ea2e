//! GraphQL schema definition.
//!
//! This module provides the query root of the storefront catalog: the
//! `shop` entry point with its product and collection connections, and
//! node lookups by global ID.

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ID, Object, Result, Schema, SchemaBuilder,
};
use tracing::debug;

use storefront_core::error::StorageError;
use storefront_core::models::{self, EntityKind, Store, StoreScope};
use storefront_core::ports::{CatalogSource, IdCodec, OrderingContext};
use storefront_core::services::{rank_products, GlobalIdCodec, Paginator};

use crate::connection::{catalog_error, connection_args, resolve_connection};
use crate::objects::{
    catalog, Collection, CollectionConnection, CollectionSortKeys, Product, ProductConnection,
    ProductSortKeys,
};
use crate::types::StorefrontSchema;

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth.
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score.
/// Each field has a default complexity of 1, nested objects multiply.
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Maximum length for handle and search arguments.
const MAX_FILTER_STRING_LENGTH: usize = 255;

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Build the catalog schema for one store.
///
/// Includes query depth and complexity limits.
pub fn build_schema(
    catalog: Arc<dyn CatalogSource>,
    scope: StoreScope,
    paginator: Paginator,
) -> StorefrontSchema {
    schema_builder(catalog, scope, paginator)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

/// Create a schema builder with the catalog data attached.
///
/// Global IDs default to [`GlobalIdCodec`]; call `.data()` with another
/// `Arc<dyn IdCodec>` to replace it. Remember to call `.limit_depth()` and
/// `.limit_complexity()` before `.finish()`.
pub fn schema_builder(
    catalog: Arc<dyn CatalogSource>,
    scope: StoreScope,
    paginator: Paginator,
) -> SchemaBuilder<CatalogQuery, EmptyMutation, EmptySubscription> {
    let ids: Arc<dyn IdCodec> = Arc::new(GlobalIdCodec);
    Schema::build(CatalogQuery, EmptyMutation, EmptySubscription)
        .data(catalog)
        .data(scope)
        .data(paginator)
        .data(ids)
}

// -----------------------------------------------------------------------------
// Query Root
// -----------------------------------------------------------------------------

/// Query root of the storefront catalog.
#[derive(Default)]
pub struct CatalogQuery;

#[Object]
impl CatalogQuery {
    /// The store the API is serving.
    async fn shop<'ctx>(&self, ctx: &Context<'ctx>) -> Result<Shop> {
        let (catalog, scope) = catalog(ctx)?;

        let store = catalog
            .store(scope)
            .await
            .map_err(catalog_error)?
            .ok_or_else(|| catalog_error(StorageError::NotFound(format!("store {}", scope.store_id))))?;
        Ok(Shop(store))
    }

    /// Get a product by global ID.
    async fn product<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Product>> {
        let Some(id) = decode_id(ctx, &id, EntityKind::Product)? else {
            return Ok(None);
        };
        let (catalog, scope) = catalog(ctx)?;

        let product = catalog.product(scope, id).await?;
        Ok(product.map(Product))
    }

    /// Get a collection by global ID.
    async fn collection<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Collection>> {
        let Some(id) = decode_id(ctx, &id, EntityKind::Collection)? else {
            return Ok(None);
        };
        let (catalog, scope) = catalog(ctx)?;

        let collection = catalog.collection(scope, id).await?;
        Ok(collection.map(Collection))
    }
}

// -----------------------------------------------------------------------------
// Shop
// -----------------------------------------------------------------------------

/// A store and its catalog.
pub struct Shop(Store);

#[Object]
impl Shop {
    /// The store's name.
    async fn name(&self) -> &str {
        &self.0.name
    }

    /// List of the store's products.
    #[allow(clippy::too_many_arguments)]
    async fn products<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(default)] reverse: bool,
        #[graphql(default_with = "ProductSortKeys::Id")] sort_key: ProductSortKeys,
        query: Option<String>,
    ) -> Result<Option<ProductConnection>> {
        validate_filter_string(&query, "query", false)?;
        let (catalog, scope) = catalog(ctx)?;

        let context = query.as_deref().map(OrderingContext::search).unwrap_or_default();
        let args = connection_args(first, after, last, before, sort_key.into(), reverse)
            .within(context);

        let products = async {
            let products = catalog.products(scope).await?;
            let Some(query) = &query else {
                return Ok::<_, StorageError>(products);
            };
            let ranked = rank_products(products, query);
            debug!(query = %query, matches = ranked.len(), "Products searched");
            Ok(ranked)
        };
        let connection = resolve_connection(ctx, products, &args, Product).await?;
        Ok(Some(connection.into()))
    }

    /// List of the store's collections.
    #[allow(clippy::too_many_arguments)]
    async fn collections<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(default)] reverse: bool,
        #[graphql(default_with = "CollectionSortKeys::Id")] sort_key: CollectionSortKeys,
    ) -> Result<Option<CollectionConnection>> {
        let (catalog, scope) = catalog(ctx)?;
        let args = connection_args(first, after, last, before, sort_key.into(), reverse);

        let collections = catalog.collections(scope);
        let connection = resolve_connection(ctx, collections, &args, Collection).await?;
        Ok(Some(connection.into()))
    }

    /// Find a product by its handle.
    async fn product_by_handle<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        handle: String,
    ) -> Result<Option<Product>> {
        validate_filter_string(&Some(handle.as_str()), "handle", true)?;
        let (catalog, scope) = catalog(ctx)?;

        let product = catalog.product_by_handle(scope, &handle).await?;
        Ok(product.map(Product))
    }

    /// Find a collection by its handle.
    async fn collection_by_handle<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        handle: String,
    ) -> Result<Option<Collection>> {
        validate_filter_string(&Some(handle.as_str()), "handle", true)?;
        let (catalog, scope) = catalog(ctx)?;

        let collection = catalog.collection_by_handle(scope, &handle).await?;
        Ok(collection.map(Collection))
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// Decode a global ID expected to name an entity of `kind`.
///
/// IDs of another kind resolve to nothing.
fn decode_id(ctx: &Context<'_>, id: &ID, kind: EntityKind) -> Result<Option<models::EntityId>> {
    let codec = ctx.data::<Arc<dyn IdCodec>>()?;
    let (decoded_kind, id) = codec.decode(id.as_str()).map_err(catalog_error)?;
    Ok((decoded_kind == kind).then_some(id))
}

/// Validate a string argument.
fn validate_filter_string<S: AsRef<str>>(
    s: &Option<S>,
    field_name: &str,
    required: bool,
) -> Result<()> {
    if let Some(value) = s {
        let value = value.as_ref();
        if value.len() > MAX_FILTER_STRING_LENGTH {
            return Err(async_graphql::Error::new(format!(
                "{} too long: maximum {} characters allowed",
                field_name, MAX_FILTER_STRING_LENGTH
            )));
        }
        if required && value.is_empty() {
            return Err(async_graphql::Error::new(format!(
                "{} cannot be empty",
                field_name
            )));
        }
    }
    Ok(())
}
