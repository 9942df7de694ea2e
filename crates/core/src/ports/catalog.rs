//! Port trait for the catalog data source.
//!
//! The domain layer never talks to a database directly. Implementations
//! live in the infrastructure layer (e.g., `storefront-storage`).

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::models::{Collection, EntityId, Image, Product, Store, StoreScope, Variant};

/// Read access to the catalog of one store.
///
/// Every call is scoped by a [`StoreScope`]; entities of other stores are
/// never returned. Listing calls return items in no particular order, the
/// ordering engine is responsible for a deterministic order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fails when the source cannot currently answer queries.
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }

    /// The store the scope points at.
    async fn store(&self, scope: &StoreScope) -> StorageResult<Option<Store>>;

    /// All products of the store.
    async fn products(&self, scope: &StoreScope) -> StorageResult<Vec<Product>>;

    /// Get a product by ID.
    async fn product(&self, scope: &StoreScope, id: EntityId) -> StorageResult<Option<Product>>;

    /// Get a product by handle.
    async fn product_by_handle(
        &self,
        scope: &StoreScope,
        handle: &str,
    ) -> StorageResult<Option<Product>>;

    /// All collections of the store.
    async fn collections(&self, scope: &StoreScope) -> StorageResult<Vec<Collection>>;

    /// Get a collection by ID.
    async fn collection(
        &self,
        scope: &StoreScope,
        id: EntityId,
    ) -> StorageResult<Option<Collection>>;

    /// Get a collection by handle.
    async fn collection_by_handle(
        &self,
        scope: &StoreScope,
        handle: &str,
    ) -> StorageResult<Option<Collection>>;

    /// Products classified in a collection, with `position` set.
    async fn products_in_collection(
        &self,
        scope: &StoreScope,
        collection_id: EntityId,
    ) -> StorageResult<Vec<Product>>;

    /// Variants of a product.
    async fn variants_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Variant>>;

    /// Images of a product.
    async fn images_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Image>>;

    /// Collections a product is classified in.
    async fn collections_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Collection>>;
}
