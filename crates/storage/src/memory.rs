//! In-memory catalog source.
//!
//! Holds the whole catalog in process. Used by tests and by the binary's
//! demo mode; it is built once and never mutated afterwards, so it can be
//! shared across requests without locking.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use storefront_core::error::StorageResult;
use storefront_core::models::{
    Collection, EntityId, Image, Product, Store, StoreScope, Variant,
};
use storefront_core::ports::CatalogSource;

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    stores: Vec<Store>,
    products: Vec<Product>,
    variants: Vec<Variant>,
    images: Vec<Image>,
    collections: Vec<Collection>,
    /// (collection, product, position)
    classifications: Vec<(EntityId, EntityId, i32)>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: Store) -> Self {
        self.stores.push(store);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collections.push(collection);
        self
    }

    /// Classify a product in a collection at `position`.
    pub fn classify(mut self, collection_id: EntityId, product_id: EntityId, position: i32) -> Self {
        self.classifications.push((collection_id, product_id, position));
        self
    }

    /// Small sample catalog for store `1`.
    pub fn sample() -> Self {
        let at = |day: u32| -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0)
                .single()
                .unwrap_or_default()
        };

        let product = |id: EntityId, title: &str, price_cents: i64, units_sold: i64, day: u32| Product {
            id,
            store_id: 1,
            title: title.to_string(),
            handle: title.to_lowercase().replace(' ', "-"),
            description: Some(format!("  {} from the sample catalog.  ", title)),
            price_cents,
            units_sold,
            created_at: at(day),
            updated_at: at(day + 1),
            published_at: Some(at(day)),
            position: None,
            relevance: None,
        };

        let mut catalog = Self::new()
            .with_store(Store {
                id: 1,
                name: "Sample Store".to_string(),
                code: "sample".to_string(),
            })
            .with_product(product(1, "Ruby Mug", 1500, 120, 3))
            .with_product(product(2, "Canvas Tote", 2500, 45, 1))
            .with_product(product(3, "Solidus Tee", 2200, 300, 5))
            .with_product(product(4, "Enamel Pin", 800, 45, 2))
            .with_product(product(5, "Sticker Pack", 500, 12, 4))
            .with_collection(Collection {
                id: 10,
                store_id: 1,
                title: "Clothing".to_string(),
                handle: "clothing".to_string(),
                description: Some("Things to wear".to_string()),
                updated_at: at(6),
            })
            .with_collection(Collection {
                id: 11,
                store_id: 1,
                title: "Accessories".to_string(),
                handle: "accessories".to_string(),
                description: None,
                updated_at: at(7),
            })
            .classify(10, 3, 1)
            .classify(10, 2, 2)
            .classify(11, 1, 2)
            .classify(11, 4, 1)
            .classify(11, 5, 3)
            .classify(11, 2, 4);

        let sizes = ["S", "M", "L"];
        for (i, size) in sizes.iter().enumerate() {
            catalog = catalog.with_variant(Variant {
                id: 100 + i as EntityId,
                product_id: 3,
                title: size.to_string(),
                sku: format!("TEE-{}", size),
                price_cents: 2200,
                position: i as i32 + 1,
                created_at: at(5),
            });
        }

        for (i, alt) in ["Front", "Back"].iter().enumerate() {
            catalog = catalog.with_image(Image {
                id: 200 + i as EntityId,
                product_id: 3,
                alt_text: Some(alt.to_string()),
                src: format!("https://cdn.example.com/tee-{}.png", alt.to_lowercase()),
                position: i as i32 + 1,
                created_at: at(5),
            });
        }

        catalog
    }

    fn in_store<'a>(&'a self, scope: &'a StoreScope) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.store_id == scope.store_id)
    }

    fn product_in_store(&self, scope: &StoreScope, product_id: EntityId) -> bool {
        self.in_store(scope).any(|p| p.id == product_id)
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn store(&self, scope: &StoreScope) -> StorageResult<Option<Store>> {
        Ok(self.stores.iter().find(|s| s.id == scope.store_id).cloned())
    }

    async fn products(&self, scope: &StoreScope) -> StorageResult<Vec<Product>> {
        Ok(self.in_store(scope).cloned().collect())
    }

    async fn product(&self, scope: &StoreScope, id: EntityId) -> StorageResult<Option<Product>> {
        Ok(self.in_store(scope).find(|p| p.id == id).cloned())
    }

    async fn product_by_handle(
        &self,
        scope: &StoreScope,
        handle: &str,
    ) -> StorageResult<Option<Product>> {
        Ok(self.in_store(scope).find(|p| p.handle == handle).cloned())
    }

    async fn collections(&self, scope: &StoreScope) -> StorageResult<Vec<Collection>> {
        Ok(self
            .collections
            .iter()
            .filter(|c| c.store_id == scope.store_id)
            .cloned()
            .collect())
    }

    async fn collection(
        &self,
        scope: &StoreScope,
        id: EntityId,
    ) -> StorageResult<Option<Collection>> {
        Ok(self
            .collections
            .iter()
            .find(|c| c.store_id == scope.store_id && c.id == id)
            .cloned())
    }

    async fn collection_by_handle(
        &self,
        scope: &StoreScope,
        handle: &str,
    ) -> StorageResult<Option<Collection>> {
        Ok(self
            .collections
            .iter()
            .find(|c| c.store_id == scope.store_id && c.handle == handle)
            .cloned())
    }

    async fn products_in_collection(
        &self,
        scope: &StoreScope,
        collection_id: EntityId,
    ) -> StorageResult<Vec<Product>> {
        Ok(self
            .classifications
            .iter()
            .filter(|(c, _, _)| *c == collection_id)
            .filter_map(|(_, product_id, position)| {
                self.in_store(scope)
                    .find(|p| p.id == *product_id)
                    .map(|p| Product {
                        position: Some(*position),
                        ..p.clone()
                    })
            })
            .collect())
    }

    async fn variants_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Variant>> {
        if !self.product_in_store(scope, product_id) {
            return Ok(Vec::new());
        }
        Ok(self
            .variants
            .iter()
            .filter(|v| v.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn images_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Image>> {
        if !self.product_in_store(scope, product_id) {
            return Ok(Vec::new());
        }
        Ok(self
            .images
            .iter()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn collections_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Collection>> {
        Ok(self
            .classifications
            .iter()
            .filter(|(_, p, _)| *p == product_id)
            .filter_map(|(collection_id, _, _)| {
                self.collections
                    .iter()
                    .find(|c| c.id == *collection_id && c.store_id == scope.store_id)
                    .cloned()
            })
            .collect())
    }
}
