//! Catalog source implementation for PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use storefront_core::error::StorageResult;
use storefront_core::models::{
    Collection, EntityId, Image, Product, Store, StoreScope, Variant,
};
use storefront_core::ports::CatalogSource;

use super::database::Database;
use super::helpers::{query_error, require_non_negative, require_text};

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.store_id, p.title, p.handle, p.description, p.price_cents,
    p.units_sold, p.created_at, p.updated_at, p.published_at
"#;

const COLLECTION_COLUMNS: &str = r#"
    c.id, c.store_id, c.title, c.handle, c.description, c.updated_at
"#;

/// PostgreSQL implementation of CatalogSource.
///
/// Queries return rows in storage order; ordering is left to the
/// ordering engine.
pub struct PgCatalogSource {
    db: Database,
}

impl PgCatalogSource {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    async fn fetch_products(
        &self,
        where_clause: &str,
        scope: &StoreScope,
        param: Option<LookupParam<'_>>,
    ) -> StorageResult<Vec<Product>> {
        // `where_clause` is always a literal; values are bound.
        let query = format!(
            "SELECT {PRODUCT_COLUMNS}, NULL::INTEGER AS position FROM products p WHERE p.store_id = $1 {where_clause}"
        );

        let mut q = sqlx::query_as::<_, ProductRow>(&query).bind(scope.store_id);
        q = match param {
            Some(LookupParam::Id(id)) => q.bind(id),
            Some(LookupParam::Handle(handle)) => q.bind(handle),
            None => q,
        };

        let rows = q.fetch_all(self.db.pool()).await.map_err(query_error)?;
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn fetch_collections(
        &self,
        where_clause: &str,
        scope: &StoreScope,
        param: Option<LookupParam<'_>>,
    ) -> StorageResult<Vec<Collection>> {
        let query = format!(
            "SELECT {COLLECTION_COLUMNS} FROM collections c WHERE c.store_id = $1 {where_clause}"
        );

        let mut q = sqlx::query_as::<_, CollectionRow>(&query).bind(scope.store_id);
        q = match param {
            Some(LookupParam::Id(id)) => q.bind(id),
            Some(LookupParam::Handle(handle)) => q.bind(handle),
            None => q,
        };

        let rows = q.fetch_all(self.db.pool()).await.map_err(query_error)?;
        rows.into_iter().map(CollectionRow::into_collection).collect()
    }
}

/// Extra bound parameter of a lookup query.
enum LookupParam<'a> {
    Id(EntityId),
    Handle(&'a str),
}

#[async_trait]
impl CatalogSource for PgCatalogSource {
    async fn ping(&self) -> StorageResult<()> {
        self.db.ping().await
    }

    #[instrument(skip(self))]
    async fn store(&self, scope: &StoreScope) -> StorageResult<Option<Store>> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, code FROM stores WHERE id = $1")
                .bind(scope.store_id)
                .fetch_optional(self.db.pool())
                .await
                .map_err(query_error)?;

        Ok(row.map(|(id, name, code)| Store { id, name, code }))
    }

    #[instrument(skip(self))]
    async fn products(&self, scope: &StoreScope) -> StorageResult<Vec<Product>> {
        self.fetch_products("", scope, None).await
    }

    async fn product(&self, scope: &StoreScope, id: EntityId) -> StorageResult<Option<Product>> {
        let mut products = self
            .fetch_products("AND p.id = $2", scope, Some(LookupParam::Id(id)))
            .await?;
        Ok(products.pop())
    }

    async fn product_by_handle(
        &self,
        scope: &StoreScope,
        handle: &str,
    ) -> StorageResult<Option<Product>> {
        let mut products = self
            .fetch_products("AND p.handle = $2", scope, Some(LookupParam::Handle(handle)))
            .await?;
        Ok(products.pop())
    }

    #[instrument(skip(self))]
    async fn collections(&self, scope: &StoreScope) -> StorageResult<Vec<Collection>> {
        self.fetch_collections("", scope, None).await
    }

    async fn collection(
        &self,
        scope: &StoreScope,
        id: EntityId,
    ) -> StorageResult<Option<Collection>> {
        let mut collections = self
            .fetch_collections("AND c.id = $2", scope, Some(LookupParam::Id(id)))
            .await?;
        Ok(collections.pop())
    }

    async fn collection_by_handle(
        &self,
        scope: &StoreScope,
        handle: &str,
    ) -> StorageResult<Option<Collection>> {
        let mut collections = self
            .fetch_collections("AND c.handle = $2", scope, Some(LookupParam::Handle(handle)))
            .await?;
        Ok(collections.pop())
    }

    #[instrument(skip(self))]
    async fn products_in_collection(
        &self,
        scope: &StoreScope,
        collection_id: EntityId,
    ) -> StorageResult<Vec<Product>> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, cl.position
            FROM products p
            JOIN classifications cl ON cl.product_id = p.id
            JOIN collections c ON c.id = cl.collection_id
            WHERE c.store_id = $1 AND p.store_id = $1 AND c.id = $2
            "#
        );

        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(scope.store_id)
            .bind(collection_id)
            .fetch_all(self.db.pool())
            .await
            .map_err(query_error)?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    #[instrument(skip(self))]
    async fn variants_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Variant>> {
        let rows = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT v.id, v.product_id, v.title, v.sku, v.price_cents, v.position, v.created_at
            FROM variants v
            JOIN products p ON p.id = v.product_id
            WHERE p.store_id = $1 AND v.product_id = $2
            "#,
        )
        .bind(scope.store_id)
        .bind(product_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(query_error)?;

        rows.into_iter().map(VariantRow::into_variant).collect()
    }

    #[instrument(skip(self))]
    async fn images_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Image>> {
        let rows = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT i.id, i.product_id, i.alt_text, i.src, i.position, i.created_at
            FROM images i
            JOIN products p ON p.id = i.product_id
            WHERE p.store_id = $1 AND i.product_id = $2
            "#,
        )
        .bind(scope.store_id)
        .bind(product_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(query_error)?;

        rows.into_iter().map(ImageRow::into_image).collect()
    }

    #[instrument(skip(self))]
    async fn collections_for_product(
        &self,
        scope: &StoreScope,
        product_id: EntityId,
    ) -> StorageResult<Vec<Collection>> {
        let query = format!(
            r#"
            SELECT {COLLECTION_COLUMNS}
            FROM collections c
            JOIN classifications cl ON cl.collection_id = c.id
            WHERE c.store_id = $1 AND cl.product_id = $2
            "#
        );

        let rows = sqlx::query_as::<_, CollectionRow>(&query)
            .bind(scope.store_id)
            .bind(product_id)
            .fetch_all(self.db.pool())
            .await
            .map_err(query_error)?;

        rows.into_iter().map(CollectionRow::into_collection).collect()
    }
}

// -----------------------------------------------------------------------------
// Row types
// -----------------------------------------------------------------------------

/// Database row representation for Product.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    store_id: i64,
    title: String,
    handle: String,
    description: Option<String>,
    price_cents: i64,
    units_sold: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    position: Option<i32>,
}

impl ProductRow {
    fn into_product(self) -> StorageResult<Product> {
        Ok(Product {
            id: self.id,
            store_id: self.store_id,
            title: require_text(self.title, "products.title")?,
            handle: require_text(self.handle, "products.handle")?,
            description: self.description,
            price_cents: require_non_negative(self.price_cents, "products.price_cents")?,
            units_sold: require_non_negative(self.units_sold, "products.units_sold")?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            position: self.position,
            relevance: None,
        })
    }
}

/// Database row representation for Variant.
#[derive(sqlx::FromRow)]
struct VariantRow {
    id: i64,
    product_id: i64,
    title: String,
    sku: String,
    price_cents: i64,
    position: i32,
    created_at: DateTime<Utc>,
}

impl VariantRow {
    fn into_variant(self) -> StorageResult<Variant> {
        Ok(Variant {
            id: self.id,
            product_id: self.product_id,
            title: self.title,
            sku: self.sku,
            price_cents: require_non_negative(self.price_cents, "variants.price_cents")?,
            position: self.position,
            created_at: self.created_at,
        })
    }
}

/// Database row representation for Image.
#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i64,
    product_id: i64,
    alt_text: Option<String>,
    src: String,
    position: i32,
    created_at: DateTime<Utc>,
}

impl ImageRow {
    fn into_image(self) -> StorageResult<Image> {
        Ok(Image {
            id: self.id,
            product_id: self.product_id,
            alt_text: self.alt_text,
            src: require_text(self.src, "images.src")?,
            position: self.position,
            created_at: self.created_at,
        })
    }
}

/// Database row representation for Collection.
#[derive(sqlx::FromRow)]
struct CollectionRow {
    id: i64,
    store_id: i64,
    title: String,
    handle: String,
    description: Option<String>,
    updated_at: DateTime<Utc>,
}

impl CollectionRow {
    fn into_collection(self) -> StorageResult<Collection> {
        Ok(Collection {
            id: self.id,
            store_id: self.store_id,
            title: require_text(self.title, "collections.title")?,
            handle: require_text(self.handle, "collections.handle")?,
            description: self.description,
            updated_at: self.updated_at,
        })
    }
}
