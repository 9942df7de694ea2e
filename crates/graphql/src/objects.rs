//! GraphQL object types of the catalog.

use std::sync::Arc;

use async_graphql::{Context, Enum, ID, Object, Result};
use chrono::{DateTime, Utc};

use storefront_core::models::{self, EntityKind, StoreScope};
use storefront_core::ports::{CatalogSource, IdCodec, OrderingContext};

use crate::connection::{connection_args, define_connection, resolve_connection};

// -----------------------------------------------------------------------------
// Sort Key Enums
// -----------------------------------------------------------------------------

/// Macro to mirror a core sort key enum as a GraphQL enum.
macro_rules! graphql_sort_keys {
    ($(#[$meta:meta])* $name:ident => $core:ty {
        $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl From<$name> for $core {
            fn from(key: $name) -> Self {
                match key {
                    $($name::$variant => <$core>::$variant),+
                }
            }
        }
    };
}

graphql_sort_keys!(
    /// The set of valid sort keys for product connections.
    ProductSortKeys => models::ProductSortKey {
        Title,
        Price,
        BestSelling,
        Created,
        Id,
        /// Only valid inside a collection; elsewhere the connection fails
        /// with UNSUPPORTED_SORT_KEY.
        Manual,
        /// Only valid inside a collection; elsewhere the connection fails
        /// with UNSUPPORTED_SORT_KEY.
        CollectionDefault,
        Relevance,
    }
);

graphql_sort_keys!(
    /// The set of valid sort keys for products inside a collection.
    ProductCollectionSortKeys => models::ProductSortKey {
        Title,
        Price,
        BestSelling,
        Created,
        Id,
        Manual,
        CollectionDefault,
        Relevance,
    }
);

graphql_sort_keys!(
    /// The set of valid sort keys for product image connections.
    ProductImageSortKeys => models::ImageSortKey {
        CreatedAt,
        Position,
        Id,
        Relevance,
    }
);

graphql_sort_keys!(
    /// The set of valid sort keys for product variant connections.
    ProductVariantSortKeys => models::VariantSortKey {
        Title,
        Sku,
        Position,
        Id,
        Relevance,
    }
);

graphql_sort_keys!(
    /// The set of valid sort keys for collection connections.
    CollectionSortKeys => models::CollectionSortKey {
        Title,
        UpdatedAt,
        Id,
        Relevance,
    }
);

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

pub(crate) fn encode_id(ctx: &Context<'_>, kind: EntityKind, id: i64) -> Result<ID> {
    let codec = ctx.data::<Arc<dyn IdCodec>>()?;
    Ok(ID(codec.encode(kind, id)))
}

pub(crate) fn catalog<'a>(ctx: &Context<'a>) -> Result<(&'a Arc<dyn CatalogSource>, &'a StoreScope)> {
    Ok((ctx.data::<Arc<dyn CatalogSource>>()?, ctx.data::<StoreScope>()?))
}

/// Stripped description, empty when absent.
fn stripped(description: &Option<String>) -> String {
    description.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Format minor currency units as a decimal amount.
fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

// -----------------------------------------------------------------------------
// Product
// -----------------------------------------------------------------------------

/// A product offered by the store.
#[derive(Clone)]
pub struct Product(pub models::Product);

#[Object]
impl Product {
    /// Globally unique identifier.
    async fn id(&self, ctx: &Context<'_>) -> Result<ID> {
        encode_id(ctx, EntityKind::Product, self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    /// Human-friendly unique string for the product.
    async fn handle(&self) -> &str {
        &self.0.handle
    }

    /// Stripped description of the product.
    async fn description(&self) -> String {
        stripped(&self.0.description)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// When the product was published to the store.
    async fn published_at(&self) -> Option<DateTime<Utc>> {
        self.0.published_at
    }

    /// List of images associated with the product.
    #[allow(clippy::too_many_arguments)]
    async fn images(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(default)] reverse: bool,
        #[graphql(default_with = "ProductImageSortKeys::Position")] sort_key: ProductImageSortKeys,
    ) -> Result<Option<ImageConnection>> {
        let (catalog, scope) = catalog(ctx)?;
        let args = connection_args(first, after, last, before, sort_key.into(), reverse);

        let images = catalog.images_for_product(scope, self.0.id);
        let connection = resolve_connection(ctx, images, &args, Image).await?;
        Ok(Some(connection.into()))
    }

    /// List of the product's variants.
    #[allow(clippy::too_many_arguments)]
    async fn variants(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(default)] reverse: bool,
        #[graphql(default_with = "ProductVariantSortKeys::Position")] sort_key: ProductVariantSortKeys,
    ) -> Result<Option<ProductVariantConnection>> {
        let (catalog, scope) = catalog(ctx)?;
        let args = connection_args(first, after, last, before, sort_key.into(), reverse);

        let variants = catalog.variants_for_product(scope, self.0.id);
        let connection = resolve_connection(ctx, variants, &args, ProductVariant).await?;
        Ok(Some(connection.into()))
    }

    /// List of collections the product belongs to.
    async fn collections(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(default)] reverse: bool,
    ) -> Result<Option<CollectionConnection>> {
        let (catalog, scope) = catalog(ctx)?;
        let args = connection_args(
            first,
            after,
            last,
            before,
            models::CollectionSortKey::default(),
            reverse,
        );

        let collections = catalog.collections_for_product(scope, self.0.id);
        let connection = resolve_connection(ctx, collections, &args, Collection).await?;
        Ok(Some(connection.into()))
    }
}

// -----------------------------------------------------------------------------
// Variant & Image
// -----------------------------------------------------------------------------

/// A purchasable variant of a product.
#[derive(Clone)]
pub struct ProductVariant(pub models::Variant);

#[Object]
impl ProductVariant {
    async fn id(&self, ctx: &Context<'_>) -> Result<ID> {
        encode_id(ctx, EntityKind::Variant, self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn sku(&self) -> &str {
        &self.0.sku
    }

    /// Decimal price, e.g. `"22.00"`.
    async fn price(&self) -> String {
        format_price(self.0.price_cents)
    }

    async fn position(&self) -> i32 {
        self.0.position
    }
}

/// An image of a product.
#[derive(Clone)]
pub struct Image(pub models::Image);

#[Object]
impl Image {
    async fn id(&self, ctx: &Context<'_>) -> Result<ID> {
        encode_id(ctx, EntityKind::Image, self.0.id)
    }

    async fn alt_text(&self) -> Option<&str> {
        self.0.alt_text.as_deref()
    }

    async fn src(&self) -> &str {
        &self.0.src
    }

    /// Location of the original, untransformed image.
    async fn original_src(&self) -> &str {
        &self.0.src
    }
}

// -----------------------------------------------------------------------------
// Collection
// -----------------------------------------------------------------------------

/// A group of products.
#[derive(Clone)]
pub struct Collection(pub models::Collection);

#[Object]
impl Collection {
    async fn id(&self, ctx: &Context<'_>) -> Result<ID> {
        encode_id(ctx, EntityKind::Collection, self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn handle(&self) -> &str {
        &self.0.handle
    }

    /// Stripped description of the collection.
    async fn description(&self) -> String {
        stripped(&self.0.description)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// List of products in the collection.
    #[allow(clippy::too_many_arguments)]
    async fn products(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
        #[graphql(default)] reverse: bool,
        #[graphql(default_with = "ProductCollectionSortKeys::CollectionDefault")]
        sort_key: ProductCollectionSortKeys,
    ) -> Result<Option<ProductConnection>> {
        let (catalog, scope) = catalog(ctx)?;
        let args = connection_args(first, after, last, before, sort_key.into(), reverse)
            .within(OrderingContext::Collection(self.0.id));

        let products = catalog.products_in_collection(scope, self.0.id);
        let connection = resolve_connection(ctx, products, &args, Product).await?;
        Ok(Some(connection.into()))
    }
}

define_connection!(Product, ProductEdge, ProductConnection);
define_connection!(ProductVariant, ProductVariantEdge, ProductVariantConnection);
define_connection!(Image, ImageEdge, ImageConnection);
define_connection!(Collection, CollectionEdge, CollectionConnection);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_stripped() {
        assert_eq!(stripped(&Some("  Not stripped  ".into())), "Not stripped");
        assert_eq!(stripped(&None), "");
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price(2200), "22.00");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(-150), "-1.50");
    }

    #[test]
    fn test_sort_keys_map_to_core() {
        assert_eq!(
            models::ProductSortKey::from(ProductCollectionSortKeys::CollectionDefault),
            models::ProductSortKey::CollectionDefault
        );
        assert_eq!(
            models::ImageSortKey::from(ProductImageSortKeys::CreatedAt),
            models::ImageSortKey::CreatedAt
        );
    }
}
