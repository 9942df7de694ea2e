//! Domain models representing catalog data.
//!
//! These models are storage-agnostic. The core only reads them: ordering
//! and pagination never mutate an entity.

mod sort_keys;

pub use sort_keys::{CollectionSortKey, ImageSortKey, ProductSortKey, VariantSortKey};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable unique identifier of a catalog entity.
pub type EntityId = i64;

// =============================================================================
// Entity Kinds & Scope
// =============================================================================

/// The kinds of entity that can be listed in a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Product,
    Variant,
    Image,
    Collection,
}

impl EntityKind {
    /// Lowercase name used inside cursors and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Image => "image",
            Self::Collection => "collection",
        }
    }

    /// Type name used inside global IDs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Variant => "ProductVariant",
            Self::Image => "Image",
            Self::Collection => "Collection",
        }
    }

    /// Parse a lowercase kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "product" => Some(Self::Product),
            "variant" => Some(Self::Variant),
            "image" => Some(Self::Image),
            "collection" => Some(Self::Collection),
            _ => None,
        }
    }

    /// Parse a global ID type name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        [Self::Product, Self::Variant, Self::Image, Self::Collection]
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tenant scope threaded through every catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreScope {
    pub store_id: EntityId,
}

impl StoreScope {
    pub fn new(store_id: EntityId) -> Self {
        Self { store_id }
    }
}

/// A storefront (tenant) of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: EntityId,
    pub name: String,
    pub code: String,
}

// =============================================================================
// Products
// =============================================================================

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub store_id: EntityId,
    pub title: String,
    /// URL slug, unique per store.
    pub handle: String,
    pub description: Option<String>,
    /// Price of the master variant in minor currency units.
    pub price_cents: i64,
    pub units_sold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// When the product became available (`None` while unpublished).
    pub published_at: Option<DateTime<Utc>>,
    /// Position inside a collection.
    ///
    /// Only set when the product was fetched through a collection.
    pub position: Option<i32>,
    /// Search relevance score, set by [`crate::services::rank_products`].
    #[serde(skip)]
    pub relevance: Option<f64>,
}

/// A purchasable variant of a product (size, colour, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: EntityId,
    pub product_id: EntityId,
    pub title: String,
    pub sku: String,
    pub price_cents: i64,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: EntityId,
    pub product_id: EntityId,
    pub alt_text: Option<String>,
    pub src: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Collections
// =============================================================================

/// A group of products (a taxon of the store's taxonomies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: EntityId,
    pub store_id: EntityId,
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_names_roundtrip() {
        for kind in [
            EntityKind::Product,
            EntityKind::Variant,
            EntityKind::Image,
            EntityKind::Collection,
        ] {
            assert_eq!(EntityKind::from_name(kind.as_str()), Some(kind));
            assert_eq!(EntityKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(EntityKind::from_name("Product"), None);
    }
}
