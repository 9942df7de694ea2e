//! Sort key enums, one per connection kind, and the [`Sortable`]
//! implementations of the catalog entities.

use crate::error::{PaginationError, PaginationResult};
use crate::ports::{SortKey, SortValue, Sortable};

use super::{Collection, EntityId, EntityKind, Image, Product, Variant};

/// Macro to generate a sort key enum scoped to one entity kind.
///
/// Generates:
/// - the enum with its `Default` variant
/// - `SortKey` (`name()` / `parse()`) using the canonical GraphQL names
/// - `Display`
macro_rules! sort_key_enum {
    (
        $(#[$meta:meta])*
        $name:ident for $kind:expr, default $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every key of this kind, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl SortKey for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn parse(name: &str) -> PaginationResult<Self> {
                match name {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(PaginationError::UnsupportedSortKey {
                        kind: $kind.as_str(),
                        key: name.to_string(),
                    }),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

sort_key_enum!(
    /// Sort keys of product connections.
    ProductSortKey for EntityKind::Product, default Id {
        Title => "TITLE",
        Price => "PRICE",
        BestSelling => "BEST_SELLING",
        Created => "CREATED",
        Id => "ID",
        Manual => "MANUAL",
        CollectionDefault => "COLLECTION_DEFAULT",
        Relevance => "RELEVANCE",
    }
);

sort_key_enum!(
    /// Sort keys of product image connections.
    ImageSortKey for EntityKind::Image, default Position {
        CreatedAt => "CREATED_AT",
        Position => "POSITION",
        Id => "ID",
        Relevance => "RELEVANCE",
    }
);

sort_key_enum!(
    /// Sort keys of product variant connections.
    VariantSortKey for EntityKind::Variant, default Position {
        Title => "TITLE",
        Sku => "SKU",
        Position => "POSITION",
        Id => "ID",
        Relevance => "RELEVANCE",
    }
);

sort_key_enum!(
    /// Sort keys of collection connections.
    CollectionSortKey for EntityKind::Collection, default Id {
        Title => "TITLE",
        UpdatedAt => "UPDATED_AT",
        Id => "ID",
        Relevance => "RELEVANCE",
    }
);

// =============================================================================
// Sortable implementations
// =============================================================================

impl Sortable for Product {
    type Key = ProductSortKey;
    const KIND: EntityKind = EntityKind::Product;

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn sort_value(&self, key: ProductSortKey) -> Option<SortValue> {
        Some(match key {
            ProductSortKey::Title => SortValue::text(&self.title),
            ProductSortKey::Price => SortValue::Int(self.price_cents),
            // Most sold first.
            ProductSortKey::BestSelling => SortValue::Int(self.units_sold.saturating_neg()),
            ProductSortKey::Created => SortValue::Time(self.created_at),
            ProductSortKey::Id => SortValue::Int(self.id),
            ProductSortKey::Manual | ProductSortKey::CollectionDefault => {
                SortValue::Int(i64::from(self.position?))
            }
            ProductSortKey::Relevance => self.relevance.map_or(SortValue::Null, SortValue::Score),
        })
    }
}

impl Sortable for Variant {
    type Key = VariantSortKey;
    const KIND: EntityKind = EntityKind::Variant;

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn sort_value(&self, key: VariantSortKey) -> Option<SortValue> {
        Some(match key {
            VariantSortKey::Title => SortValue::text(&self.title),
            VariantSortKey::Sku => SortValue::text(&self.sku),
            VariantSortKey::Position => SortValue::Int(i64::from(self.position)),
            VariantSortKey::Id => SortValue::Int(self.id),
            VariantSortKey::Relevance => SortValue::Null,
        })
    }
}

impl Sortable for Image {
    type Key = ImageSortKey;
    const KIND: EntityKind = EntityKind::Image;

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn sort_value(&self, key: ImageSortKey) -> Option<SortValue> {
        Some(match key {
            ImageSortKey::CreatedAt => SortValue::Time(self.created_at),
            ImageSortKey::Position => SortValue::Int(i64::from(self.position)),
            ImageSortKey::Id => SortValue::Int(self.id),
            ImageSortKey::Relevance => SortValue::Null,
        })
    }
}

impl Sortable for Collection {
    type Key = CollectionSortKey;
    const KIND: EntityKind = EntityKind::Collection;

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn sort_value(&self, key: CollectionSortKey) -> Option<SortValue> {
        Some(match key {
            CollectionSortKey::Title => SortValue::text(&self.title),
            CollectionSortKey::UpdatedAt => SortValue::Time(self.updated_at),
            CollectionSortKey::Id => SortValue::Int(self.id),
            CollectionSortKey::Relevance => SortValue::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for key in ProductSortKey::ALL {
            assert_eq!(ProductSortKey::parse(key.name()), Ok(*key));
        }
        for key in ImageSortKey::ALL {
            assert_eq!(ImageSortKey::parse(key.name()), Ok(*key));
        }
        for key in VariantSortKey::ALL {
            assert_eq!(VariantSortKey::parse(key.name()), Ok(*key));
        }
        for key in CollectionSortKey::ALL {
            assert_eq!(CollectionSortKey::parse(key.name()), Ok(*key));
        }
    }

    // Test critique: une clé n'est valide que pour son type d'entité
    #[test]
    fn test_keys_are_scoped_per_kind() {
        let err = ImageSortKey::parse("SKU").unwrap_err();
        assert_eq!(
            err,
            PaginationError::UnsupportedSortKey {
                kind: "image",
                key: "SKU".into()
            }
        );
        assert!(ProductSortKey::parse("POSITION").is_err());
        assert!(VariantSortKey::parse("SKU").is_ok());
        assert!(ProductSortKey::parse("title").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProductSortKey::default(), ProductSortKey::Id);
        assert_eq!(ImageSortKey::default(), ImageSortKey::Position);
        assert_eq!(VariantSortKey::default(), VariantSortKey::Position);
        assert_eq!(CollectionSortKey::default(), CollectionSortKey::Id);
    }
}
