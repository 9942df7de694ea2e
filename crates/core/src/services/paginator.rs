//! Connection paginator - turns an ordered sequence and Relay arguments
//! into a page of edges.

use std::future::Future;
use std::ops::Range;

use tracing::{debug, instrument};

use crate::error::{CatalogResult, PaginationError, PaginationResult, StorageResult};
use crate::metrics::{record_connection_resolved, record_pagination_error, ResolveTimer};
use crate::ports::{Connection, ConnectionArgs, Cursor, Edge, PageInfo, Sortable};

use super::cursor::CursorCodec;
use super::ordering::order;

// =============================================================================
// Configuration
// =============================================================================

/// Default maximum number of edges in one page.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 250;

/// Configuration for the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Ceiling for `first`, `last` and unbounded requests.
    pub max_page_size: usize,
    /// Page size used when neither `first` nor `last` is given.
    ///
    /// `None` returns the whole window, subject to `max_page_size`.
    pub default_page_size: Option<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            default_page_size: None,
        }
    }
}

// =============================================================================
// Paginator
// =============================================================================

/// Stateless connection paginator.
///
/// Holds only its configuration, so one instance can be shared across
/// concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Order `entities` per the arguments, then paginate them.
    ///
    /// This is what a connection field resolver calls.
    #[instrument(skip_all, fields(kind = %T::KIND, sort_key = ?args.sort_key, reverse = args.reverse))]
    pub fn resolve<T: Sortable>(
        &self,
        entities: Vec<T>,
        args: &ConnectionArgs<T::Key>,
    ) -> PaginationResult<Connection<T>> {
        let _timer = ResolveTimer::new(T::KIND);

        let result = order(entities, args.sort_key, args.reverse)
            .and_then(|ordered| self.paginate(ordered, args));

        match &result {
            Ok(connection) => {
                record_connection_resolved(T::KIND);
                debug!(
                    edges = connection.edges.len(),
                    has_next = connection.page_info.has_next_page,
                    has_previous = connection.page_info.has_previous_page,
                    "Connection resolved"
                );
            }
            Err(e) => {
                record_pagination_error(T::KIND, e.code());
                debug!(error = %e, "Connection rejected");
            }
        }

        result
    }

    /// Fetch entities from a catalog source, then resolve them.
    pub async fn load<T, F>(&self, fetch: F, args: &ConnectionArgs<T::Key>) -> CatalogResult<Connection<T>>
    where
        T: Sortable,
        F: Future<Output = StorageResult<Vec<T>>>,
    {
        let entities = fetch.await?;
        Ok(self.resolve(entities, args)?)
    }

    /// Paginate an already ordered sequence.
    ///
    /// `ordered` must be in the order described by `args.sort_key` and
    /// `args.reverse`; cursors are bound to that ordering.
    pub fn paginate<T: Sortable>(
        &self,
        ordered: Vec<T>,
        args: &ConnectionArgs<T::Key>,
    ) -> PaginationResult<Connection<T>> {
        let first = validate_size("first", args.first)?;
        let last = validate_size("last", args.last)?;

        let codec = CursorCodec::for_args(T::KIND, args);
        let total = ordered.len();

        // Window bounded by the cursors, as indices into the full order.
        let mut start = 0;
        let mut end = total;

        if let Some(after) = &args.after {
            start = position_of(&ordered, &codec, after)? + 1;
        }
        if let Some(before) = &args.before {
            end = position_of(&ordered, &codec, before)?;
        }
        let start = start.min(end);

        // Forward arguments take precedence over backward ones.
        let range = match (first, last) {
            (Some(first), _) => {
                self.check_ceiling(first)?;
                start..end.min(start + first)
            }
            (None, Some(last)) => {
                self.check_ceiling(last)?;
                end.saturating_sub(last).max(start)..end
            }
            // A lone `before` pages backward from it.
            (None, None) => match self.config.default_page_size {
                Some(size) if args.before.is_some() && args.after.is_none() => {
                    self.check_ceiling(size)?;
                    end.saturating_sub(size).max(start)..end
                }
                Some(size) => {
                    self.check_ceiling(size)?;
                    start..end.min(start + size)
                }
                None => {
                    self.check_ceiling(end - start)?;
                    start..end
                }
            },
        };

        Ok(build_connection(ordered, range, &codec))
    }

    fn check_ceiling(&self, requested: usize) -> PaginationResult<()> {
        if requested > self.config.max_page_size {
            return Err(PaginationError::PageSizeExceeded {
                requested,
                max: self.config.max_page_size,
            });
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn validate_size(argument: &'static str, value: Option<i32>) -> PaginationResult<Option<usize>> {
    match value {
        Some(v) if v < 0 => Err(PaginationError::InvalidPageSize { argument, value: v }),
        Some(v) => Ok(Some(v as usize)),
        None => Ok(None),
    }
}

/// Index of the entity a cursor points at.
///
/// A cursor whose entity is no longer part of the sequence is stale.
fn position_of<T: Sortable>(
    ordered: &[T],
    codec: &CursorCodec<T::Key>,
    cursor: &Cursor,
) -> PaginationResult<usize> {
    let id = codec.decode(cursor)?;
    ordered
        .iter()
        .position(|entity| entity.entity_id() == id)
        .ok_or_else(|| {
            PaginationError::InvalidCursor(format!("{} {} is not part of this connection", T::KIND, id))
        })
}

fn build_connection<T: Sortable>(
    ordered: Vec<T>,
    range: Range<usize>,
    codec: &CursorCodec<T::Key>,
) -> Connection<T> {
    let total = ordered.len();
    let has_previous_page = range.start > 0;
    let has_next_page = range.end < total;

    let edges: Vec<Edge<T>> = ordered
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .map(|node| Edge {
            cursor: codec.encode(node.entity_id()),
            node,
        })
        .collect();

    let page_info = PageInfo {
        has_next_page,
        has_previous_page,
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
    };

    Connection {
        edges,
        page_info,
        total_count: Some(total as i64),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{EntityKind, Product, ProductSortKey};
    use crate::ports::{OrderDirection, OrderingContext};

    fn product(id: i64, title: &str) -> Product {
        Product {
            id,
            store_id: 1,
            title: title.into(),
            handle: title.to_lowercase(),
            description: None,
            price_cents: 1000,
            units_sold: 0,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            published_at: None,
            position: None,
            relevance: None,
        }
    }

    fn five() -> Vec<Product> {
        (1..=5).map(|id| product(id, &format!("P{id}"))).collect()
    }

    fn ids(connection: &Connection<Product>) -> Vec<i64> {
        connection.edges.iter().map(|e| e.node.id).collect()
    }

    fn paginator() -> Paginator {
        Paginator::default()
    }

    fn id_cursor(id: i64) -> Cursor {
        CursorCodec::new(EntityKind::Product, ProductSortKey::Id, OrderDirection::Asc).encode(id)
    }

    // Test critique: parcours complet en avant, pageInfo calculé sur l'ordre complet
    #[test]
    fn test_forward_walk_over_five_items() {
        let args = ConnectionArgs::<ProductSortKey>::first(2);
        let page1 = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page1), vec![1, 2]);
        assert!(page1.page_info.has_next_page);
        assert!(!page1.page_info.has_previous_page);

        let args = ConnectionArgs::first(2).after(page1.page_info.end_cursor.clone().unwrap());
        let page2 = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page2), vec![3, 4]);
        assert!(page2.page_info.has_next_page);
        assert!(page2.page_info.has_previous_page);

        let args = ConnectionArgs::first(2).after(page2.edges[1].cursor.clone());
        let page3 = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page3), vec![5]);
        assert!(!page3.page_info.has_next_page);
    }

    #[test]
    fn test_after_returns_strictly_following_items() {
        let all = paginator()
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::default())
            .unwrap();

        for (i, edge) in all.edges.iter().enumerate() {
            let args = ConnectionArgs::default().after(edge.cursor.clone());
            let rest = paginator().resolve(five(), &args).unwrap();
            assert!(!ids(&rest).contains(&edge.node.id));
            assert_eq!(ids(&rest), ids(&all)[i + 1..].to_vec());
        }
    }

    #[test]
    fn test_backward_pagination_keeps_declared_order() {
        let args = ConnectionArgs::<ProductSortKey>::last(2);
        let tail = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&tail), vec![4, 5]);
        assert!(!tail.page_info.has_next_page);
        assert!(tail.page_info.has_previous_page);

        let args = ConnectionArgs::last(2).before(tail.page_info.start_cursor.clone().unwrap());
        let previous = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&previous), vec![2, 3]);
        assert!(previous.page_info.has_next_page);
        assert!(previous.page_info.has_previous_page);

        let args = ConnectionArgs::last(10).before(previous.edges[0].cursor.clone());
        let head = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&head), vec![1]);
        assert!(!head.page_info.has_previous_page);
        assert!(head.page_info.has_next_page);
    }

    #[test]
    fn test_title_example_with_reverse() {
        let products = vec![product(1, "B"), product(2, "A")];

        let asc = ConnectionArgs::default().sorted_by(ProductSortKey::Title);
        let page = paginator().resolve(products.clone(), &asc).unwrap();
        assert_eq!(ids(&page), vec![2, 1]);

        let desc = ConnectionArgs::first(1)
            .sorted_by(ProductSortKey::Title)
            .reversed(true);
        let page = paginator().resolve(products, &desc).unwrap();
        assert_eq!(ids(&page), vec![1]);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
    }

    #[test]
    fn test_empty_collection() {
        let args = ConnectionArgs::<ProductSortKey>::first(5);
        let page = paginator().resolve(Vec::<Product>::new(), &args).unwrap();
        assert!(page.edges.is_empty());
        assert_eq!(page.page_info, PageInfo::default());
        assert_eq!(page.total_count, Some(0));
    }

    // first: 0 renvoie une page vide mais hasNextPage reste exact
    #[test]
    fn test_first_zero_reports_next_page() {
        let page = paginator()
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::first(0))
            .unwrap();
        assert!(page.edges.is_empty());
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
        assert_eq!(page.page_info.start_cursor, None);
    }

    #[test]
    fn test_negative_sizes_are_rejected() {
        let err = paginator()
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::first(-1))
            .unwrap_err();
        assert_eq!(
            err,
            PaginationError::InvalidPageSize {
                argument: "first",
                value: -1
            }
        );

        let err = paginator()
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::last(-5))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PAGE_SIZE");
    }

    // Test critique: un curseur TITLE asc est refusé par une requête TITLE desc
    #[test]
    fn test_cursor_from_other_direction_is_rejected() {
        let asc = ConnectionArgs::first(1).sorted_by(ProductSortKey::Title);
        let page = paginator().resolve(five(), &asc).unwrap();
        let cursor = page.edges[0].cursor.clone();

        let desc = ConnectionArgs::first(1)
            .sorted_by(ProductSortKey::Title)
            .reversed(true)
            .after(cursor);
        let err = paginator().resolve(five(), &desc).unwrap_err();
        assert!(matches!(err, PaginationError::InvalidCursor(_)));
    }

    #[test]
    fn test_stale_cursor_is_rejected() {
        let page = paginator()
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::last(1))
            .unwrap();
        let cursor = page.edges[0].cursor.clone();

        let remaining: Vec<Product> = five().into_iter().filter(|p| p.id != 5).collect();
        let err = paginator()
            .resolve(remaining, &ConnectionArgs::first(2).after(cursor))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_CURSOR");
    }

    #[test]
    fn test_page_size_ceiling() {
        let small = Paginator::new(PaginationConfig {
            max_page_size: 3,
            ..Default::default()
        });

        let err = small
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::default())
            .unwrap_err();
        assert_eq!(err, PaginationError::PageSizeExceeded { requested: 5, max: 3 });

        assert!(small.resolve(five(), &ConnectionArgs::<ProductSortKey>::first(4)).is_err());
        assert_eq!(
            ids(&small.resolve(five(), &ConnectionArgs::<ProductSortKey>::first(3)).unwrap()),
            vec![1, 2, 3]
        );

        // Unbounded but already narrowed by a cursor
        let cursor = id_cursor(2);
        let page = small.resolve(five(), &ConnectionArgs::default().after(cursor)).unwrap();
        assert_eq!(ids(&page), vec![3, 4, 5]);
    }

    #[test]
    fn test_first_takes_precedence_over_last() {
        let args = ConnectionArgs::<ProductSortKey> {
            first: Some(2),
            last: Some(1),
            ..Default::default()
        };
        let page = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page), vec![1, 2]);
    }

    #[test]
    fn test_after_and_before_bound_a_window() {
        let codec = CursorCodec::new(EntityKind::Product, ProductSortKey::Id, OrderDirection::Asc);

        let args = ConnectionArgs::<ProductSortKey>::default()
            .after(codec.encode(1))
            .before(codec.encode(5));
        let page = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page), vec![2, 3, 4]);
        assert!(page.page_info.has_next_page);
        assert!(page.page_info.has_previous_page);

        // Crossed cursors give an empty window
        let args = ConnectionArgs::<ProductSortKey>::default()
            .after(codec.encode(4))
            .before(codec.encode(2));
        let page = paginator().resolve(five(), &args).unwrap();
        assert!(page.edges.is_empty());
    }

    // Test critique: directions mélangées, first avec before et last avec after
    #[test]
    fn test_mixed_direction_pairs() {
        let args = ConnectionArgs::<ProductSortKey>::first(2).before(id_cursor(5));
        let page = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page), vec![1, 2]);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);

        let args = ConnectionArgs::<ProductSortKey>::last(2).after(id_cursor(1));
        let page = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page), vec![4, 5]);
        assert!(!page.page_info.has_next_page);
        assert!(page.page_info.has_previous_page);

        // Fenêtre bornée des deux côtés, first prend la tête
        let args = ConnectionArgs::<ProductSortKey>::first(10)
            .after(id_cursor(1))
            .before(id_cursor(4));
        let page = paginator().resolve(five(), &args).unwrap();
        assert_eq!(ids(&page), vec![2, 3]);
        assert!(page.page_info.has_next_page);
        assert!(page.page_info.has_previous_page);
    }

    #[test]
    fn test_default_page_size_applies_without_first_or_last() {
        let paged = Paginator::new(PaginationConfig {
            max_page_size: 3,
            default_page_size: Some(2),
        });

        let page = paged
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::default())
            .unwrap();
        assert_eq!(ids(&page), vec![1, 2]);
        assert!(page.page_info.has_next_page);

        let page = paged
            .resolve(five(), &ConnectionArgs::default().after(id_cursor(2)))
            .unwrap();
        assert_eq!(ids(&page), vec![3, 4]);

        // Un before seul recule depuis le curseur
        let page = paged
            .resolve(five(), &ConnectionArgs::default().before(id_cursor(5)))
            .unwrap();
        assert_eq!(ids(&page), vec![3, 4]);
        assert!(page.page_info.has_previous_page);

        // first explicite reste prioritaire sur le défaut
        let page = paged
            .resolve(five(), &ConnectionArgs::<ProductSortKey>::first(3))
            .unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3]);
    }

    // Test critique: un curseur MANUAL d'une collection est refusé par une autre
    #[test]
    fn test_cursor_from_other_collection_is_rejected() {
        let in_collection = |positions: [(i64, i32); 3]| -> Vec<Product> {
            positions
                .into_iter()
                .map(|(id, position)| Product {
                    position: Some(position),
                    ..product(id, &format!("P{id}"))
                })
                .collect()
        };
        let a = in_collection([(1, 1), (2, 2), (3, 3)]);
        let b = in_collection([(1, 3), (2, 1), (3, 2)]);

        let args_a = ConnectionArgs::first(1)
            .sorted_by(ProductSortKey::Manual)
            .within(OrderingContext::Collection(10));
        let page = paginator().resolve(a, &args_a).unwrap();
        let cursor = page.edges[0].cursor.clone();

        let args_b = ConnectionArgs::first(5)
            .sorted_by(ProductSortKey::Manual)
            .within(OrderingContext::Collection(11))
            .after(cursor.clone());
        let err = paginator().resolve(b, &args_b).unwrap_err();
        assert_eq!(err.code(), "INVALID_CURSOR");

        // Même collection: le curseur reste valide
        let args_same = ConnectionArgs::first(5)
            .sorted_by(ProductSortKey::Manual)
            .within(OrderingContext::Collection(10))
            .after(cursor);
        let page = paginator()
            .resolve(in_collection([(1, 1), (2, 2), (3, 3)]), &args_same)
            .unwrap();
        assert_eq!(ids(&page), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_load_reports_storage_and_pagination_failures() {
        use crate::error::{CatalogError, StorageError};

        let args = ConnectionArgs::<ProductSortKey>::first(2);
        let page = paginator().load(async { Ok(five()) }, &args).await.unwrap();
        assert_eq!(ids(&page), vec![1, 2]);

        let err = paginator()
            .load(
                async { Err::<Vec<Product>, _>(StorageError::QueryError("boom".into())) },
                &args,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
        assert_eq!(err.code(), "STORAGE_ERROR");

        let err = paginator()
            .load(async { Ok(five()) }, &ConnectionArgs::<ProductSortKey>::first(-1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PAGE_SIZE");
    }
}
