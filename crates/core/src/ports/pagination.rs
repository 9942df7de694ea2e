//! Pagination types for connection fields.
//!
//! These types implement Relay-style cursor pagination. Every list-valued
//! field of the API (products, variants, images, collections) takes the
//! same [`ConnectionArgs`] and returns the same [`Connection`] shape.

use sha2::{Digest, Sha256};

use super::sorting::SortKey;
use crate::models::EntityId;

/// Opaque cursor for pagination.
///
/// The cursor value is produced by [`crate::services::CursorCodec`] and
/// should be treated as an opaque token by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub value: String,
}

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Ordering direction of a resolved connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl OrderDirection {
    /// Direction implied by the `reverse` argument.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// What an ordering depends on besides its sort key and direction.
///
/// Two connections of the same kind and sort key only share cursors when
/// their context is equal: positions are per collection and relevance
/// scores are per search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrderingContext {
    #[default]
    Unscoped,
    /// Products listed through a collection.
    Collection(EntityId),
    /// Products filtered and scored by a search query (digest of the
    /// normalized query).
    Search(String),
}

impl OrderingContext {
    /// Context of a search for `query`.
    ///
    /// Queries that differ only in case or whitespace share a context. A
    /// blank query scores nothing and stays unscoped.
    pub fn search(query: &str) -> Self {
        let normalized = query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            return Self::Unscoped;
        }

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        Self::Search(digest[..16].to_string())
    }

    /// Compact tag bound into cursors.
    pub fn tag(&self) -> String {
        match self {
            Self::Unscoped => "-".to_string(),
            Self::Collection(id) => format!("c{id}"),
            Self::Search(digest) => format!("q{digest}"),
        }
    }
}

/// Arguments of one connection field.
///
/// Supports forward pagination (`first`/`after`) and backward pagination
/// (`last`/`before`). When `first` and `last` are both present, `first`
/// wins. The sort key type scopes the accepted keys to one entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs<K: SortKey> {
    /// Number of items to fetch from the head of the window.
    pub first: Option<i32>,
    /// Exclusive lower bound.
    pub after: Option<Cursor>,
    /// Number of items to fetch from the tail of the window.
    pub last: Option<i32>,
    /// Exclusive upper bound.
    pub before: Option<Cursor>,
    /// Primary ordering attribute.
    pub sort_key: K,
    /// Invert the computed order.
    pub reverse: bool,
    /// Collection or search the ordering is computed within.
    pub context: OrderingContext,
}

impl<K: SortKey> ConnectionArgs<K> {
    /// Forward pagination: the first `n` items.
    pub fn first(n: i32) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }

    /// Backward pagination: the last `n` items.
    pub fn last(n: i32) -> Self {
        Self {
            last: Some(n),
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, sort_key: K) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn within(mut self, context: OrderingContext) -> Self {
        self.context = context;
        self
    }

    pub fn after(mut self, cursor: Cursor) -> Self {
        self.after = Some(cursor);
        self
    }

    pub fn before(mut self, cursor: Cursor) -> Self {
        self.before = Some(cursor);
        self
    }

    /// Direction the ordering is computed in.
    pub fn direction(&self) -> OrderDirection {
        OrderDirection::from_reverse(self.reverse)
    }
}

/// Paginated result set with edges and page info.
///
/// This is the Relay connection pattern for cursor-based pagination.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// List of edges (node + cursor pairs), in the declared order.
    pub edges: Vec<Edge<T>>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Number of items in the full ordered sequence.
    pub total_count: Option<i64>,
}

impl<T> Connection<T> {
    /// An empty page with no neighbours.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: Some(0),
        }
    }

    /// Transform every node, keeping cursors and page info.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Connection<U> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge {
                    node: f(edge.node),
                    cursor: edge.cursor,
                })
                .collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }
}

/// A single item in a paginated result.
#[derive(Debug, Clone)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// Cursor for this item (used for pagination).
    pub cursor: Cursor,
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are items after this page in the full order.
    pub has_next_page: bool,
    /// Whether there are items before this page in the full order.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<Cursor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_context_normalizes_query() {
        assert_eq!(
            OrderingContext::search("Ruby  MUG"),
            OrderingContext::search(" ruby mug ")
        );
        assert_ne!(OrderingContext::search("ruby"), OrderingContext::search("tote"));
        assert_eq!(OrderingContext::search("   "), OrderingContext::Unscoped);
    }

    #[test]
    fn test_context_tags_are_distinct() {
        assert_eq!(OrderingContext::Unscoped.tag(), "-");
        assert_eq!(OrderingContext::Collection(10).tag(), "c10");
        let tag = OrderingContext::search("tee").tag();
        assert!(tag.starts_with('q') && tag.len() == 17);
        assert!(!tag.contains(':'));
    }
}
