//! Relay connection plumbing shared by every list-valued field.

use std::future::Future;

use async_graphql::{Context, ErrorExtensions, Result};
use tracing::warn;

use storefront_core::error::{CatalogError, StorageResult};
use storefront_core::ports::{ConnectionArgs, Cursor, SortKey, Sortable};
use storefront_core::services::Paginator;

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

#[derive(async_graphql::SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<storefront_core::ports::PageInfo> for PageInfo {
    fn from(info: storefront_core::ports::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor.map(|c| c.value),
            end_cursor: info.end_cursor.map(|c| c.value),
        }
    }
}

/// Generate Relay-style connection types (Edge + Connection) with From impl.
macro_rules! define_connection {
    ($node:ty, $edge:ident, $connection:ident) => {
        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub nodes: Vec<$node>,
            pub page_info: $crate::connection::PageInfo,
            pub total_count: Option<i64>,
        }

        impl From<storefront_core::ports::Connection<$node>> for $connection {
            fn from(conn: storefront_core::ports::Connection<$node>) -> Self {
                Self {
                    nodes: conn.edges.iter().map(|e| e.node.clone()).collect(),
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge {
                            node: e.node,
                            cursor: e.cursor.value,
                        })
                        .collect(),
                    page_info: conn.page_info.into(),
                    total_count: conn.total_count,
                }
            }
        }
    };
}

pub(crate) use define_connection;

// -----------------------------------------------------------------------------
// Arguments & Resolution
// -----------------------------------------------------------------------------

/// Assemble typed connection arguments from raw field arguments.
///
/// The ordering is unscoped; chain `.within()` for collection or search
/// orderings.
pub fn connection_args<K: SortKey>(
    first: Option<i32>,
    after: Option<String>,
    last: Option<i32>,
    before: Option<String>,
    sort_key: K,
    reverse: bool,
) -> ConnectionArgs<K> {
    ConnectionArgs {
        first,
        after: after.map(Cursor::new),
        last,
        before: before.map(Cursor::new),
        sort_key,
        reverse,
        ..Default::default()
    }
}

/// Fetch, order and paginate entities, wrapping each node into its
/// GraphQL type.
pub async fn resolve_connection<T, N, F>(
    ctx: &Context<'_>,
    fetch: F,
    args: &ConnectionArgs<T::Key>,
    wrap: impl FnMut(T) -> N,
) -> Result<storefront_core::ports::Connection<N>>
where
    T: Sortable,
    F: Future<Output = StorageResult<Vec<T>>>,
{
    let paginator = ctx.data::<Paginator>()?;
    let connection = paginator.load(fetch, args).await.map_err(catalog_error)?;
    Ok(connection.map(wrap))
}

/// Turn a catalog failure into a field error carrying its code.
pub fn catalog_error(err: impl Into<CatalogError>) -> async_graphql::Error {
    let err = err.into();
    if let CatalogError::Storage(e) = &err {
        warn!(error = %e, "Catalog source failed");
    }

    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}
