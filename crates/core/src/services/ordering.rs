//! Ordering engine - deterministic total order over a connection's entities.

use crate::error::{PaginationError, PaginationResult};
use crate::ports::{SortKey, SortValue, Sortable};

/// Order `entities` by `key`, breaking ties by ascending entity ID.
///
/// When `reverse` is set the final order is inverted as a whole (primary key
/// and tie-break together), so reversing twice gives back the original
/// order. The result does not depend on the order of the input.
///
/// Fails with `UnsupportedSortKey` if any entity does not define `key`.
pub fn order<T: Sortable>(entities: Vec<T>, key: T::Key, reverse: bool) -> PaginationResult<Vec<T>> {
    let mut keyed = entities
        .into_iter()
        .map(|entity| {
            let value = entity.sort_value(key).ok_or_else(|| unsupported::<T>(key))?;
            Ok((value, entity.entity_id(), entity))
        })
        .collect::<PaginationResult<Vec<(SortValue, _, T)>>>()?;

    keyed.sort_by(|(va, ida, _), (vb, idb, _)| va.cmp(vb).then(ida.cmp(idb)));

    if reverse {
        keyed.reverse();
    }

    Ok(keyed.into_iter().map(|(_, _, entity)| entity).collect())
}

fn unsupported<T: Sortable>(key: T::Key) -> PaginationError {
    PaginationError::UnsupportedSortKey {
        kind: T::KIND.as_str(),
        key: key.name().to_string(),
    }
}
