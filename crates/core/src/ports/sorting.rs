//! Sorting capability shared by every orderable entity kind.
//!
//! Each connection kind has its own sort key enum implementing [`SortKey`],
//! and each entity kind implements [`Sortable`] to expose the value a key
//! sorts on plus its stable identifier.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::error::PaginationResult;
use crate::models::{EntityId, EntityKind};

/// A sort key enum scoped to one connection kind.
pub trait SortKey: Copy + Eq + Default + Send + Sync + std::fmt::Debug {
    /// Canonical (GraphQL enum) name, e.g. `TITLE`.
    fn name(&self) -> &'static str;

    /// Parse a canonical name.
    ///
    /// Fails with `UnsupportedSortKey` for names not defined for this kind.
    fn parse(name: &str) -> PaginationResult<Self>;
}

/// An entity that can be placed in a connection.
pub trait Sortable {
    type Key: SortKey;

    /// Kind of entity, bound into every cursor.
    const KIND: EntityKind;

    /// Stable unique identifier, used for tie-breaking and cursors.
    fn entity_id(&self) -> EntityId;

    /// Value of the attribute `key` sorts on.
    ///
    /// Returns `None` when the key is not defined for this entity in its
    /// current context (e.g. `MANUAL` outside of a collection).
    fn sort_value(&self, key: Self::Key) -> Option<SortValue>;
}

/// An orderable attribute value.
///
/// Values of one key always share a variant; `Null` sorts before anything.
#[derive(Debug, Clone)]
pub enum SortValue {
    Null,
    Int(i64),
    /// Compared case-insensitively.
    Text(String),
    Time(DateTime<Utc>),
    /// Higher scores sort first.
    Score(f64),
}

impl SortValue {
    /// Text value, folded for case-insensitive comparison.
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_lowercase())
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Int(_) => 1,
            Self::Text(_) => 2,
            Self::Time(_) => 3,
            Self::Score(_) => 4,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::Score(a), Self::Score(b)) => b.total_cmp(a),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}
