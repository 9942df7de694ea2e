//! Port trait for opaque global identifiers.

use crate::error::PaginationResult;
use crate::models::{EntityId, EntityKind};

/// Encodes and decodes the opaque `id` exposed for every entity.
pub trait IdCodec: Send + Sync {
    /// Encode a stable opaque identifier.
    fn encode(&self, kind: EntityKind, id: EntityId) -> String;

    /// Decode an identifier produced by [`IdCodec::encode`].
    ///
    /// Fails with `InvalidId` for anything else.
    fn decode(&self, value: &str) -> PaginationResult<(EntityKind, EntityId)>;
}
