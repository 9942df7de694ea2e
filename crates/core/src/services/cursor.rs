//! Versioned, ordering-bound cursor tokens.
//!
//! A cursor names one entity inside one specific total order. The plain
//! form is
//!
//! ```text
//! v1:<kind>:<SORT_KEY>:<asc|desc>:<context>:<entity id>
//! ```
//!
//! encoded as URL-safe base64 without padding. A cursor is only accepted
//! by a connection of the same kind, sort key, direction and
//! [`OrderingContext`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::{PaginationError, PaginationResult};
use crate::models::{EntityId, EntityKind};
use crate::ports::{ConnectionArgs, Cursor, OrderDirection, OrderingContext, SortKey};

/// Current cursor format version.
pub const CURSOR_VERSION: &str = "v1";

/// Maximum accepted length of an encoded cursor.
const MAX_CURSOR_LENGTH: usize = 256;

/// The ordering a cursor is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorCodec<K: SortKey> {
    kind: EntityKind,
    sort_key: K,
    direction: OrderDirection,
    context: String,
}

impl<K: SortKey> CursorCodec<K> {
    /// Codec for an unscoped ordering.
    pub fn new(kind: EntityKind, sort_key: K, direction: OrderDirection) -> Self {
        Self {
            kind,
            sort_key,
            direction,
            context: OrderingContext::Unscoped.tag(),
        }
    }

    /// Codec for the ordering described by connection arguments.
    pub fn for_args(kind: EntityKind, args: &ConnectionArgs<K>) -> Self {
        Self::new(kind, args.sort_key, args.direction()).within(&args.context)
    }

    pub fn within(mut self, context: &OrderingContext) -> Self {
        self.context = context.tag();
        self
    }

    /// Encode the position of `id` in this ordering.
    pub fn encode(&self, id: EntityId) -> Cursor {
        let plain = format!(
            "{}:{}:{}:{}:{}:{}",
            CURSOR_VERSION,
            self.kind.as_str(),
            self.sort_key.name(),
            self.direction.as_str(),
            self.context,
            id
        );
        Cursor::new(URL_SAFE_NO_PAD.encode(plain))
    }

    /// Decode a cursor and return the entity ID it points at.
    ///
    /// Fails closed: anything not produced by `encode` under this exact
    /// ordering is an `InvalidCursor`.
    pub fn decode(&self, cursor: &Cursor) -> PaginationResult<EntityId> {
        if cursor.value.is_empty() || cursor.value.len() > MAX_CURSOR_LENGTH {
            return Err(invalid("malformed cursor"));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(cursor.value.as_bytes())
            .map_err(|_| invalid("malformed cursor"))?;
        let plain = String::from_utf8(bytes).map_err(|_| invalid("malformed cursor"))?;

        let parts: Vec<&str> = plain.split(':').collect();
        let [version, kind, sort_key, direction, context, id] = parts.as_slice() else {
            return Err(invalid("malformed cursor"));
        };

        if *version != CURSOR_VERSION {
            return Err(invalid(format!("unsupported cursor version {version}")));
        }
        if EntityKind::from_name(kind) != Some(self.kind) {
            return Err(invalid(format!(
                "cursor belongs to a {kind} connection, not {}",
                self.kind
            )));
        }
        let issued_for = K::parse(sort_key)
            .map_err(|_| invalid(format!("unknown sort key {sort_key}")))?;
        if issued_for != self.sort_key {
            return Err(invalid(format!(
                "cursor was issued for sort key {sort_key}, not {}",
                self.sort_key.name()
            )));
        }
        if OrderDirection::from_name(direction) != Some(self.direction) {
            return Err(invalid(format!(
                "cursor was issued for {direction} order, not {}",
                self.direction.as_str()
            )));
        }
        if *context != self.context {
            return Err(invalid("cursor was issued for another collection or search"));
        }

        id.parse::<EntityId>()
            .map_err(|_| invalid("malformed cursor"))
    }
}

fn invalid(reason: impl Into<String>) -> PaginationError {
    PaginationError::InvalidCursor(reason.into())
}
