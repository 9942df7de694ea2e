//! Default opaque global ID codec.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{PaginationError, PaginationResult};
use crate::models::{EntityId, EntityKind};
use crate::ports::IdCodec;

const GID_PREFIX: &str = "gid://storefront/";

/// Encodes IDs as base64 of `gid://storefront/<Type>/<id>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalIdCodec;

impl IdCodec for GlobalIdCodec {
    fn encode(&self, kind: EntityKind, id: EntityId) -> String {
        STANDARD.encode(format!("{GID_PREFIX}{}/{id}", kind.type_name()))
    }

    fn decode(&self, value: &str) -> PaginationResult<(EntityKind, EntityId)> {
        let invalid = || PaginationError::InvalidId(value.to_string());

        let bytes = STANDARD.decode(value).map_err(|_| invalid())?;
        let plain = String::from_utf8(bytes).map_err(|_| invalid())?;

        let (type_name, id) = plain
            .strip_prefix(GID_PREFIX)
            .and_then(|rest| rest.split_once('/'))
            .ok_or_else(invalid)?;

        let kind = EntityKind::from_type_name(type_name).ok_or_else(invalid)?;
        let id = id.parse::<EntityId>().map_err(|_| invalid())?;
        Ok((kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let codec = GlobalIdCodec;
        let id = codec.encode(EntityKind::Variant, 17);
        assert_eq!(codec.decode(&id), Ok((EntityKind::Variant, 17)));
    }

    #[test]
    fn test_rejects_foreign_ids() {
        let codec = GlobalIdCodec;
        assert!(codec.decode("17").is_err());
        assert!(codec.decode(&STANDARD.encode("gid://other/Product/1")).is_err());
        assert!(codec.decode(&STANDARD.encode("gid://storefront/Order/1")).is_err());
        assert!(codec.decode(&STANDARD.encode("gid://storefront/Product/x")).is_err());
    }
}
