//! Shared helper functions for PostgreSQL row conversion.

use storefront_core::error::{StorageError, StorageResult};

/// Map a sqlx error into a query error.
pub fn query_error(e: sqlx::Error) -> StorageError {
    StorageError::QueryError(e.to_string())
}

/// Reject blank values for columns the API exposes as non-empty.
///
/// A blank title or handle indicates corrupt data rather than an empty value.
pub fn require_text(value: String, field_name: &str) -> StorageResult<String> {
    if value.trim().is_empty() {
        return Err(StorageError::SerializationError(format!(
            "{} is blank, which indicates data corruption",
            field_name
        )));
    }
    Ok(value)
}

/// Reject negative amounts (prices, counters).
pub fn require_non_negative(value: i64, field_name: &str) -> StorageResult<i64> {
    if value < 0 {
        return Err(StorageError::SerializationError(format!(
            "{} is negative: {}",
            field_name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: un titre vide indique une corruption de données
    #[test]
    fn test_blank_text_is_rejected() {
        let result = require_text("   ".into(), "products.title");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("products.title"));
        assert!(err.contains("corruption"));

        assert_eq!(require_text("Mug".into(), "products.title").unwrap(), "Mug");
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert!(require_non_negative(-1, "products.price_cents").is_err());
        assert_eq!(require_non_negative(0, "products.price_cents").unwrap(), 0);
    }
}
