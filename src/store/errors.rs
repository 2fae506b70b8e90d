//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a record store.
///
/// None of these are retried; the HTTP layer maps all of them to a
/// generic server error.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store cannot serve requests (poisoned lock, closed backend)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed
    #[error("Store I/O error: {0}")]
    Io(String),

    /// The backing file does not hold a JSON array of items
    #[error("Store data corrupt: {0}")]
    Corrupt(String),

    /// An item passed to `put` has no string `id` key
    #[error("Item rejected by store: {0}")]
    InvalidItem(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let err: StoreError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert!(matches!(err, StoreError::Io(ref m) if m.contains("disk gone")));
        assert_eq!(err.to_string(), "Store I/O error: disk gone");
    }
}
