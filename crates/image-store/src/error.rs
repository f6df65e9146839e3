//! Error types for the image-store crate

use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during object storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Object not found
    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    /// Bucket does not exist
    #[error("bucket does not exist: {0}")]
    NoSuchBucket(String),

    /// The store answered with an error
    #[error("storage service error: {0}")]
    Service(String),

    /// The store could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// Client configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Whether this error means the requested object is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound { .. })
    }
}
