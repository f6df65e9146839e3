//! # Image Store
//!
//! Object storage layer for the image service.
//!
//! This crate provides:
//! - **Object operations**: Upload, metadata lookup, and bucket probes
//! - **S3 backend**: Any S3-compatible endpoint (AWS, MinIO, R2)
//! - **Memory backend**: Process-local storage for tests and development
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            image-service                │
//! ├─────────────────────────────────────────┤
//! │           ObjectStore Trait             │
//! ├────────────────────┬────────────────────┤
//! │   S3ObjectStore    │ MemoryObjectStore  │
//! ├────────────────────┴────────────────────┤
//! │        S3-compatible endpoint           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use image_store::{ObjectStore, S3Config, S3ObjectStore};
//!
//! let store = S3ObjectStore::new(S3Config::default())?;
//! store.upload("images", "uploads/cat.png", data, "image/png").await?;
//! let meta = store.get_metadata("images", "uploads/cat.png").await?;
//! ```

pub mod error;
pub mod flexible;
pub mod memory;
pub mod s3;

pub use error::{Result, StoreError};
pub use flexible::FlexibleObjectStore;
pub use memory::MemoryObjectStore;
pub use s3::{S3Config, S3ObjectStore};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Content type S3 reports for objects stored without one
pub const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";

/// Metadata surfaced for a stored object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Object key within the bucket
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type recorded at upload time
    pub content_type: String,
}

/// Trait for object storage backends
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object
    async fn upload(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()>;

    /// Fetch size and content type without reading the object body
    async fn get_metadata(&self, bucket: &str, key: &str) -> Result<ObjectMetadata>;

    /// Check whether a bucket exists and is reachable
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;
}
