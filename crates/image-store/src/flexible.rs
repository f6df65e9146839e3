//! Runtime-selected object store

use crate::{MemoryObjectStore, ObjectMetadata, ObjectStore, Result, S3Config, S3ObjectStore};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// Object store that can be either S3 or in-memory
pub enum FlexibleObjectStore {
    /// S3-compatible endpoint
    S3(S3ObjectStore),
    /// In-memory storage (development and tests)
    Memory(MemoryObjectStore),
}

impl FlexibleObjectStore {
    /// Connect to S3 with the given parameters
    pub fn s3(config: S3Config) -> Result<Self> {
        let store = S3ObjectStore::new(config)?;
        debug!(endpoint = %store.endpoint(), "Using S3 object store");
        Ok(Self::S3(store))
    }

    /// In-memory store with `bucket` already created
    pub fn memory(bucket: &str) -> Self {
        debug!(bucket = %bucket, "Using in-memory object store");
        Self::Memory(MemoryObjectStore::with_bucket(bucket))
    }

    /// Check if using real S3 or the memory fallback
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::S3(_))
    }
}

#[async_trait]
impl ObjectStore for FlexibleObjectStore {
    async fn upload(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        match self {
            Self::S3(store) => store.upload(bucket, key, data, content_type).await,
            Self::Memory(store) => store.upload(bucket, key, data, content_type).await,
        }
    }

    async fn get_metadata(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        match self {
            Self::S3(store) => store.get_metadata(bucket, key).await,
            Self::Memory(store) => store.get_metadata(bucket, key).await,
        }
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self {
            Self::S3(store) => store.bucket_exists(bucket).await,
            Self::Memory(store) => store.bucket_exists(bucket).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_variant_delegates() {
        let store = FlexibleObjectStore::memory("images");
        assert!(!store.is_persistent());
        assert!(store.bucket_exists("images").await.unwrap());

        store
            .upload("images", "uploads/x.txt", Bytes::from_static(b"x"), "text/plain")
            .await
            .unwrap();
        let meta = store.get_metadata("images", "uploads/x.txt").await.unwrap();
        assert_eq!(meta.size, 1);
    }

    #[tokio::test]
    async fn test_s3_variant_is_persistent() {
        let store = FlexibleObjectStore::s3(S3Config::default()).unwrap();
        assert!(store.is_persistent());
    }
}
