//! In-memory object store for testing and development

use crate::{ObjectMetadata, ObjectStore, Result, StoreError};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::{DashMap, DashSet};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// An in-memory object store
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    buckets: Arc<DashSet<String>>,
    objects: Arc<DashMap<(String, String), StoredObject>>,
}

impl MemoryObjectStore {
    /// Create a new store with no buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one empty bucket
    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        let store = Self::new();
        store.create_bucket(bucket);
        store
    }

    /// Create a bucket; existing buckets are left untouched
    pub fn create_bucket(&self, bucket: impl Into<String>) {
        self.buckets.insert(bucket.into());
    }

    /// Get the number of objects stored across all buckets
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Read back the bytes of an object
    pub fn get_bytes(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| entry.value().data.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        if !self.buckets.contains(bucket) {
            return Err(StoreError::NoSuchBucket(bucket.to_string()));
        }
        self.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_metadata(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        if !self.buckets.contains(bucket) {
            return Err(StoreError::NoSuchBucket(bucket.to_string()));
        }
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| ObjectMetadata {
                key: key.to_string(),
                size: entry.value().data.len() as u64,
                content_type: entry.value().content_type.clone(),
            })
            .ok_or_else(|| StoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        Ok(self.buckets.contains(bucket))
    }
}
