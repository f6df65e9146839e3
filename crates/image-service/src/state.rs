//! Application state

use crate::config::ServiceConfig;
use crate::metrics::HttpMetrics;
use image_store::FlexibleObjectStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    /// Service configuration
    pub config: ServiceConfig,
    /// Object store (S3 or memory)
    pub store: Arc<FlexibleObjectStore>,
    /// Request metrics
    pub metrics: HttpMetrics,
}

impl AppState {
    /// Create a new application state from configuration
    pub fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        let store = if config.use_memory_store {
            FlexibleObjectStore::memory(&config.s3_bucket)
        } else {
            FlexibleObjectStore::s3(config.s3_config())?
        };

        if store.is_persistent() {
            info!(bucket = %config.s3_bucket, "✓ Storage mode: S3 (persistent)");
        } else {
            warn!(bucket = %config.s3_bucket, "⚠ Storage mode: In-memory (NOT persistent - for development only)");
        }

        Self::with_store(config, store)
    }

    /// Create application state around an existing store
    pub fn with_store(config: ServiceConfig, store: FlexibleObjectStore) -> anyhow::Result<Self> {
        let metrics = HttpMetrics::new()
            .map_err(|e| anyhow::anyhow!("Failed to create request metrics: {}", e))?;

        Ok(Self {
            config,
            store: Arc::new(store),
            metrics,
        })
    }

    /// Bucket every request reads from and writes to
    pub fn bucket(&self) -> &str {
        &self.config.s3_bucket
    }
}
