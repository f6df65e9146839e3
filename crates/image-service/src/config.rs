//! Service configuration

use image_store::S3Config;
use serde::{Deserialize, Serialize};

/// Image service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// S3-compatible endpoint URL
    pub s3_endpoint: String,
    /// S3 access key id
    pub s3_access_key: String,
    /// S3 secret access key
    #[serde(skip_serializing)]
    pub s3_secret_key: String,
    /// Bucket holding all uploaded images
    pub s3_bucket: String,
    /// Signing region
    pub region: String,
    /// Use in-memory storage (for testing/development)
    pub use_memory_store: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let s3 = S3Config::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            s3_endpoint: s3.endpoint,
            s3_access_key: s3.access_key,
            s3_secret_key: s3.secret_key,
            s3_bucket: "images".to_string(),
            region: s3.region,
            use_memory_store: false,
        }
    }
}

impl ServiceConfig {
    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection parameters for the object store client
    pub fn s3_config(&self) -> S3Config {
        S3Config {
            endpoint: self.s3_endpoint.clone(),
            access_key: self.s3_access_key.clone(),
            secret_key: self.s3_secret_key.clone(),
            region: self.region.clone(),
            force_path_style: true,
        }
    }
}
