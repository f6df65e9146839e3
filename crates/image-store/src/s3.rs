//! S3-compatible object store backed by `aws-sdk-s3`
//!
//! Works against AWS S3 as well as MinIO and other S3-compatible endpoints.
//! The SDK's retry layer is disabled: a failed call is reported to the
//! caller as-is.

use crate::{ObjectMetadata, ObjectStore, Result, StoreError, DEFAULT_CONTENT_TYPE};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Connection parameters for an S3-compatible endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct S3Config {
    /// Endpoint URL, e.g. `http://minio:9000`
    pub endpoint: String,
    /// Access key id
    pub access_key: String,
    /// Secret access key
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Signing region
    pub region: String,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    pub force_path_style: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: "http://minio.prod-storage.svc.cluster.local:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            region: "us-east-1".to_string(),
            force_path_style: true,
        }
    }
}

/// Object store talking to an S3-compatible service
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
    endpoint: String,
}

impl S3ObjectStore {
    /// Build a client from static credentials
    pub fn new(config: S3Config) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(StoreError::Configuration("S3 endpoint must not be empty".into()));
        }

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "static",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .force_path_style(config.force_path_style)
            .retry_config(RetryConfig::disabled())
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            endpoint: config.endpoint,
        })
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map an SDK failure onto `StoreError`, keeping the full error chain in the message
fn classify<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => StoreError::Connection(message),
        SdkError::ConstructionFailure(_) => StoreError::Configuration(message),
        _ => StoreError::Service(message),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, data))]
    async fn upload(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(classify)?;

        debug!("Object stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_metadata(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        let response = match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(response) => response,
            Err(SdkError::ServiceError(e)) if e.err().is_not_found() => {
                return Err(StoreError::ObjectNotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                });
            }
            Err(e) => return Err(classify(e)),
        };

        Ok(ObjectMetadata {
            key: key.to_string(),
            size: response.content_length().unwrap_or(0).max(0) as u64,
            content_type: response
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string(),
        })
    }

    #[instrument(skip(self))]
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(e)) if e.err().is_not_found() => Ok(false),
            Err(e) => Err(classify(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn unreachable_config() -> S3Config {
        // Port 1 on loopback refuses connections immediately
        S3Config {
            endpoint: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = S3Config::default();
        assert_eq!(config.endpoint, "http://minio.prod-storage.svc.cluster.local:9000");
        assert_eq!(config.access_key, "minioadmin");
        assert_eq!(config.region, "us-east-1");
        assert!(config.force_path_style);
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let config = S3Config {
            endpoint: String::new(),
            ..Default::default()
        };
        assert!(matches!(S3ObjectStore::new(config), Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_surfaces_error() {
        let store = S3ObjectStore::new(unreachable_config()).unwrap();
        assert_eq!(store.endpoint(), "http://127.0.0.1:1");

        let err = store.bucket_exists("images").await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)), "unexpected error: {err:?}");

        let err = store.get_metadata("images", "uploads/a.png").await.unwrap_err();
        assert!(!err.is_not_found());
    }

    async fn fake_s3() -> (MockServer, S3ObjectStore) {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/images"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/locked"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/images/uploads/cat.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-length", "42")
                    .set_body_raw(vec![0u8; 42], "image/png"),
            )
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/images/uploads/untyped"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        // Anything else falls through to wiremock's default 404

        let store = S3ObjectStore::new(S3Config {
            endpoint: server.uri(),
            ..Default::default()
        })
        .unwrap();
        (server, store)
    }

    #[tokio::test]
    async fn test_head_object_maps_headers() {
        let (_server, store) = fake_s3().await;

        let metadata = store.get_metadata("images", "uploads/cat.png").await.unwrap();
        assert_eq!(metadata.key, "uploads/cat.png");
        assert_eq!(metadata.size, 42);
        assert_eq!(metadata.content_type, "image/png");

        let metadata = store.get_metadata("images", "uploads/untyped").await.unwrap();
        assert_eq!(metadata.size, 0);
        assert_eq!(metadata.content_type, DEFAULT_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_head_object_404_is_not_found() {
        let (_server, store) = fake_s3().await;

        let err = store.get_metadata("images", "uploads/missing.png").await.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err:?}");
        assert!(matches!(
            err,
            StoreError::ObjectNotFound { ref bucket, ref key }
                if bucket == "images" && key == "uploads/missing.png"
        ));
    }

    #[tokio::test]
    async fn test_head_bucket_status_mapping() {
        let (_server, store) = fake_s3().await;

        assert!(store.bucket_exists("images").await.unwrap());
        assert!(!store.bucket_exists("missing").await.unwrap());

        let err = store.bucket_exists("locked").await.unwrap_err();
        assert!(matches!(err, StoreError::Service(_)), "unexpected error: {err:?}");
        assert!(!err.is_not_found());
    }
}
