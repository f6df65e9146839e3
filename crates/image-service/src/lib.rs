//! # Image Service
//!
//! HTTP service for storing images in an S3-compatible bucket.
//!
//! This crate provides:
//! - **Uploads**: multipart `file` uploads stored under `uploads/<filename>`
//! - **Metadata**: size and content type lookup for any key
//! - **Health**: liveness, and readiness backed by a bucket probe
//! - **Metrics**: Prometheus request counters and latency histograms
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   HTTP Clients                      │
//! └─────────────────────────┬───────────────────────────┘
//!                           │
//! ┌─────────────────────────▼───────────────────────────┐
//! │                   Image Service                     │
//! ├─────────────────────────────────────────────────────┤
//! │   Request ID  │  Metrics  │  Logging  │  Tracing    │
//! ├─────────────────────────────────────────────────────┤
//! │   /images   │   /health   │   /metrics              │
//! ├─────────────────────────────────────────────────────┤
//! │                   image-store                       │
//! │              (S3 or in-memory)                      │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use metrics::HttpMetrics;
pub use server::{run_server, run_server_with_shutdown, shutdown_signal};
pub use state::AppState;
