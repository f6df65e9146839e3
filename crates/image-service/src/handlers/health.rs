//! Liveness and readiness handlers

use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use image_store::ObjectStore;
use serde_json::json;
use std::sync::Arc;

/// Name reported by `GET /health`
pub const SERVICE_NAME: &str = "image-service";

/// GET /health - Basic health check
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

/// GET /health/live - Process is up
pub async fn health_live() -> impl IntoResponse {
    Json(json!({ "status": "live" }))
}

/// GET /health/ready - Probe the bucket on every call
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let bucket = state.bucket();
    let failure = match state.store.bucket_exists(bucket).await {
        Ok(true) => return Json(json!({ "status": "ready" })).into_response(),
        Ok(false) => format!("bucket does not exist: {}", bucket),
        Err(e) => e.to_string(),
    };

    tracing::warn!(bucket = %bucket, error = %failure, "Readiness probe failed");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": "not-ready", "error": failure })),
    )
        .into_response()
}
