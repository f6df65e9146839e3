//! Prometheus scrape handler

use crate::{ApiError, AppState, HttpMetrics};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// GET /metrics - Text exposition of request metrics
pub async fn render_metrics(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::Internal(format!("Failed to encode metrics: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, HttpMetrics::CONTENT_TYPE)], body).into_response())
}
