//! HTTP route definitions

use crate::{handlers, middleware, AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Images
        .route(
            "/images/upload",
            post(handlers::upload_image).get(handlers::get_upload_image),
        )
        .route("/images/{*image_id}", get(handlers::get_image))

        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_live))
        .route("/health/ready", get(handlers::health_ready))

        // Prometheus scrape
        .route("/metrics", get(handlers::render_metrics))

        // Apply middleware
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::metrics_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceConfig;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use image_store::FlexibleObjectStore;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = ServiceConfig {
            use_memory_store: true,
            ..Default::default()
        };
        let state = AppState::with_store(config, FlexibleObjectStore::memory("images")).unwrap();
        create_router(Arc::new(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_live_carries_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(middleware::REQUEST_ID_HEADER));
        assert_eq!(body_json(response).await, serde_json::json!({ "status": "live" }));
    }

    #[tokio::test]
    async fn test_upload_without_multipart_body() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/images/upload")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, serde_json::json!({ "error": "No file provided" }));
    }

    #[tokio::test]
    async fn test_get_upload_path_is_a_key_lookup() {
        let response = app()
            .oneshot(Request::builder().uri("/images/upload").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, serde_json::json!({ "error": "Image not found" }));
    }

    #[tokio::test]
    async fn test_metrics_label_uses_decoded_path() {
        let app = app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/images/a%20b.png").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            crate::HttpMetrics::CONTENT_TYPE
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains(r#"endpoint="/images/a b.png""#), "{text}");
        assert!(!text.contains("a%20b.png"), "{text}");
    }
}
