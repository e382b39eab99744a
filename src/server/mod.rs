//! HTTP ingestion surface.
//!
//! A thin axum app exposing the upload pipeline at `POST /api/upload`
//! with permissive CORS, so browser-based uploaders can talk to it
//! directly.

mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::services::TemplateUploader;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub uploader: Arc<TemplateUploader>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::any());

    Router::new()
        .route(
            "/api/upload",
            post(handlers::upload)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP server bound to a configured address.
pub struct HttpServer {
    bind: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(bind: impl Into<String>, uploader: Arc<TemplateUploader>) -> Self {
        Self {
            bind: bind.into(),
            state: AppState { uploader },
        }
    }

    /// Bind and serve until the surrounding task is cancelled.
    pub async fn run(self) -> Result<(), AppError> {
        let listener = TcpListener::bind(&self.bind)
            .await
            .map_err(|e| AppError::Server(format!("failed to bind {}: {}", self.bind, e)))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(e.to_string()))?;
        info!(%addr, "upload endpoint listening");

        axum::serve(listener, router(self.state))
            .await
            .map_err(|e| AppError::Server(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::error::{EmbeddingError, VectorIndexError};
    use crate::models::UploadRecord;
    use crate::services::{EmbeddingProvider, IndexStats, VectorIndex};

    struct FakeEmbeddings {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for FakeEmbeddings {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if self.fail {
                return Err(EmbeddingError::ProviderError("quota exceeded".to_string()));
            }
            Ok(vec![text.len() as f32; 4])
        }

        fn model(&self) -> &str {
            "fake-embedding"
        }
    }

    struct NullIndex;

    #[async_trait]
    impl VectorIndex for NullIndex {
        async fn health_check(&self) -> Result<bool, VectorIndexError> {
            Ok(true)
        }

        async fn ensure_ready(&self) -> Result<(), VectorIndexError> {
            Ok(())
        }

        async fn upsert(&self, _records: Vec<UploadRecord>) -> Result<(), VectorIndexError> {
            Ok(())
        }

        async fn stats(&self) -> Result<IndexStats, VectorIndexError> {
            Ok(IndexStats { total_records: 2 })
        }

        fn name(&self) -> &str {
            "templatesdb"
        }
    }

    fn test_router(fail_embeddings: bool) -> Router {
        let uploader = TemplateUploader::new(
            Arc::new(FakeEmbeddings {
                fail: fail_embeddings,
            }),
            Arc::new(NullIndex),
            0,
        );
        router(AppState {
            uploader: Arc::new(uploader),
        })
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    const DOC: &str = "\"Welcome\"\nTemplate:\nHello [there](https://example.com)!\n\n\"Bye\"\nTemplate:\nSee you\n";

    #[tokio::test]
    async fn test_upload_round_trip() {
        let app = test_router(false);
        let request = post_json(json!({ "fileContent": DOC, "fileName": "greetings.md" }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["uploaded"], 2);
        assert_eq!(body["message"], "Uploaded 2 templates in markdown format");
        assert_eq!(body["format"], "markdown");
        assert_eq!(body["totalVectors"], 2);
        assert_eq!(body["results"][0]["index"], 1);
        assert_eq!(body["results"][0]["title"], "Welcome");
        assert_eq!(body["results"][0]["hyperlink_count"], 1);
        assert_eq!(body["results"][1]["index"], 2);
        let id = body["results"][0]["id"].as_str().unwrap();
        assert!(id.starts_with("template_"));
        assert!(!body["timestamp"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_accepts_base64_body() {
        let app = test_router(false);
        let encoded = BASE64.encode(DOC.as_bytes());
        let request = post_json(json!({ "fileBase64": encoded }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["uploaded"], 2);
    }

    #[tokio::test]
    async fn test_rejects_both_content_fields() {
        let app = test_router(false);
        let request = post_json(json!({ "fileContent": DOC, "fileBase64": "aGk=" }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("not both"));
    }

    #[tokio::test]
    async fn test_no_content_provided() {
        let app = test_router(false);
        let request = post_json(json!({}));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "No content provided");
    }

    #[tokio::test]
    async fn test_no_templates_found() {
        let app = test_router(false);
        let request = post_json(json!({ "fileContent": "plain prose, no titles" }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "No templates found");
    }

    #[tokio::test]
    async fn test_invalid_base64_is_rejected() {
        let app = test_router(false);
        let request = post_json(json!({ "fileBase64": "%%% not base64 %%%" }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = test_router(false);
        let request = Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let app = test_router(false);
        let request = Request::builder()
            .method("GET")
            .uri("/api/upload")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_options_acknowledged() {
        let app = test_router(false);
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/upload")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let app = test_router(false);
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/upload")
            .header("origin", "https://editor.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let allow_origin = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok());
        assert_eq!(allow_origin, Some("*"));
    }

    #[tokio::test]
    async fn test_cors_header_on_post_response() {
        let app = test_router(false);
        let mut request = post_json(json!({ "fileContent": DOC }));
        request
            .headers_mut()
            .insert("origin", "https://editor.example.com".parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let allow_origin = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok());
        assert_eq!(allow_origin, Some("*"));
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_500() {
        let app = test_router(true);
        let request = post_json(json!({ "fileContent": DOC }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_router(false);
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["index"], "templatesdb");
    }
}
