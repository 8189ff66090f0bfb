//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes sit at the root (no prefix); CORS is restricted to the local
//! frontend origins.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config;

/// Build the API router with CORS for the local frontend.
pub fn app_router(ctx: ApiContext) -> Router {
    let origins: Vec<HeaderValue> = config::ALLOWED_ORIGINS
        .iter()
        .map(|origin| HeaderValue::from_static(origin))
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/health", get(endpoints::health::check))
        .route("/parse-labs", post(endpoints::labs::parse))
        .route("/explain-labs", post(endpoints::labs::explain_text))
        .route("/explain-terms", post(endpoints::labs::terms))
        .route("/scan-image", post(endpoints::scans::scan_image))
        .route("/scans", get(endpoints::scans::list))
        .route("/scans/:id", get(endpoints::scans::detail))
        .route("/summarize", post(endpoints::summarize::text))
        .route("/summarize-file", post(endpoints::summarize::file))
        .with_state(ctx)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::LabKnowledge;
    use crate::extraction::{MockOcrEngine, OcrEngine};

    fn test_router(ocr: Arc<dyn OcrEngine>) -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(
            dir.path().join("mediscan.db"),
            Arc::new(LabKnowledge::bundled().unwrap()),
            ocr,
        );
        (app_router(ctx), dir)
    }

    fn mock_router(text: &str) -> (Router, tempfile::TempDir) {
        test_router(Arc::new(MockOcrEngine::returning(text)))
    }

    async fn response_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const BOUNDARY: &str = "test-boundary";

    fn multipart_request(uri: &str, file_content_type: &str, payload: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"scan.png\"\r\n\
             Content-Type: {file_content_type}\r\n\r\n\
             {payload}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn root_reports_running() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = response_json(resp).await;
        assert_eq!(json["status"], "MediScan running");
    }

    #[tokio::test]
    async fn health_carries_app_and_version() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = response_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["app"], "MediScan");
        assert_eq!(json["version"], config::APP_VERSION);
    }

    #[tokio::test]
    async fn parse_labs_classifies_text() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(json_request(
                "/parse-labs",
                serde_json::json!({ "text": "GLUCOSE 102 H 70-99\nWBC 8.2 4.0-10.5" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = response_json(resp).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["results"][0]["name"], "GLUCOSE");
        assert_eq!(json["results"][0]["status"], "high");
        assert_eq!(json["results"][1]["status"], "in_range");
    }

    #[tokio::test]
    async fn explain_labs_empty_text() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(json_request(
                "/explain-labs",
                serde_json::json!({ "text": "no labs in this note" }),
            ))
            .await
            .unwrap();
        let json = response_json(resp).await;
        assert_eq!(json["count"], 0);
        assert_eq!(
            json["overall_summary"],
            "No lab results were detected in the text."
        );
    }

    #[tokio::test]
    async fn explain_terms_expands_abbreviations() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(json_request(
                "/explain-terms",
                serde_json::json!({ "text": "Dx: HTN, on meds BID" }),
            ))
            .await
            .unwrap();
        let json = response_json(resp).await;
        assert_eq!(json["count"], 3);
        assert_eq!(json["terms"]["HTN"], "Hypertension (high blood pressure)");
    }

    #[tokio::test]
    async fn scan_image_rejects_non_image() {
        let (app, _dir) = mock_router("GLUCOSE 102 H 70-99");
        let resp = app
            .oneshot(multipart_request("/scan-image", "text/plain", "hello"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = response_json(resp).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("text/plain"));
    }

    #[tokio::test]
    async fn scan_image_persists_and_lists() {
        let (app, _dir) = mock_router("GLUCOSE 102 H 70-99\nA1C 6.1 (H)");

        let resp = app
            .clone()
            .oneshot(multipart_request("/scan-image", "image/png", "fakebytes"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = response_json(resp).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["scan_id"], 1);
        assert!(json["ocr_text_preview"]
            .as_str()
            .unwrap()
            .contains("GLUCOSE"));

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/scans")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = response_json(resp).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["results"][0]["filename"], "scan.png");
        assert!(json["results"][0]["overall_summary"]
            .as_str()
            .unwrap()
            .starts_with("Summary:"));

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/scans/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = response_json(resp).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["content_type"], "image/png");
        assert_eq!(json["count"], 2);
        assert!(json["items"].is_array());
    }

    #[tokio::test]
    async fn scan_image_reports_ocr_failure() {
        let (app, _dir) = test_router(Arc::new(MockOcrEngine::failing()));
        let resp = app
            .oneshot(multipart_request("/scan-image", "image/png", "fakebytes"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(resp).await;
        assert_eq!(json["error"]["code"], "OCR_FAILED");
    }

    #[tokio::test]
    async fn unknown_scan_is_404() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/scans/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = response_json(resp).await;
        assert_eq!(json["error"]["message"], "Scan not found.");
    }

    #[tokio::test]
    async fn summarize_returns_placeholder_payload() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(json_request(
                "/summarize",
                serde_json::json!({ "text": "First line.\nSecond line." }),
            ))
            .await
            .unwrap();
        let json = response_json(resp).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["summary"], "First line. Second line.");
        assert_eq!(json["safety"]["diagnosis_allowed"], false);
    }

    #[tokio::test]
    async fn summarize_file_decodes_upload() {
        let (app, _dir) = mock_router("");
        let resp = app
            .oneshot(multipart_request(
                "/summarize-file",
                "text/plain",
                "Visit notes.\nFollow up in two weeks.",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = response_json(resp).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["summary"], "Visit notes. Follow up in two weeks.");
    }
}
