pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interviews::handlers as interview_handlers;
use crate::report::handlers as report_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Report API
        .route("/api/v1/reports", post(report_handlers::handle_generate_report))
        .route(
            "/api/v1/reports/extract-tools",
            post(report_handlers::handle_extract_tools),
        )
        .route("/api/v1/reports/:id", get(report_handlers::handle_get_report))
        // Interview API
        .route(
            "/api/v1/interviews",
            post(interview_handlers::handle_create_interview),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, InterviewConfig};
    use crate::llm_client::mock::MockGenerator;

    const BOUNDARY: &str = "ficha-test-boundary";

    fn app(output_dir: &std::path::Path, reply: &str) -> Router {
        let config = Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            report_output_dir: output_dir.to_path_buf(),
            provider_timeout: Duration::from_secs(5),
            interview: InterviewConfig::default(),
        };
        let state = AppState::new(&config, Arc::new(MockGenerator::replying(reply))).unwrap();
        build_router(state)
    }

    fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/v1/reports")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["service"], "ficha-api");
    }

    #[tokio::test]
    async fn test_extract_tools_preview() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(json_request(
                "/api/v1/reports/extract-tools",
                json!({"text": "Excel - 90%, Jira: 60%, AB%", "max": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["herramienta"], "Excel");
        assert_eq!(tools[0]["nivel"], "90%");
    }

    #[tokio::test]
    async fn test_extract_tools_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(json_request(
                "/api/v1/reports/extract-tools",
                json!({"text": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_then_fetch_report() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(
            dir.path(),
            r#"{"puesto": "Diseñadora", "nombre": "Lucía Gómez"}"#,
        );

        let response = app
            .clone()
            .oneshot(multipart(&[
                ("notes", None, "Muy buena entrevista.\nFigma - 80%"),
                ("cv", Some("cv.txt"), "Diseñadora UX con 5 años de experiencia"),
                ("basename", None, "ficha_lucia"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["report_id"], "ficha_lucia");
        assert_eq!(body["record"]["puesto"], "Diseñadora");
        assert_eq!(body["record"]["herramientas"][0]["herramienta"], "Figma");

        let response = app
            .oneshot(
                Request::get("/api/v1/reports/ficha_lucia")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let markdown = body_string(response).await;
        assert!(markdown.starts_with("# INFORME DE EVALUACIÓN PROFESIONAL"));
        assert!(markdown.contains("Lucía Gómez"));
    }

    #[tokio::test]
    async fn test_generate_requires_notes_or_cv() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(multipart(&[("notes", None, "  ")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_rejects_unsafe_basename() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(multipart(&[
                ("notes", None, "notas"),
                ("basename", None, "../escape"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(
                Request::get("/api/v1/reports/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_interview_without_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), "{}")
            .oneshot(json_request(
                "/api/v1/interviews",
                json!({"email": "ana@example.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["success"], false);
    }
}
