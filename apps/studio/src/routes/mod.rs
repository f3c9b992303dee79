pub mod health;
pub mod key;
pub mod preview;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/preview", get(preview::preview_handler))
        // Document + editors
        .route("/api/v1/resume", get(editor::handle_get_resume))
        .route("/api/v1/resume/personal", put(editor::handle_put_personal))
        .route("/api/v1/editors/:section", get(editor::handle_get_editor))
        .route("/api/v1/editors/:section/draft", put(editor::handle_put_draft))
        .route("/api/v1/editors/:section/save", post(editor::handle_save))
        .route("/api/v1/editors/:section/edit/:id", post(editor::handle_edit))
        .route("/api/v1/editors/:section/cancel", post(editor::handle_cancel))
        .route(
            "/api/v1/editors/:section/current",
            post(editor::handle_set_current),
        )
        .route("/api/v1/editors/:section/:id", delete(editor::handle_delete))
        // Key store
        .route(
            "/api/v1/key",
            get(key::handle_key_status).put(key::handle_set_key),
        )
        // Analysis
        .route(
            "/api/v1/analysis/grammar-ats",
            post(analysis::handle_grammar_ats),
        )
        .route("/api/v1/analysis/score", post(analysis::handle_score))
        // Export
        .route("/api/v1/export", post(export::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use crate::analysis::client::tests::{CannedGenerator, GRAMMAR_ATS_BODY};
    use crate::config::{Config, DEFAULT_GROQ_API_URL, DEFAULT_GROQ_MODEL};
    use crate::export::raster::tests::SolidRasterizer;
    use crate::export::raster::CaptureOptions;
    use crate::keystore::KeyStore;
    use crate::session::Session;

    fn state(key: Option<&str>) -> AppState {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            groq_api_key: None,
            chrome_bin: "chromium".to_string(),
            capture_viewport_height: 4000,
        };
        AppState {
            session: Arc::new(RwLock::new(Session::new(KeyStore::new(
                key.map(str::to_string),
            )))),
            generator: Arc::new(CannedGenerator::replying(GRAMMAR_ATS_BODY)),
            rasterizer: Arc::new(SolidRasterizer {
                width: 300,
                height: 600,
            }),
            capture: CaptureOptions::new(config.capture_viewport_height),
            config,
        }
    }

    fn app(key: Option<&str>) -> Router {
        build_router(state(key))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    fn json_of(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_experience_add_edit_delete_flow() {
        let app = app(None);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/editors/experience/draft",
            Some(json!({
                "title": "Engineer",
                "company": "Acme",
                "start_date": "2021-03",
                "end_date": "2022-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(
            &app,
            "POST",
            "/api/v1/editors/experience/current",
            Some(json!({ "current": true })),
        )
        .await;
        let view = json_of(&body);
        assert_eq!(view["draft"]["current"], true);
        assert_eq!(view["draft"]["end_date"], "");

        let (status, body) = send(&app, "POST", "/api/v1/editors/experience/save", None).await;
        assert_eq!(status, StatusCode::OK);
        let saved = json_of(&body);
        let id = saved["id"].as_str().unwrap().to_string();
        assert_eq!(saved["resume"]["experiences"][0]["id"], id.as_str());

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/editors/experience/edit/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        send(
            &app,
            "PUT",
            "/api/v1/editors/experience/draft",
            Some(json!({ "title": "Senior Engineer", "company": "Acme", "current": true })),
        )
        .await;
        let (_, body) = send(&app, "POST", "/api/v1/editors/experience/save", None).await;
        let saved = json_of(&body);
        assert_eq!(saved["id"], id.as_str());
        assert_eq!(saved["resume"]["experiences"].as_array().unwrap().len(), 1);
        assert_eq!(saved["resume"]["experiences"][0]["title"], "Senior Engineer");

        for _ in 0..2 {
            let (status, _) = send(
                &app,
                "DELETE",
                &format!("/api/v1/editors/experience/{id}"),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::NO_CONTENT);
        }
        let (_, body) = send(&app, "GET", "/api/v1/resume", None).await;
        assert!(json_of(&body)["experiences"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_unknown_id_is_not_found() {
        let app = app(None);
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/editors/skills/edit/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_current_flag_rejected_for_skills() {
        let app = app(None);
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/editors/skills/current",
            Some(json!({ "current": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analysis_without_key_is_rejected() {
        let app = app(None);
        let (status, body) = send(&app, "POST", "/api/v1/analysis/grammar-ats", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_of(&body)["error"]["message"],
            "Failed to analyze resume. Please try again."
        );
    }

    #[tokio::test]
    async fn test_analysis_with_key_returns_report() {
        let app = app(Some("gsk_test"));
        let (status, body) = send(&app, "POST", "/api/v1/analysis/grammar-ats", None).await;
        assert_eq!(status, StatusCode::OK);
        let report = json_of(&body);
        assert_eq!(report["grammar"]["score"], 8);
        assert_eq!(report["ats"]["keywords"][0], "Rust");
    }

    #[tokio::test]
    async fn test_score_with_wrong_shape_maps_to_bad_gateway() {
        // The canned backend answers with the grammar/ATS shape, which is not a score.
        let app = app(Some("gsk_test"));
        let (status, body) = send(&app, "POST", "/api/v1/analysis/score", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_of(&body)["error"]["message"],
            "Failed to score resume. Please try again."
        );
    }

    #[tokio::test]
    async fn test_key_status_never_returns_key() {
        let app = app(None);
        let (status, _) = send(&app, "PUT", "/api/v1/key", Some(json!({ "key": "gsk_secret" }))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", "/api/v1/key", None).await;
        assert!(!String::from_utf8_lossy(&body).contains("gsk_secret"));
        assert_eq!(json_of(&body)["configured"], true);
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let app = app(None);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/export")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "file_name": "ada" }).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ada.pdf\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_unknown_element_is_no_content() {
        let app = app(None);
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/export",
            Some(json!({ "element_id": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_preview_reflects_personal_info() {
        let app = app(None);
        send(
            &app,
            "PUT",
            "/api/v1/resume/personal",
            Some(json!({ "full_name": "Ada Lovelace", "title": "Engineer" })),
        )
        .await;
        let (status, body) = send(&app, "GET", "/preview", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&body).contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_editor_view_only_needs_read_access() {
        let state = state(None);
        let app = build_router(state.clone());
        let _reader = state.session.read().await;

        let outcome = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            send(&app, "GET", "/api/v1/editors/skills", None),
        )
        .await;
        let (status, body) = outcome.expect("editor view waited on the session lock");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["editing"], false);
    }

    #[tokio::test]
    async fn test_export_without_body_uses_defaults() {
        let app = app(None);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/export")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
    }
}
