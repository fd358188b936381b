//! Integration tests for the web front-end
//!
//! These drive the router directly with a stub checker, covering upload
//! validation, result rendering and error panes.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use doccheck::models::{AiSuggestion, BlockKind, ErrorDetail, Paragraph, Run};
use doccheck::services::DOCX_MIME;
use doccheck::ui::web::{router, WebState};
use doccheck::{CheckError, CheckResult, DocumentChecker, DocumentFile, Locale};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "doccheck-test-boundary";

/// Returns a canned outcome and counts calls
struct StubChecker {
    outcome: fn() -> Result<CheckResult, CheckError>,
    calls: AtomicUsize,
}

impl StubChecker {
    fn new(outcome: fn() -> Result<CheckResult, CheckError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl DocumentChecker for StubChecker {
    async fn check(&self, file: &DocumentFile) -> Result<CheckResult, CheckError> {
        assert_eq!(file.name, "report.docx");
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }
}

fn flagged_result() -> Result<CheckResult, CheckError> {
    Ok(CheckResult {
        document_structure: vec![Paragraph {
            kind: BlockKind::Paragraph,
            text: "第1章".into(),
            style: Some("本文".into()),
            errors: vec![ErrorDetail::new("IndentError", "インデントが不正です")],
            runs: vec![
                Run {
                    text: "第".into(),
                    font: "MS明朝".into(),
                    errors: vec![],
                },
                Run {
                    text: "1".into(),
                    font: "Arial".into(),
                    errors: vec![ErrorDetail::new(
                        "FontError",
                        "フォントが 'Century' ではありません (現在: Arial)",
                    )],
                },
            ],
        }],
        ai_suggestions: vec![AiSuggestion {
            message: "日付の記載が見当たりません。".into(),
        }],
    })
}

fn unprocessable() -> Result<CheckResult, CheckError> {
    Err(CheckError::Rejected {
        status: 422,
        message: "ファイルが破損しているか、サーバーが解析できませんでした。".into(),
    })
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn docx_bytes() -> Vec<u8> {
    let mut bytes = b"PK\x03\x04".to_vec();
    bytes.extend_from_slice(b"[Content_Types].xml");
    bytes
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/check")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A `file` part with neither a filename nor a content type
fn bare_file_body(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn app(checker: Arc<StubChecker>) -> axum::Router {
    router(WebState::new(checker, Locale::Ja), 1024 * 1024)
}

#[tokio::test]
async fn test_index_page() {
    let response = app(StubChecker::new(flagged_result))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>自動書類チェッカー</h1>"));
    assert!(html.contains("ドキュメントをチェック"));
    assert!(html.contains(r#"src="/static/app.js""#));
}

#[tokio::test]
async fn test_static_assets() {
    let app = app(StubChecker::new(flagged_result));

    let js = app
        .clone()
        .oneshot(Request::get("/static/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(js.status(), StatusCode::OK);
    assert_eq!(
        js.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/javascript"
    );

    let css = app
        .oneshot(Request::get("/static/styles.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(css.headers().get(header::CONTENT_TYPE).unwrap(), "text/css");
}

#[tokio::test]
async fn test_health() {
    let response = app(StubChecker::new(flagged_result))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_check_renders_result() {
    let checker = StubChecker::new(flagged_result);
    let response = app(checker.clone())
        .oneshot(upload_request(multipart_body(
            "file",
            "report.docx",
            DOCX_MIME,
            &docx_bytes(),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("AIからの提案"));
    assert!(html.contains("日付の記載が見当たりません。"));
    assert!(html.contains(r#"<span class="run-text">1</span>"#));
    assert!(html.contains("フォントが &#39;Century&#39; ではありません (現在: Arial)"));
    assert!(html.contains(r#"<div class="paragraph flagged""#));
    assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_check_error_pane() {
    let checker = StubChecker::new(unprocessable);
    let response = app(checker.clone())
        .oneshot(upload_request(multipart_body(
            "file",
            "report.docx",
            DOCX_MIME,
            &docx_bytes(),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("<strong>エラー:</strong> ファイルが破損しているか、サーバーが解析できませんでした。"));
}

#[tokio::test]
async fn test_check_rejects_wrong_type_without_calling_api() {
    let checker = StubChecker::new(flagged_result);
    let response = app(checker.clone())
        .oneshot(upload_request(multipart_body(
            "file",
            "report.pdf",
            "application/pdf",
            b"%PDF-1.7",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains(".docx 形式のファイルを選択してください。"));
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_check_without_file_field() {
    let checker = StubChecker::new(flagged_result);
    let response = app(checker.clone())
        .oneshot(upload_request(multipart_body(
            "attachment",
            "report.docx",
            DOCX_MIME,
            &docx_bytes(),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("ファイルが選択されていません。"));
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_check_requires_multipart() {
    let response = app(StubChecker::new(flagged_result))
        .oneshot(
            Request::post("/check")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_rejects_oversized_upload() {
    let checker = StubChecker::new(flagged_result);
    let mut data = docx_bytes();
    data.resize(4096, b'x');

    let response = router(WebState::new(checker.clone(), Locale::Ja), 64)
        .oneshot(upload_request(multipart_body(
            "file",
            "report.docx",
            DOCX_MIME,
            &data,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let html = body_text(response).await;
    assert!(html.contains("<strong>エラー:</strong> ファイルサイズが上限を超えています。"));
    assert!(!html.contains("failed to read stream"));
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oversized_upload_message_is_localized() {
    let checker = StubChecker::new(flagged_result);
    let mut data = docx_bytes();
    data.resize(4096, b'x');

    let response = router(WebState::new(checker, Locale::En), 64)
        .oneshot(upload_request(multipart_body(
            "file",
            "report.docx",
            DOCX_MIME,
            &data,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let html = body_text(response).await;
    assert!(html.contains("<strong>Error:</strong> The file exceeds the upload size limit."));
}

#[tokio::test]
async fn test_check_rejects_file_without_name_or_type() {
    let checker = StubChecker::new(flagged_result);
    let response = app(checker.clone())
        .oneshot(upload_request(bare_file_body(&docx_bytes())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains(".docx 形式のファイルを選択してください。"));
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}
