//! Web front-end
//!
//! Serves the upload page and accepts `POST /check` uploads, which are
//! forwarded to the configured [`DocumentChecker`]. The response body is the
//! rendered result pane, so the page script only has to swap it in.

use crate::models::DocCheckConfig;
use crate::services::{DocumentChecker, DocumentFile, Locale, Message, Session};
use crate::ui::html::{render_page, render_state};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Datelike;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared across handlers. Read-only, so no lock is needed.
#[derive(Clone)]
pub struct WebState {
    checker: Arc<dyn DocumentChecker>,
    locale: Locale,
}

impl WebState {
    pub fn new(checker: Arc<dyn DocumentChecker>, locale: Locale) -> Self {
        Self { checker, locale }
    }
}

/// Build the router. Exposed separately from [`serve`] so it can be driven in tests.
pub fn router(state: WebState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/static/styles.css", get(serve_styles))
        .route("/static/app.js", get(serve_app_js))
        .route("/check", post(check_document))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web front-end until Ctrl+C
pub async fn serve(
    config: &DocCheckConfig,
    checker: Arc<dyn DocumentChecker>,
    open_browser: bool,
) -> anyhow::Result<()> {
    let app = router(
        WebState::new(checker, config.locale),
        config.server.max_upload_bytes,
    );

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    let url = format!("http://{}", listener.local_addr()?);

    println!("✓ Document checker running at {}", url);
    println!("  Forwarding uploads to {}", config.endpoint);
    println!("Press Ctrl+C to stop");
    info!(%url, endpoint = %config.endpoint, "web front-end started");

    if open_browser {
        open_in_browser(&url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            println!("\nShutting down...");
        })
        .await?;
    Ok(())
}

#[cfg(feature = "ui")]
fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        eprintln!("Failed to open browser: {}. Please open {} manually.", e, url);
    }
}

#[cfg(not(feature = "ui"))]
fn open_in_browser(url: &str) {
    eprintln!(
        "Opening a browser requires the 'ui' feature. Please open {} manually.",
        url
    );
}

async fn health_check() -> &'static str {
    "OK"
}

// ============================================================================
// Static handlers
// ============================================================================

async fn serve_index(State(state): State<WebState>) -> Html<String> {
    Html(render_page(state.locale, chrono::Local::now().year()))
}

async fn serve_styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_str!("assets/styles.css"),
    )
}

async fn serve_app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("assets/app.js"),
    )
}

// ============================================================================
// Check handler
// ============================================================================

async fn check_document(
    State(state): State<WebState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let locale = state.locale;
    let mut session = Session::new(locale);

    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await,
        Err(rejection) => {
            info!(error = %rejection, "rejected non-multipart upload");
            Err((StatusCode::BAD_REQUEST, Message::NoFileSelected))
        }
    };

    let file = match upload {
        Ok(Some(file)) => file,
        Ok(None) => {
            session.fail(Message::NoFileSelected.text(locale));
            return pane(StatusCode::BAD_REQUEST, render_state(session.view(), locale));
        }
        Err((status, message)) => {
            session.fail(message.text(locale));
            return pane(status, render_state(session.view(), locale));
        }
    };

    if let Err(e) = file.validate() {
        info!(file = %file.name, error = %e, "rejected upload");
        session.fail(e.user_message(locale));
        return pane(StatusCode::BAD_REQUEST, render_state(session.view(), locale));
    }

    session.select_file(Some(file));
    session.run(state.checker.as_ref()).await;

    let status = if session.error().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    pane(status, render_state(session.view(), locale))
}

/// Pull the `file` field out of the form. Other fields are ignored.
async fn read_upload(
    mut multipart: Multipart,
) -> Result<Option<DocumentFile>, (StatusCode, Message)> {
    loop {
        let field = multipart.next_field().await.map_err(upload_error)?;
        let Some(field) = field else {
            return Ok(None);
        };
        if field.name() != Some("file") {
            continue;
        }

        // No filename means no extension to derive a content type from
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;

        return Ok(Some(DocumentFile::from_upload(
            name,
            content_type.as_deref(),
            bytes.to_vec(),
        )));
    }
}

fn upload_error(e: MultipartError) -> (StatusCode, Message) {
    let status = e.status();
    info!(%status, error = %e, "failed to read upload");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        (status, Message::FileTooLarge)
    } else {
        (StatusCode::BAD_REQUEST, Message::NoFileSelected)
    }
}

fn pane(status: StatusCode, html: String) -> Response {
    (status, Html(html)).into_response()
}
