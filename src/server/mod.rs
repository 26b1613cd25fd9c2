//! Public-facing web server.
//!
//! Serves the single-page UI at / and the JSON API the page drives:
//! POST /extract resolves a URL to its best progressive file,
//! GET /download relays that file as an attachment, and
//! POST /upload_cookies installs the cookies file yt-dlp authenticates
//! with.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::config;
use crate::core::error::AppError;
use crate::extract::{Orchestrator, YtdlpResolver};

pub mod relay;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator<YtdlpResolver>>,
    pub http: reqwest::Client,
    pub cookies_path: PathBuf,
}

impl AppState {
    pub fn new() -> Result<Self, AppError> {
        let cookies_path = PathBuf::from(config::COOKIES_FILE.as_str());
        let http = reqwest::Client::builder()
            .connect_timeout(config::relay::connect_timeout())
            .build()?;

        Ok(Self {
            orchestrator: Arc::new(Orchestrator::new(
                YtdlpResolver::new(),
                Some(cookies_path.clone()),
            )),
            http,
            cookies_path,
        })
    }
}

/// Start the public web server.
pub async fn run_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let state = AppState::new()?;

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /               - UI");
    log::info!("  /extract        - POST {{url}} -> best progressive file");
    log::info!("  /download       - GET streaming relay");
    log::info!("  /upload_cookies - POST multipart cookies file");
    log::info!("  /health         - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/extract", post(extract_handler))
        .route("/download", get(relay::download_handler))
        .route("/upload_cookies", post(upload_cookies_handler))
        .with_state(state)
}

/// GET / - the embedded single-page UI.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// GET /health - simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    url: String,
}

/// POST /extract - resolves a URL into the uniform response shape.
///
/// 400 only for a missing/malformed URL. Extraction failures come back
/// as 200 with a `reason` so the UI renders a disabled state instead of
/// a failure page.
async fn extract_handler(State(state): State<AppState>, Json(req): Json<ExtractRequest>) -> Response {
    match state.orchestrator.extract(&req.url).await {
        Ok(extraction) => Json(extraction).into_response(),
        Err(AppError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
        Err(err) => {
            log::error!("Unexpected extract error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
    }
}

/// POST /upload_cookies - replaces the cookies file wholesale.
///
/// Accepts the first uploaded file field; subsequent /extract calls
/// pick the new file up immediately. 400 when no file is present,
/// 500 when the file cannot be written.
async fn upload_cookies_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No file part in request" })),
                )
                    .into_response()
            }
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("Malformed upload: {}", e) })),
                )
                    .into_response()
            }
        };

        // Skip plain text fields; take the first real file upload.
        if field.file_name().is_none() && field.name() != Some("cookies") {
            continue;
        }

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("Failed to read upload: {}", e) })),
                )
                    .into_response()
            }
        };

        if data.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No file selected" })),
            )
                .into_response();
        }

        return match tokio::fs::write(&state.cookies_path, &data).await {
            Ok(()) => {
                log::info!(
                    "Cookies file updated: {} ({} bytes)",
                    state.cookies_path.display(),
                    data.len()
                );
                Json(json!({ "status": "ok" })).into_response()
            }
            Err(e) => {
                log::error!("Failed to save cookies file: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": format!("Failed to save cookies: {}", e) })),
                )
                    .into_response()
            }
        };
    }
}
