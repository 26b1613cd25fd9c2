//! Download relay.
//!
//! Streams the chosen file's bytes through to the browser with
//! attachment headers so the download lands under a readable name.
//! Bytes are forwarded chunk by chunk as the upstream produces them;
//! the file is never buffered whole. If the client disconnects, the
//! response body is dropped and with it the upstream connection.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::core::validation::sanitize_title;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ext: String,
}

/// Composes the attachment filename from the user-supplied title and
/// extension. The extension is lower-cased and defaults to "mp4".
fn compose_filename(title: &str, ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    let ext = if ext.is_empty() { "mp4".to_string() } else { ext };
    format!("{}.{}", sanitize_title(title), ext)
}

/// GET /download?url=&title=&ext= - relays the remote file as an attachment.
///
/// 400 when `url` is missing; upstream fetch failures surface as 502.
/// Chunks already flushed to the client cannot be retracted if the
/// upstream errors mid-stream.
pub async fn download_handler(State(state): State<AppState>, Query(q): Query<DownloadQuery>) -> Response {
    let url = q.url.trim();
    if url.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing url").into_response();
    }

    let filename = compose_filename(&q.title, &q.ext);
    log::info!("Relaying download as {:?}", filename);

    let upstream = match state.http.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            log::warn!("Relay fetch failed: {}", e);
            return (StatusCode::BAD_GATEWAY, format!("Failed to fetch remote file: {}", e)).into_response();
        }
    };

    if !upstream.status().is_success() {
        log::warn!("Relay upstream returned {} for {}", upstream.status(), url);
        return (
            StatusCode::BAD_GATEWAY,
            format!("Remote server returned {}", upstream.status()),
        )
            .into_response();
    }

    // The origin's content type is irrelevant to a forced download; a
    // generic binary type keeps every browser on the attachment path.
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from_stream(upstream.bytes_stream()),
    )
        .into_response()
}
