//! Static file server for the browser study pages.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Page served for the site root.
const INDEX_FILE: &str = "indexmemcard.html";

const ASSET_MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("txt", "text/plain; charset=utf-8"),
    ("tmp", "text/plain; charset=utf-8"),
    ("cfg", "text/plain; charset=utf-8"),
];

/// MIME type for an asset based on its extension.
fn asset_mime_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "application/octet-stream";
    };
    let ext = ext.to_lowercase();
    ASSET_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map_or("application/octet-stream", |(_, mime)| *mime)
}

/// Map a request path to a file under the site root.
///
/// Parent-directory segments and backslashes are rejected rather than
/// resolved. The bare root maps to the index page.
fn resolve_asset(site_root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let mut resolved = site_root.to_path_buf();
    let mut depth = 0usize;
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." || segment.contains('\\') {
            return None;
        }
        resolved.push(segment);
        depth += 1;
    }
    if depth == 0 {
        resolved.push(INDEX_FILE);
    }
    Some(resolved)
}

struct SiteState {
    site_root: PathBuf,
}

async fn serve_asset(State(state): State<Arc<SiteState>>, uri: Uri) -> Response {
    let Some(path) = resolve_asset(&state.site_root, uri.path()) else {
        return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, asset_mime_type(&path))], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Serve the study site over HTTP until the process is stopped.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails while
/// running.
pub async fn serve(site_root: PathBuf, port: u16) -> std::io::Result<()> {
    let state = Arc::new(SiteState { site_root });

    let app = Router::new()
        .fallback(serve_asset)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
