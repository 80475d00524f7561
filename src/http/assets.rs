use std::path::{Component, Path, PathBuf};

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::{mime::content_type_for, not_found, state::AppState};

pub const INDEX_FILE: &str = "index.html";
pub const NOT_FOUND: &str = "Not found";

/// GET /: the built gallery page, or 404 when the UI has not been built.
pub async fn serve_index(State(state): State<AppState>) -> Response {
    serve_file(&state.gallery_dir.join(INDEX_FILE)).await
}

/// Everything the API routes do not claim: a file under the gallery directory.
/// Methods other than GET/HEAD end up here too and always get 404.
pub async fn serve_asset(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return not_found(NOT_FOUND);
    }
    match resolve_asset_path(&state.gallery_dir, uri.path()) {
        Some(path) => serve_file(&path).await,
        None => not_found(NOT_FOUND),
    }
}

/// Map a request path onto `root`. The `?query` and `#fragment` parts are
/// dropped first, then each `/`-separated segment is percent-decoded on its
/// own. Returns `None` for an empty path, undecodable segments, or anything
/// that would leave `root` once decoded (`..`, separators, drive prefixes).
pub fn resolve_asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let path = request_path.split(['?', '#']).next().unwrap_or_default();
    let mut resolved = root.to_path_buf();
    let mut depth = 0usize;
    for segment in path.split('/') {
        let decoded = urlencoding::decode(segment).ok()?;
        if decoded.is_empty() || decoded == "." {
            continue;
        }
        if decoded.contains(['/', '\\', '\0']) {
            return None;
        }
        let mut components = Path::new(&*decoded).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => {
                resolved.push(part);
                depth += 1;
            }
            _ => return None,
        }
    }
    (depth > 0).then_some(resolved)
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(path))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::debug!("asset {} unavailable: {}", path.display(), e);
            not_found(NOT_FOUND)
        }
    }
}
