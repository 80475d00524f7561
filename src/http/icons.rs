use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::{not_found, state::AppState};
use crate::icons::{markup::extract_svg, IconDescriptor};

pub const ICON_NOT_FOUND: &str = "Icon not found";
pub const SVG_NOT_FOUND: &str = "SVG not found";

/// GET /api/icons: every captured icon as `{ "name", "path" }`, in library order.
pub async fn list_icons(State(state): State<AppState>) -> Json<Vec<IconDescriptor>> {
    Json(state.library.items().to_vec())
}

/// GET /api/icon/{name}: re-read the component and return its first `<svg>` element.
pub async fn serve_icon(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Response {
    let Ok(Path(name)) = name else {
        return not_found(ICON_NOT_FOUND);
    };
    let Some(icon) = state.library.get(&name) else {
        tracing::debug!("unknown icon requested: {}", name);
        return not_found(ICON_NOT_FOUND);
    };

    let content = match tokio::fs::read_to_string(&icon.path).await {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("Failed to read icon {}: {}", icon.path.display(), e);
            return not_found(ICON_NOT_FOUND);
        }
    };

    match extract_svg(&content) {
        Some(svg) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            svg.to_owned(),
        )
            .into_response(),
        None => not_found(SVG_NOT_FOUND),
    }
}
