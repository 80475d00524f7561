pub mod assets;
pub mod icons;
pub mod mime;
pub mod state;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(assets::serve_index).fallback(assets::serve_asset))
        .route("/api/icons", get(icons::list_icons).fallback(assets::serve_asset))
        .route("/api/icon/{name}", get(icons::serve_icon).fallback(assets::serve_asset))
        .fallback(assets::serve_asset)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::HEAD]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Plain-text 404 used for every lookup, read and parse failure.
pub(crate) fn not_found(message: &'static str) -> Response {
    (StatusCode::NOT_FOUND, message).into_response()
}
