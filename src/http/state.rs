use std::path::PathBuf;
use std::sync::Arc;

use crate::icons::IconLibrary;

/// Shared state injected into every route handler via `axum::extract::State`.
/// Both fields are captured when the server starts and stay read-only until it stops.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<IconLibrary>,
    /// Directory holding the built gallery UI (`index.html` and its assets).
    pub gallery_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(library: IconLibrary, gallery_dir: impl Into<PathBuf>) -> Self {
        Self {
            library: Arc::new(library),
            gallery_dir: Arc::new(gallery_dir.into()),
        }
    }
}
