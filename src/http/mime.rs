use std::path::Path;

/// Fallback for any extension not listed in [`content_type_for`].
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for a gallery asset, chosen by extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "map" => "application/json",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
