use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::{DirEntry, WalkDir};

use crate::icons::library::{IconDescriptor, IconLibrary};
use crate::icons::markup::is_icon_markup;

/// Source extension of icon components.
pub const ICON_EXTENSION: &str = "vue";

/// Directory names that are never descended into: dependency caches,
/// version-control metadata and build output.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "build",
    "target",
    ".nuxt",
    ".output",
    ".cache",
    "coverage",
];

/// Scan every root depth-first and return the discovered icons.
///
/// Relative roots resolve against the current working directory. Missing or
/// unreadable roots, directories and files contribute nothing; the scan
/// itself never fails. Entries are visited in file-name order, and when two
/// files derive the same name the first one visited wins.
pub fn scan(roots: &[PathBuf]) -> IconLibrary {
    let start = Instant::now();
    let mut found = Vec::new();

    for root in roots {
        let root = match std::fs::canonicalize(root) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Icon path unavailable, skipping: {} ({})", root.display(), e);
                continue;
            }
        };
        let walker = WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry));
        for entry in walker {
            match entry {
                Err(e) => tracing::debug!("Cannot access entry: {}", e),
                Ok(entry) if entry.file_type().is_file() => {
                    if let Some(icon) = process_file(entry.path()) {
                        found.push(icon);
                    }
                }
                Ok(_) => {}
            }
        }
    }

    let library = IconLibrary::from_descriptors(found);
    tracing::info!(
        "Found {} icons in {} path(s) in {:.1}s",
        library.len(),
        roots.len(),
        start.elapsed().as_secs_f64()
    );
    library
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn process_file(path: &Path) -> Option<IconDescriptor> {
    if !is_icon_source(path) {
        return None;
    }
    let name = icon_name(path)?;
    let canonical = match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("Cannot canonicalize {}: {}", path.display(), e);
            return None;
        }
    };
    // Descriptors are served as JSON strings; a path that cannot be one is dropped here.
    if canonical.to_str().is_none() {
        tracing::debug!("Skipping {}: path is not valid UTF-8", canonical.display());
        return None;
    }
    tracing::debug!("icon {} -> {}", name, canonical.display());
    Some(IconDescriptor::new(name, canonical))
}

/// True for a `.vue` file whose template block contains an `<svg>` tag.
/// Unreadable files are treated as "not an icon".
pub fn is_icon_source(path: &Path) -> bool {
    if path.extension().and_then(|e| e.to_str()) != Some(ICON_EXTENSION) {
        return false;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => is_icon_markup(&content),
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", path.display(), e);
            false
        }
    }
}

/// File base name with the `.vue` extension stripped.
pub fn icon_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
}
