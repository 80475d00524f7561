use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

/// A single discovered icon component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconDescriptor {
    /// File base name with the `.vue` extension stripped, e.g. "arrow-left".
    pub name: String,
    /// Canonical absolute path, re-read on every `/api/icon/{name}` request.
    pub path: PathBuf,
}

impl IconDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Result of one scan: unique names, sorted for display.
/// Built once per server run and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct IconLibrary {
    items: Vec<IconDescriptor>,
}

impl IconLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from descriptors in discovery order.
    ///
    /// The first descriptor seen for a given name wins and later ones are
    /// dropped, so which file represents a duplicated name depends only on
    /// the order the caller discovered them in. The survivors are then
    /// sorted with [`compare_names`].
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = IconDescriptor>,
    {
        let mut seen = HashSet::new();
        let mut items: Vec<IconDescriptor> = descriptors
            .into_iter()
            .filter(|icon| {
                let first = seen.insert(icon.name.clone());
                if !first {
                    tracing::debug!("duplicate icon name {} dropped: {}", icon.name, icon.path.display());
                }
                first
            })
            .collect();
        items.sort_by(|a, b| compare_names(&a.name, &b.name));
        Self { items }
    }

    pub fn items(&self) -> &[IconDescriptor] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&IconDescriptor> {
        self.items.iter().find(|icon| icon.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|icon| icon.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Human-facing name ordering: case-folded text first, so "Bell" sorts
/// between "arrow" and "calendar". Names equal after folding put lowercase
/// before uppercase at the first differing letter ("arrow" < "Arrow"), and
/// raw text breaks any remaining tie so the order stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    let upper_a = a.chars().map(char::is_uppercase);
    let upper_b = b.chars().map(char::is_uppercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| upper_a.cmp(upper_b))
        .then_with(|| a.cmp(b))
}
