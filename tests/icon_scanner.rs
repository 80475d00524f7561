use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use icon_gallery::icons::library::{compare_names, IconDescriptor, IconLibrary};
use icon_gallery::icons::scanner::{icon_name, is_icon_source, scan};

const ICON: &str = "<template>\n  <svg viewBox=\"0 0 10 10\"><path d=\"M0 0h10v10z\"/></svg>\n</template>\n";
const NOT_AN_ICON: &str = "<template>\n  <div class=\"card\">hello</div>\n</template>\n";

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn names(library: &IconLibrary) -> Vec<&str> {
    library.names().collect()
}

// ── missing / empty roots ─────────────────────────────────────────────────────

#[test]
fn scan_nonexistent_path_returns_empty_library() {
    let paths = vec![PathBuf::from("/nonexistent/path/does/not/exist")];
    let library = scan(&paths);
    assert!(library.is_empty());
}

#[test]
fn scan_empty_paths_returns_empty_library() {
    let library = scan(&[]);
    assert_eq!(library.len(), 0);
}

#[test]
fn scan_missing_root_does_not_hide_other_roots() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "arrow.vue", ICON);
    let library = scan(&[PathBuf::from("/nonexistent/icons"), dir.path().to_path_buf()]);
    assert_eq!(names(&library), vec!["arrow"]);
}

// ── acceptance heuristic ──────────────────────────────────────────────────────

#[test]
fn vue_file_with_svg_in_template_is_included() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "check.vue", ICON);
    let library = scan(&[dir.path().to_path_buf()]);
    assert_eq!(library.len(), 1);
    let icon = &library.items()[0];
    assert_eq!(icon.name, "check");
    assert_eq!(icon.path, fs::canonicalize(path).unwrap());
    assert!(icon.path.is_absolute());
}

#[test]
fn vue_file_without_svg_is_excluded() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Card.vue", NOT_AN_ICON);
    assert!(scan(&[dir.path().to_path_buf()]).is_empty());
}

#[test]
fn vue_file_without_template_is_excluded() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "plain.vue", "<svg viewBox=\"0 0 1 1\"></svg>\n<script>export default {}</script>\n");
    assert!(scan(&[dir.path().to_path_buf()]).is_empty());
}

#[test]
fn svg_outside_template_does_not_count() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tricky.vue",
        "<template><div/></template>\n<script>const raw = '<svg></svg>'</script>\n",
    );
    assert!(scan(&[dir.path().to_path_buf()]).is_empty());
}

#[test]
fn non_vue_files_are_excluded_regardless_of_content() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "arrow.html", ICON);
    write(dir.path(), "arrow.svg", "<svg viewBox=\"0 0 1 1\"></svg>");
    write(dir.path(), "arrow.vue.bak", ICON);
    assert!(scan(&[dir.path().to_path_buf()]).is_empty());
}

#[test]
fn is_icon_source_unreadable_path_is_false() {
    assert!(!is_icon_source(Path::new("/nonexistent/ghost.vue")));
}

#[test]
fn icon_name_strips_extension() {
    assert_eq!(icon_name(Path::new("/a/b/arrow-left.vue")).as_deref(), Some("arrow-left"));
    assert_eq!(icon_name(Path::new("icon.min.vue")).as_deref(), Some("icon.min"));
}

// ── traversal ─────────────────────────────────────────────────────────────────

#[test]
fn scan_recurses_into_subdirectories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ui/nav/menu.vue", ICON);
    write(dir.path(), "ui/close.vue", ICON);
    let library = scan(&[dir.path().to_path_buf()]);
    assert_eq!(names(&library), vec!["close", "menu"]);
}

#[test]
fn ignored_directories_are_pruned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "node_modules/pkg/vendored.vue", ICON);
    write(dir.path(), ".git/hooks/hook.vue", ICON);
    write(dir.path(), "dist/built.vue", ICON);
    write(dir.path(), "src/kept.vue", ICON);
    let library = scan(&[dir.path().to_path_buf()]);
    assert_eq!(names(&library), vec!["kept"]);
}

#[test]
fn root_named_like_ignored_dir_is_still_scanned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "build/star.vue", ICON);
    let library = scan(&[dir.path().join("build")]);
    assert_eq!(names(&library), vec!["star"]);
}

// ── dedupe and ordering ───────────────────────────────────────────────────────

#[test]
fn duplicate_across_roots_keeps_first_root() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write(a.path(), "arrow.vue", ICON);
    write(b.path(), "arrow.vue", ICON);
    write(b.path(), "bell.vue", ICON);

    let library = scan(&[a.path().to_path_buf(), b.path().to_path_buf()]);
    assert_eq!(names(&library), vec!["arrow", "bell"]);
    let arrow = library.get("arrow").unwrap();
    assert!(arrow.path.starts_with(fs::canonicalize(a.path()).unwrap()));

    let reversed = scan(&[b.path().to_path_buf(), a.path().to_path_buf()]);
    let arrow = reversed.get("arrow").unwrap();
    assert!(arrow.path.starts_with(fs::canonicalize(b.path()).unwrap()));
}

#[test]
fn duplicate_within_root_keeps_first_visited() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/arrow.vue", ICON);
    write(dir.path(), "b/arrow.vue", ICON);
    let library = scan(&[dir.path().to_path_buf()]);
    assert_eq!(library.len(), 1);
    assert!(library.items()[0].path.ends_with("a/arrow.vue"));
}

#[test]
fn result_is_sorted_case_insensitively() {
    let dir = TempDir::new().unwrap();
    for name in ["zoom", "Bell", "arrow", "calendar"] {
        write(dir.path(), &format!("{name}.vue"), ICON);
    }
    let library = scan(&[dir.path().to_path_buf()]);
    assert_eq!(names(&library), vec!["arrow", "Bell", "calendar", "zoom"]);
}

#[test]
fn case_variants_sort_lowercase_first() {
    let library = IconLibrary::from_descriptors(vec![
        IconDescriptor::new("Arrow", "/icons/upper/Arrow.vue"),
        IconDescriptor::new("bell", "/icons/bell.vue"),
        IconDescriptor::new("arrow", "/icons/arrow.vue"),
    ]);
    assert_eq!(names(&library), vec!["arrow", "Arrow", "bell"]);
}

#[test]
fn from_descriptors_drops_later_duplicates_and_sorts() {
    let library = IconLibrary::from_descriptors(vec![
        IconDescriptor::new("b", "/first/b.vue"),
        IconDescriptor::new("a", "/first/a.vue"),
        IconDescriptor::new("b", "/second/b.vue"),
    ]);
    assert_eq!(names(&library), vec!["a", "b"]);
    assert_eq!(library.get("b").unwrap().path, PathBuf::from("/first/b.vue"));
    assert!(library.get("c").is_none());
}

#[test]
fn compare_names_is_total_for_case_variants() {
    use std::cmp::Ordering;
    assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
    assert_eq!(compare_names("arrow", "Arrow"), Ordering::Less);
    assert_eq!(compare_names("Arrow", "arrow"), Ordering::Greater);
    assert_eq!(compare_names("arrowLeft", "arrowleft"), Ordering::Greater);
    assert_eq!(compare_names("arrow", "arrow"), Ordering::Equal);
}

// ── non-UTF-8 paths ───────────────────────────────────────────────────────────

#[test]
#[cfg(unix)]
fn icons_under_non_utf8_directory_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    write(dir.path(), "arrow.vue", ICON);
    let bad_dir = dir.path().join(OsStr::from_bytes(b"bad\xffdir"));
    if fs::create_dir(&bad_dir).is_err() {
        // Some filesystems (e.g. macOS APFS) refuse non-UTF-8 names outright.
        return;
    }
    fs::write(bad_dir.join("bell.vue"), ICON).unwrap();

    let library = scan(&[dir.path().to_path_buf()]);
    assert_eq!(names(&library), vec!["arrow"]);
    assert!(library.items().iter().all(|icon| icon.path.to_str().is_some()));
}
