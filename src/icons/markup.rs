//! Structural sniffing of single-file component markup.
//!
//! This is a tag scanner, not an HTML parser: comments and string literals
//! are not understood, so look-alike text inside the template region (for
//! example `<!-- <svg> -->`) still counts. Confining the search to the
//! template region keeps `<svg` inside `<script>` or `<style>` blocks from
//! being picked up.

const TEMPLATE: &str = "template";
const SVG: &str = "svg";

/// An opening tag located in a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenTag {
    /// Byte offset of the `<`.
    start: usize,
    /// Byte offset just past the closing `>`.
    end: usize,
    self_closing: bool,
}

/// Inner text of the first `<template>` element, with nested templates
/// matched by depth. Returns `None` when there is no template or it is never
/// closed.
pub fn template_region(src: &str) -> Option<&str> {
    let open = find_open_tag(src, TEMPLATE, 0)?;
    if open.self_closing {
        return Some("");
    }
    let (inner_end, _) = find_matching_close(src, TEMPLATE, open.end)?;
    Some(&src[open.end..inner_end])
}

/// True if `region` contains an `<svg` opening tag.
pub fn has_svg_tag(region: &str) -> bool {
    find_open_tag(region, SVG, 0).is_some()
}

/// True if `src` has a template region and that region contains an `<svg>` tag.
pub fn is_icon_markup(src: &str) -> bool {
    template_region(src).is_some_and(has_svg_tag)
}

/// The first `<svg ...>...</svg>` element (or a self-closing `<svg .../>`),
/// searched inside the template region when there is one, else in the
/// whole text.
pub fn extract_svg(src: &str) -> Option<&str> {
    let scope = template_region(src).unwrap_or(src);
    let open = find_open_tag(scope, SVG, 0)?;
    if open.self_closing {
        return Some(&scope[open.start..open.end]);
    }
    let (_, close_end) = find_matching_close(scope, SVG, open.end)?;
    Some(&scope[open.start..close_end])
}

/// Find the next `<name` opening tag at or after `from`. The name must be
/// followed by whitespace, `/` or `>` so `<svgx>` is not `<svg>`.
fn find_open_tag(src: &str, name: &str, from: usize) -> Option<OpenTag> {
    let bytes = src.as_bytes();
    let mut cursor = from;
    while let Some(rel) = src.get(cursor..)?.find('<') {
        let start = cursor + rel;
        let name_start = start + 1;
        let name_end = name_start + name.len();
        if bytes.len() >= name_end
            && bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes())
            && bytes
                .get(name_end)
                .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
        {
            // An unterminated tag has no end to match against.
            let (end, self_closing) = tag_end(bytes, name_end)?;
            return Some(OpenTag { start, end, self_closing });
        }
        cursor = name_start;
    }
    None
}

/// Scan an opening tag's attributes to its `>`, skipping quoted values.
/// Returns the offset past `>` and whether the tag was written `/>`.
fn tag_end(bytes: &[u8], from: usize) -> Option<(usize, bool)> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => {
                let self_closing = i > from && bytes[i - 1] == b'/';
                return Some((i + 1, self_closing));
            }
            None => {}
        }
    }
    None
}

/// Find the `</name>` that closes an element whose content starts at
/// `from`, counting nested `<name>` elements. Returns (offset of `</`,
/// offset past the closing `>`).
fn find_matching_close(src: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut cursor = from;
    loop {
        let (close_start, close_end) = find_close_tag(src, name, cursor)?;
        match find_open_tag(src, name, cursor) {
            Some(open) if open.start < close_start => {
                if !open.self_closing {
                    depth += 1;
                }
                cursor = open.end;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some((close_start, close_end));
                }
                cursor = close_end;
            }
        }
    }
}

/// Find the next `</name>` (whitespace allowed before `>`).
fn find_close_tag(src: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = src.as_bytes();
    let mut cursor = from;
    while let Some(rel) = src.get(cursor..)?.find("</") {
        let start = cursor + rel;
        let name_start = start + 2;
        let name_end = name_start + name.len();
        if bytes.len() >= name_end && bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes()) {
            let mut i = name_end;
            while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                i += 1;
            }
            if bytes.get(i) == Some(&b'>') {
                return Some((start, i + 1));
            }
        }
        cursor = name_start;
    }
    None
}
