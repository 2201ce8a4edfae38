//! Path normalization and parent/child classification
//!
//! All functions here are pure string operations; none of them touch the store.

/// Reserved separator between path segments.
pub const SEPARATOR: char = '/';

/// Canonical root path.
pub const ROOT: &str = "/";

/// Normalizes a path by removing surrounding whitespace and trailing separators.
///
/// The root path is the one exception: `"/"` (or `"//"`) trims to `"/"`.
/// An empty input stays empty.
pub fn trim(path: &str) -> &str {
    let mut trimmed = path.trim();
    while trimmed.len() > 1 && trimmed.ends_with(SEPARATOR) {
        trimmed = trimmed[..trimmed.len() - 1].trim_end();
    }
    trimmed
}

/// Canonical form of a path: trimmed, with runs of separators collapsed.
///
/// This is the form used as a store key, so `"/a//b/"` and `"/a/b"` name
/// the same entry.
pub fn normalize(path: &str) -> String {
    let trimmed = trim(path);
    let mut normalized = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if c == SEPARATOR && normalized.ends_with(SEPARATOR) {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Splits a path into its segments, looking for structure at or after `from`.
///
/// Returns `None` when no separator occurs at or after `from`; such a path is
/// malformed relative to that offset. If the separator sits exactly at `from`,
/// it is dropped and only the remainder is split. Otherwise the whole path is
/// split. Empty segments produced by doubled separators are skipped.
///
/// # Arguments
///
/// * `path` - The path to decompose; surrounding whitespace is ignored.
/// * `from` - Byte offset at which the search for a separator starts.
pub fn components(path: &str, from: usize) -> Option<Vec<&str>> {
    let path = path.trim();
    let tail = path.get(from..)?;
    let index = tail.find(SEPARATOR)?;

    let source = if index == 0 { &tail[1..] } else { path };

    Some(
        source
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect(),
    )
}

/// Returns true if `child` sits exactly one segment below `parent`.
///
/// An empty string stands for an absent path: an empty parent or child never
/// matches, so top-level entries are listed through the root `"/"`. A path is
/// not a child of itself.
///
/// The boundary between the two must fall on a separator, so `"/data"` is
/// not a parent of `"/database"`.
pub fn is_direct_child_of(parent: &str, child: &str) -> bool {
    if parent.is_empty() || child.is_empty() {
        return false;
    }
    if !child.starts_with(parent) || child.len() == parent.len() {
        return false;
    }

    // The root ends with the separator itself, so its boundary is one byte earlier.
    let from = if parent.ends_with(SEPARATOR) {
        parent.len() - 1
    } else {
        parent.len()
    };

    if !child[from..].starts_with(SEPARATOR) {
        return false;
    }

    matches!(components(child, from), Some(segments) if segments.len() == 1)
}

/// Joins a parent path and a child name, then normalizes the result.
pub fn join(parent: &str, child: &str) -> String {
    let parent = trim(parent);
    let child = child.trim().trim_start_matches(SEPARATOR);

    let joined = if parent.is_empty() {
        child.to_string()
    } else if parent.ends_with(SEPARATOR) {
        format!("{}{}", parent, child)
    } else {
        format!("{}{}{}", parent, SEPARATOR, child)
    };

    normalize(&joined)
}

/// Returns the final segment of a path, or the path itself when it has none.
pub fn last_segment(path: &str) -> &str {
    let path = trim(path);
    match path.rfind(SEPARATOR) {
        Some(index) if index + 1 < path.len() => &path[index + 1..],
        _ => path,
    }
}

/// Returns the path of the directory containing `path`.
///
/// `None` for the root and for bare names without any separator.
pub fn parent_of(path: &str) -> Option<&str> {
    let path = trim(path);
    if path == ROOT {
        return None;
    }

    match path.rfind(SEPARATOR)? {
        0 => Some(ROOT),
        index => Some(trim(&path[..index])),
    }
}
