//! Slash-delimited path helpers

/// Segments of `path` below `root_path`, empty segments discarded.
///
/// Returns `None` when `path` does not live under `root_path`.
pub fn relative_segments<'a>(path: &'a str, root_path: &str) -> Option<Vec<&'a str>> {
    let relative = path.strip_prefix(root_path)?;
    if !root_path.is_empty() && !root_path.ends_with('/') && !relative.is_empty() && !relative.starts_with('/') {
        return None;
    }
    Some(relative.split('/').filter(|s| !s.is_empty()).collect())
}

/// Everything before the last `/`, or `""` for a single-segment path.
pub fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[..index],
        None => "",
    }
}

/// Whether `path` lies strictly below `ancestor`.
pub fn is_ancestor(ancestor: &str, path: &str) -> bool {
    path.strip_prefix(ancestor)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// Listing pattern for the direct children of `path`.
pub fn child_pattern(path: &str) -> String {
    format!("{}/*", path.trim_end_matches('/'))
}

/// Listing pattern for the top level below `root_path`.
pub fn root_pattern(root_path: &str) -> String {
    if root_path.is_empty() || root_path.ends_with('/') {
        format!("{}*", root_path)
    } else {
        format!("{}/*", root_path)
    }
}
