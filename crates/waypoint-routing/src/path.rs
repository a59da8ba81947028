//! Path normalization helpers shared by patterns, routers, and locations.

/// Normalizes a path for comparison.
///
/// A leading `/` is ensured and trailing slashes are stripped, except for the
/// root path `/`. An empty input is the root path.
///
/// ```
/// use waypoint_routing::path::normalize;
///
/// assert_eq!(normalize("/settings/"), "/settings");
/// assert_eq!(normalize("invoices/42"), "/invoices/42");
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("///"), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Drops a query string or fragment, keeping only the path part of an href.
///
/// ```
/// use waypoint_routing::path::strip_search;
///
/// assert_eq!(strip_search("/settings?tab=1"), "/settings");
/// assert_eq!(strip_search("/?id=tyler#top"), "/");
/// assert_eq!(strip_search("/faq#billing"), "/faq");
/// ```
pub fn strip_search(href: &str) -> &str {
    href.find(|c| c == '?' || c == '#').map_or(href, |end| &href[..end])
}

/// Splits a normalized path into its segments.
///
/// The root path has no segments. Empty segments inside the path (`/a//b`)
/// are kept so that they can be rejected by parameter matching.
pub fn segments(normalized: &str) -> Vec<&str> {
    let body = normalized.strip_prefix('/').unwrap_or(normalized);
    if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    }
}

/// Joins segments back into an absolute path. No segments yields `/`.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(segment.as_ref());
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Concatenates a matched prefix with a path matched relative to it.
///
/// ```
/// use waypoint_routing::path::concat;
///
/// assert_eq!(concat("/newsletters", "/react"), "/newsletters/react");
/// assert_eq!(concat("/", "/react"), "/react");
/// assert_eq!(concat("/newsletters", "/"), "/newsletters");
/// ```
pub fn concat(prefix: &str, suffix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let suffix = suffix.trim_start_matches('/');
    match (prefix.is_empty(), suffix.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{suffix}"),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{suffix}"),
    }
}
