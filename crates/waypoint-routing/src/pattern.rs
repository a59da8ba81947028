//! Route pattern compilation and matching.
//!
//! A pattern is a `/`-separated template. Each segment is one of:
//!
//! - a literal (`invoices`), compared case-sensitively;
//! - a named parameter (`:id`), matching exactly one non-empty segment;
//! - a wildcard (`*`), matching zero or more trailing segments, captured under
//!   [`WILDCARD_PARAM`].
//!
//! Matching runs either in exact mode, where the whole path must be consumed,
//! or in prefix mode, where the unmatched suffix is handed back as
//! [`PathMatch::remaining_path`] for nested routes.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use waypoint_core::{WaypointError, WaypointResult};

use crate::path;

/// The parameter name under which a wildcard stores the segments it consumed.
pub const WILDCARD_PARAM: &str = "*";

/// One compiled segment of a [`RoutePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches the exact text.
    Literal(String),
    /// Matches one non-empty segment and captures it under the name.
    Param(String),
    /// Matches every remaining segment, including none.
    Wildcard,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param(name) => write!(f, ":{name}"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

/// A compiled route pattern.
///
/// Holds at most one [`Segment::Wildcard`], always in last position, and no
/// repeated parameter names. Immutable once compiled.
///
/// # Examples
///
/// ```
/// use waypoint_routing::pattern::RoutePattern;
///
/// let pattern: RoutePattern = "/invoices/:id".parse().unwrap();
/// let m = pattern.match_path("/invoices/42", true).unwrap();
/// assert_eq!(m.param("id"), Some("42"));
/// assert!(pattern.match_path("/invoices/42/lines", true).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// The pattern text as registered.
    source: String,
    /// Compiled segments, in order.
    segments: Vec<Segment>,
}

/// The result of matching a path against a single [`RoutePattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Captured parameter values, keyed by parameter name.
    pub params: HashMap<String, String>,
    /// The normalized portion of the path consumed by the pattern.
    pub matched_path: String,
    /// The unmatched suffix: empty when the whole path was consumed,
    /// otherwise starting with `/`.
    pub remaining_path: String,
}

impl PathMatch {
    /// Returns the value captured for the named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns `true` if nothing of the path was left unmatched.
    pub fn is_exact(&self) -> bool {
        self.remaining_path.is_empty()
    }
}

impl RoutePattern {
    /// Compiles a pattern string. See [`compile`].
    pub fn new(pattern: &str) -> WaypointResult<Self> {
        compile(pattern)
    }

    /// Returns the pattern text as registered.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the names of the parameters this pattern captures, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Wildcard => Some(WILDCARD_PARAM),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if the pattern ends with a wildcard.
    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// Returns `true` for the root pattern `/`, which has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tests a concrete path against this pattern.
    ///
    /// With `exact` set, the path must be consumed entirely. Otherwise the
    /// pattern may match a leading portion of the path and the rest is
    /// reported in [`PathMatch::remaining_path`]. A query string or fragment
    /// on `path` is ignored.
    pub fn match_path(&self, path: &str, exact: bool) -> Option<PathMatch> {
        let normalized = path::normalize(path::strip_search(path));
        let parts = path::segments(&normalized);

        let mut params = HashMap::new();
        let mut consumed = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    if parts.get(consumed) != Some(&text.as_str()) {
                        return None;
                    }
                    consumed += 1;
                }
                Segment::Param(name) => {
                    let value = parts.get(consumed).filter(|value| !value.is_empty())?;
                    params.insert(name.clone(), (*value).to_string());
                    consumed += 1;
                }
                Segment::Wildcard => {
                    params.insert(WILDCARD_PARAM.to_string(), parts[consumed..].join("/"));
                    consumed = parts.len();
                }
            }
        }

        if exact && consumed < parts.len() {
            return None;
        }

        let remaining_path = if consumed == parts.len() {
            String::new()
        } else {
            path::join(&parts[consumed..])
        };

        Some(PathMatch {
            params,
            matched_path: path::join(&parts[..consumed]),
            remaining_path,
        })
    }

    /// Builds a concrete path by substituting parameter values.
    ///
    /// The wildcard value, if supplied, is appended as-is; without it the
    /// wildcard contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::MissingParameter`] if a named parameter has
    /// no (or an empty) value.
    pub fn reverse<S: BuildHasher>(&self, params: &HashMap<&str, &str, S>) -> WaypointResult<String> {
        let mut parts: Vec<&str> = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => parts.push(text),
                Segment::Param(name) => {
                    let value = params
                        .get(name.as_str())
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| WaypointError::MissingParameter(name.clone()))?;
                    parts.push(value);
                }
                Segment::Wildcard => {
                    if let Some(rest) = params.get(WILDCARD_PARAM) {
                        parts.extend(rest.split('/').filter(|part| !part.is_empty()));
                    }
                }
            }
        }

        Ok(path::join(&parts))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for RoutePattern {
    type Err = WaypointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s)
    }
}

/// Compiles a route pattern string into a [`RoutePattern`].
///
/// Empty segments are ignored, so `*` and `/*` compile to the same pattern and
/// `/` compiles to the root pattern.
///
/// # Errors
///
/// Returns [`WaypointError::InvalidPattern`] if a wildcard is not the final
/// segment, a parameter name is empty or `*`, or a parameter name appears
/// twice.
pub fn compile(pattern: &str) -> WaypointResult<RoutePattern> {
    let raw: Vec<&str> = pattern.split('/').filter(|part| !part.is_empty()).collect();
    let mut segments = Vec::with_capacity(raw.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, part) in raw.iter().enumerate() {
        let segment = if *part == "*" {
            if index + 1 != raw.len() {
                return Err(WaypointError::invalid_pattern(
                    pattern,
                    "wildcard `*` must be the last segment",
                ));
            }
            Segment::Wildcard
        } else if let Some(name) = part.strip_prefix(':') {
            if name.is_empty() {
                return Err(WaypointError::invalid_pattern(pattern, "parameter name is empty"));
            }
            if name == WILDCARD_PARAM {
                return Err(WaypointError::invalid_pattern(
                    pattern,
                    "parameter name `*` is reserved for the wildcard",
                ));
            }
            if !seen.insert(name) {
                return Err(WaypointError::invalid_pattern(
                    pattern,
                    format!("duplicate parameter `:{name}`"),
                ));
            }
            Segment::Param(name.to_string())
        } else {
            Segment::Literal((*part).to_string())
        };
        segments.push(segment);
    }

    tracing::trace!(pattern, segments = segments.len(), "compiled route pattern");

    Ok(RoutePattern {
        source: pattern.to_string(),
        segments,
    })
}

/// Tests `path` against `pattern`. See [`RoutePattern::match_path`].
pub fn match_path(pattern: &RoutePattern, path: &str, exact: bool) -> Option<PathMatch> {
    pattern.match_path(path, exact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(pattern: &str) -> RoutePattern {
        compile(pattern).unwrap()
    }

    // ── Compilation ─────────────────────────────────────────────────

    #[test]
    fn test_compile_segments() {
        let pattern = p("/invoices/:id");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("invoices".to_string()),
                Segment::Param("id".to_string())
            ]
        );
        assert_eq!(pattern.source(), "/invoices/:id");
        assert_eq!(pattern.to_string(), "/invoices/:id");
    }

    #[test]
    fn test_compile_root_and_wildcard_forms() {
        assert!(p("/").is_root());
        assert!(p("").is_root());
        assert_eq!(p("*").segments(), p("/*").segments());
        assert!(p("*").has_wildcard());
    }

    #[test]
    fn test_compile_wildcard_not_last_fails() {
        let err = compile("/files/*/edit").unwrap_err();
        assert!(matches!(err, WaypointError::InvalidPattern { .. }));
        assert!(err.to_string().contains("last segment"));
    }

    #[test]
    fn test_compile_two_wildcards_fails() {
        assert!(compile("/*/*").is_err());
    }

    #[test]
    fn test_compile_duplicate_param_fails() {
        let err = compile("/:id/items/:id").unwrap_err();
        assert!(err.to_string().contains("duplicate parameter `:id`"));
    }

    #[test]
    fn test_compile_empty_param_name_fails() {
        assert!(compile("/users/:").is_err());
    }

    #[test]
    fn test_compile_reserved_param_name_fails() {
        assert!(compile("/:*").is_err());
        assert!(compile("/files/:*").is_err());
        assert!(matches!(
            compile("/files/:*/*"),
            Err(WaypointError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_compile_literal_star_inside_segment() {
        let pattern = p("/a*b");
        assert_eq!(pattern.segments(), &[Segment::Literal("a*b".to_string())]);
    }

    #[test]
    fn test_from_str() {
        let pattern: RoutePattern = "/students/:name".parse().unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["name"]);
        assert!("/*/x".parse::<RoutePattern>().is_err());
    }

    // ── Exact matching ──────────────────────────────────────────────

    #[test]
    fn test_exact_literal() {
        let pattern = p("/settings");
        assert!(pattern.match_path("/settings", true).is_some());
        assert!(pattern.match_path("/settings/", true).is_some());
        assert!(pattern.match_path("/Settings", true).is_none());
        assert!(pattern.match_path("/settings/profile", true).is_none());
    }

    #[test]
    fn test_exact_root_only_matches_root() {
        let pattern = p("/");
        assert!(pattern.match_path("/", true).is_some());
        assert!(pattern.match_path("", true).is_some());
        assert!(pattern.match_path("/settings", true).is_none());
    }

    #[test]
    fn test_param_extraction() {
        let m = p("/invoices/:id").match_path("/invoices/42", true).unwrap();
        assert_eq!(m.param("id"), Some("42"));
        assert_eq!(m.matched_path, "/invoices/42");
        assert!(m.is_exact());
    }

    #[test]
    fn test_param_never_matches_empty_segment() {
        assert!(p("/a/:x/b").match_path("/a//b", true).is_none());
    }

    #[test]
    fn test_consecutive_params() {
        let m = p("/:year/:month").match_path("/2024/06", true).unwrap();
        assert_eq!(m.param("year"), Some("2024"));
        assert_eq!(m.param("month"), Some("06"));
    }

    #[test]
    fn test_wildcard_captures_rest() {
        let m = p("/files/*").match_path("/files/docs/readme.md", true).unwrap();
        assert_eq!(m.param(WILDCARD_PARAM), Some("docs/readme.md"));
        assert!(m.is_exact());
    }

    #[test]
    fn test_wildcard_matches_zero_segments() {
        let m = p("/files/*").match_path("/files", true).unwrap();
        assert_eq!(m.param(WILDCARD_PARAM), Some(""));
    }

    #[test]
    fn test_catch_all_matches_everything() {
        let pattern = p("*");
        for path in ["/", "/unknown", "/a/b/c"] {
            assert!(pattern.match_path(path, true).is_some(), "{path}");
        }
    }

    // ── Prefix matching ─────────────────────────────────────────────

    #[test]
    fn test_prefix_reports_remaining_path() {
        let m = p("/newsletters").match_path("/newsletters/react", false).unwrap();
        assert_eq!(m.matched_path, "/newsletters");
        assert_eq!(m.remaining_path, "/react");
        assert!(!m.is_exact());
    }

    #[test]
    fn test_root_prefix_matches_every_path() {
        for path in ["/", "/rainbows", "/bears/grizzly"] {
            let m = p("/").match_path(path, false).unwrap();
            assert_eq!(m.matched_path, "/");
            assert_eq!(m.remaining_path, if path == "/" { "" } else { path });
        }
    }

    #[test]
    fn test_prefix_is_segment_aligned() {
        assert!(p("/set").match_path("/settings", false).is_none());
    }

    #[test]
    fn test_free_function_match() {
        let pattern = p("/:name");
        let m = match_path(&pattern, "/invoices/42", false).unwrap();
        assert_eq!(m.param("name"), Some("invoices"));
        assert_eq!(m.remaining_path, "/42");
    }

    // ── Reverse ─────────────────────────────────────────────────────

    #[test]
    fn test_reverse_with_params() {
        let mut params = HashMap::new();
        params.insert("id", "7");
        assert_eq!(p("/invoices/:id").reverse(&params).unwrap(), "/invoices/7");
    }

    #[test]
    fn test_reverse_missing_param() {
        let params: HashMap<&str, &str> = HashMap::new();
        let err = p("/invoices/:id").reverse(&params).unwrap_err();
        assert!(matches!(err, WaypointError::MissingParameter(name) if name == "id"));
    }

    #[test]
    fn test_reverse_wildcard() {
        let mut params = HashMap::new();
        params.insert(WILDCARD_PARAM, "docs/readme.md");
        assert_eq!(p("/files/*").reverse(&params).unwrap(), "/files/docs/readme.md");
        let empty: HashMap<&str, &str> = HashMap::new();
        assert_eq!(p("/files/*").reverse(&empty).unwrap(), "/files");
    }

    #[test]
    fn test_reverse_then_match_extracts_same_values() {
        let pattern = p("/users/:user/posts/:post");
        let mut params = HashMap::new();
        params.insert("user", "tyler");
        params.insert("post", "99");
        let path = pattern.reverse(&params).unwrap();
        let m = pattern.match_path(&path, true).unwrap();
        assert_eq!(m.param("user"), Some("tyler"));
        assert_eq!(m.param("post"), Some("99"));
    }
}
