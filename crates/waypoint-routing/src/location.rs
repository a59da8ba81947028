//! The addressable navigation state.
//!
//! A [`Location`] is what a navigator holds as "where the user is": a
//! normalized path, decoded query parameters, an optional fragment and an
//! optional opaque state payload that travels with the entry but is not part
//! of the address.

use std::fmt;

use serde_json::Value;

use crate::path;
use crate::querydict::QueryDict;

/// A location in the application.
///
/// # Examples
///
/// ```
/// use waypoint_routing::Location;
///
/// let location = Location::parse("/users/?sort=name&page=2#top");
/// assert_eq!(location.path(), "/users");
/// assert_eq!(location.query().get("page"), Some("2"));
/// assert_eq!(location.fragment(), Some("top"));
/// assert_eq!(location.href(), "/users?page=2&sort=name#top");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    path: String,
    query: QueryDict,
    fragment: Option<String>,
    state: Option<Value>,
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location {
    /// Creates a location for a bare path, with no query, fragment or state.
    pub fn new(path: &str) -> Self {
        Self {
            path: path::normalize(path),
            query: QueryDict::new(),
            fragment: None,
            state: None,
        }
    }

    /// Parses `path?query#fragment`. Every part but the path is optional, and
    /// an empty query or fragment is treated as absent.
    pub fn parse(href: &str) -> Self {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (href, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        Self {
            path: path::normalize(path),
            query: QueryDict::parse(query),
            fragment: fragment.filter(|f| !f.is_empty()).map(str::to_string),
            state: None,
        }
    }

    /// Returns the normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the decoded query parameters.
    pub fn query(&self) -> &QueryDict {
        &self.query
    }

    /// Returns the query parameters for modification.
    pub fn query_mut(&mut self) -> &mut QueryDict {
        &mut self.query
    }

    /// Returns the fragment, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the state payload attached to this location.
    pub fn state(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Attaches a state payload.
    #[must_use]
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Replaces the state payload, clearing it with `None`.
    #[must_use]
    pub fn with_optional_state(mut self, state: Option<Value>) -> Self {
        self.state = state;
        self
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryDict) -> Self {
        self.query = query;
        self
    }

    /// Replaces the fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment: &str) -> Self {
        self.fragment = Some(fragment.to_string()).filter(|f| !f.is_empty());
        self
    }

    /// Returns the encoded query string with its leading `?`, or an empty
    /// string when there are no parameters.
    pub fn search(&self) -> String {
        if self.query.is_empty() {
            String::new()
        } else {
            format!("?{}", self.query.urlencode())
        }
    }

    /// Serializes the address part (path, query, fragment). State is not part
    /// of the address.
    pub fn href(&self) -> String {
        let mut out = self.path.clone();
        out.push_str(&self.search());
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl From<&str> for Location {
    fn from(href: &str) -> Self {
        Self::parse(href)
    }
}

impl From<String> for Location {
    fn from(href: String) -> Self {
        Self::parse(&href)
    }
}
