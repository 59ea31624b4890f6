//! Route matching logic.
//!
//! # Responsibilities
//! - Match an HTTP method exactly
//! - Match a path exactly or by prefix (case-sensitive)
//! - Hand back whatever follows a prefix as the route parameter
//!
//! # Design Decisions
//! - No regex and no segment binding: a parameter is the prefix-stripped rest
//! - Specificity is the pattern length, so `/entries/slug/` beats `/entries/`

use axum::http::Method;

/// How a route's path is compared to the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// The path must equal this string.
    Exact(&'static str),
    /// The path must start with this string; the rest is the parameter.
    Prefix(&'static str),
}

impl PathPattern {
    /// Returns the captured parameter (empty for exact matches) if `path` matches.
    pub fn capture<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathPattern::Exact(expected) => (path == *expected).then_some(""),
            PathPattern::Prefix(prefix) => path.strip_prefix(prefix),
        }
    }

    /// Longer patterns are more specific.
    pub fn specificity(&self) -> usize {
        match self {
            PathPattern::Exact(p) | PathPattern::Prefix(p) => p.len(),
        }
    }
}

/// A method plus a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatcher {
    pub method: Method,
    pub pattern: PathPattern,
}

impl RouteMatcher {
    pub fn new(method: Method, pattern: PathPattern) -> Self {
        Self { method, pattern }
    }

    /// Path-only check, used to tell 404 from 405.
    pub fn matches_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.pattern.capture(path)
    }

    /// Full check: method and path.
    pub fn matches<'a>(&self, method: &Method, path: &'a str) -> Option<&'a str> {
        if *method != self.method {
            return None;
        }
        self.matches_path(path)
    }
}
