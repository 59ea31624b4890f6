//! Route table and lookup.

use std::borrow::Cow;

use axum::http::Method;
use percent_encoding::percent_decode_str;

use crate::routing::matcher::{PathPattern, RouteMatcher};

/// Every operation the HTTP surface exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListEntries,
    EntryById,
    EntryBySlug,
    CreateEntry,
    UpdateEntry,
    DeleteEntry,
    ListAuthors,
    AuthorByUsername,
    AuthorByEmail,
    CreateAuthor,
    UpdateAuthor,
    DeleteAuthor,
}

impl Endpoint {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ListEntries => "list_entries",
            Endpoint::EntryById => "entry_by_id",
            Endpoint::EntryBySlug => "entry_by_slug",
            Endpoint::CreateEntry => "create_entry",
            Endpoint::UpdateEntry => "update_entry",
            Endpoint::DeleteEntry => "delete_entry",
            Endpoint::ListAuthors => "list_authors",
            Endpoint::AuthorByUsername => "author_by_username",
            Endpoint::AuthorByEmail => "author_by_email",
            Endpoint::CreateAuthor => "create_author",
            Endpoint::UpdateAuthor => "update_author",
            Endpoint::DeleteAuthor => "delete_author",
        }
    }

    /// Whether the endpoint reads a JSON request body.
    pub fn takes_body(&self) -> bool {
        matches!(
            self,
            Endpoint::CreateEntry
                | Endpoint::UpdateEntry
                | Endpoint::CreateAuthor
                | Endpoint::UpdateAuthor
        )
    }
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pub matcher: RouteMatcher,
    pub endpoint: Endpoint,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub endpoint: Endpoint,
    /// Percent-decoded remainder of the path after the route prefix.
    pub param: String,
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    /// The route matched but its parameter is not valid percent-encoded UTF-8.
    InvalidParam(Endpoint),
    /// Some route owns the path, but not for this method.
    MethodNotAllowed,
    NotFound,
}

/// Immutable routing table, most specific route first.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile a table. Routes are ordered by specificity (stable).
    pub fn new(mut routes: Vec<Route>) -> Self {
        routes.sort_by(|a, b| {
            b.matcher
                .pattern
                .specificity()
                .cmp(&a.matcher.pattern.specificity())
        });
        Self { routes }
    }

    /// The bubble API.
    pub fn standard() -> Self {
        use Endpoint::*;
        use PathPattern::{Exact, Prefix};

        let route = |method: Method, pattern, endpoint| Route {
            matcher: RouteMatcher::new(method, pattern),
            endpoint,
        };

        Self::new(vec![
            route(Method::GET, Exact("/entries"), ListEntries),
            route(Method::POST, Exact("/entries"), CreateEntry),
            route(Method::GET, Prefix("/entries/slug/"), EntryBySlug),
            route(Method::GET, Prefix("/entries/"), EntryById),
            route(Method::PUT, Prefix("/entries/"), UpdateEntry),
            route(Method::DELETE, Prefix("/entries/"), DeleteEntry),
            route(Method::GET, Exact("/authors"), ListAuthors),
            route(Method::POST, Exact("/authors"), CreateAuthor),
            route(Method::GET, Prefix("/authors/email/"), AuthorByEmail),
            route(Method::GET, Prefix("/authors/"), AuthorByUsername),
            route(Method::PUT, Prefix("/authors/"), UpdateAuthor),
            route(Method::DELETE, Prefix("/authors/"), DeleteAuthor),
        ])
    }

    /// Find the route for a request. First match in specificity order wins.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let mut path_known = false;

        for route in &self.routes {
            if let Some(raw) = route.matcher.matches(method, path) {
                return match decode(raw) {
                    Some(param) => Resolution::Matched(RouteMatch {
                        endpoint: route.endpoint,
                        param,
                    }),
                    None => Resolution::InvalidParam(route.endpoint),
                };
            }
            if route.matcher.matches_path(path).is_some() {
                path_known = true;
            }
        }

        if path_known {
            Resolution::MethodNotAllowed
        } else {
            Resolution::NotFound
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

fn decode(raw: &str) -> Option<String> {
    percent_decode_str(raw).decode_utf8().ok().map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(table: &RouteTable, method: Method, path: &str) -> (Endpoint, String) {
        match table.resolve(&method, path) {
            Resolution::Matched(m) => (m.endpoint, m.param),
            other => panic!("{method} {path} did not match: {other:?}"),
        }
    }

    #[test]
    fn test_collection_routes() {
        let table = RouteTable::standard();
        assert_eq!(matched(&table, Method::GET, "/entries"), (Endpoint::ListEntries, String::new()));
        assert_eq!(matched(&table, Method::POST, "/authors"), (Endpoint::CreateAuthor, String::new()));
    }

    #[test]
    fn test_slug_beats_id_prefix() {
        let table = RouteTable::standard();
        assert_eq!(
            matched(&table, Method::GET, "/entries/slug/hello-world"),
            (Endpoint::EntryBySlug, "hello-world".to_string())
        );
        assert_eq!(
            matched(&table, Method::GET, "/entries/42"),
            (Endpoint::EntryById, "42".to_string())
        );
        assert_eq!(
            matched(&table, Method::GET, "/authors/email/a@b.c"),
            (Endpoint::AuthorByEmail, "a@b.c".to_string())
        );
    }

    #[test]
    fn test_empty_param_still_routes() {
        let table = RouteTable::standard();
        assert_eq!(
            matched(&table, Method::GET, "/authors/"),
            (Endpoint::AuthorByUsername, String::new())
        );
        assert_eq!(
            matched(&table, Method::GET, "/entries/slug/"),
            (Endpoint::EntryBySlug, String::new())
        );
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let table = RouteTable::standard();
        assert_eq!(
            matched(&table, Method::GET, "/authors/Optimus%20Prime"),
            (Endpoint::AuthorByUsername, "Optimus Prime".to_string())
        );
        assert_eq!(
            matched(&table, Method::GET, "/authors/email/hot.rod%40autobots.com"),
            (Endpoint::AuthorByEmail, "hot.rod@autobots.com".to_string())
        );
    }

    #[test]
    fn test_invalid_utf8_escape_rejected() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve(&Method::GET, "/authors/%FF"),
            Resolution::InvalidParam(Endpoint::AuthorByUsername)
        );
        assert_eq!(
            table.resolve(&Method::DELETE, "/entries/slug/caf%C3"),
            Resolution::InvalidParam(Endpoint::DeleteEntry)
        );
        // a stray '%' without hex digits is kept verbatim
        assert_eq!(
            matched(&table, Method::GET, "/entries/slug/100%"),
            (Endpoint::EntryBySlug, "100%".to_string())
        );
    }

    #[test]
    fn test_method_not_allowed_vs_not_found() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve(&Method::PATCH, "/entries/1"), Resolution::MethodNotAllowed);
        assert_eq!(table.resolve(&Method::DELETE, "/entries"), Resolution::MethodNotAllowed);
        assert_eq!(table.resolve(&Method::POST, "/entries/slug/x"), Resolution::MethodNotAllowed);
        assert_eq!(table.resolve(&Method::GET, "/comments"), Resolution::NotFound);
        assert_eq!(table.resolve(&Method::GET, "/"), Resolution::NotFound);
    }

    #[test]
    fn test_table_is_sorted_by_specificity() {
        let table = RouteTable::standard();
        let lengths: Vec<_> = table
            .routes()
            .iter()
            .map(|r| r.matcher.pattern.specificity())
            .collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
    }
}
