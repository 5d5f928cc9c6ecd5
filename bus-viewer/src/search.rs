//! Route search and filtering.
//!
//! Free-text search matches case-insensitive substrings of the route name
//! or of any stop name. Exact-name filtering backs the "filter by bus"
//! entry points. Both keep the input route order.

use crate::domain::Route;

/// Normalise a search query: trimmed and lower-cased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `route` matches an already-normalised, non-empty query.
fn matches_query(route: &Route, term: &str) -> bool {
    route.name.to_lowercase().contains(term)
        || route
            .stops
            .iter()
            .any(|s| s.name.to_lowercase().contains(term))
}

/// Routes matching a free-text query.
///
/// A blank query (empty or whitespace) returns every route.
pub fn filter_by_query<'a>(routes: &'a [Route], query: &str) -> Vec<&'a Route> {
    let term = normalize_query(query);
    if term.is_empty() {
        return routes.iter().collect();
    }

    routes.iter().filter(|r| matches_query(r, &term)).collect()
}

/// Routes whose name is exactly `name` (case-sensitive).
pub fn filter_by_exact_name<'a>(routes: &'a [Route], name: &str) -> Vec<&'a Route> {
    routes.iter().filter(|r| r.name == name).collect()
}
