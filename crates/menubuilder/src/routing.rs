//! Endpoint route table.
//!
//! Maps endpoint names to path patterns such as `/blog/{slug}`, in both
//! directions: endpoint → URL for menu links, path → endpoint for working
//! out which entry is active.

use std::collections::HashMap;

use tracing::debug;

use crate::context::UrlResolver;
use crate::error::UrlError;

/// Result of matching a request path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Endpoint owning the matched pattern.
    pub endpoint: String,
    /// The pattern that matched.
    pub pattern: String,
    /// Path parameters extracted (e.g., {"slug": "my-post"}).
    pub params: HashMap<String, String>,
}

/// Endpoint → path pattern table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// Pattern by endpoint.
    routes: HashMap<String, String>,
    /// (pattern, endpoint), most specific first.
    ordered: Vec<(String, String)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `endpoint` at `pattern`, replacing an earlier pattern for it.
    pub fn route(mut self, endpoint: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.insert(endpoint, pattern);
        self
    }

    pub fn insert(&mut self, endpoint: impl Into<String>, pattern: impl Into<String>) {
        self.routes.insert(endpoint.into(), pattern.into());
        self.rebuild();
    }

    /// Rebuild the match order: fewer params first, then deeper paths.
    fn rebuild(&mut self) {
        self.ordered = self
            .routes
            .iter()
            .map(|(endpoint, pattern)| (pattern.clone(), endpoint.clone()))
            .collect();

        self.ordered.sort_by(|(a, a_ep), (b, b_ep)| {
            let key = |p: &str| (param_count(p), -(p.matches('/').count() as i64));
            key(a.as_str())
                .cmp(&key(b.as_str()))
                .then_with(|| a.cmp(b))
                .then_with(|| a_ep.cmp(b_ep))
        });

        debug!(routes = self.ordered.len(), "built route table");
    }

    /// Pattern registered for `endpoint`.
    pub fn pattern(&self, endpoint: &str) -> Option<&str> {
        self.routes.get(endpoint).map(String::as_str)
    }

    /// All (endpoint, pattern) pairs, most specific pattern first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ordered
            .iter()
            .map(|(pattern, endpoint)| (endpoint.as_str(), pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match a request path against registered routes.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.ordered.iter().find_map(|(pattern, endpoint)| {
            match_pattern(pattern, path).map(|params| RouteMatch {
                endpoint: endpoint.clone(),
                pattern: pattern.clone(),
                params,
            })
        })
    }
}

impl UrlResolver for RouteTable {
    fn url_for(&self, endpoint: &str) -> Result<String, UrlError> {
        let pattern = self
            .pattern(endpoint)
            .ok_or_else(|| UrlError::UnknownEndpoint(endpoint.to_string()))?;

        if param_count(pattern) > 0 {
            return Err(UrlError::MissingParameters {
                endpoint: endpoint.to_string(),
                pattern: pattern.to_string(),
            });
        }

        Ok(pattern.to_string())
    }
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn param_count(pattern: &str) -> usize {
    pattern.split('/').filter(|s| param_name(s).is_some()).count()
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/blog/{slug}/edit"
/// Path: "/blog/my-post/edit"
/// Result: Some({"slug": "my-post"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(name) = param_name(pat) {
            if actual.is_empty() {
                return None;
            }
            params.insert(name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}
