//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled relay routes
//! - Look up the route for a request path
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - Exact path hit via HashMap first
//! - Then longest segment-aligned prefix: `/server1` matches `/server1/x`, not `/server10`
//! - Deterministic: same path always resolves to the same route

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use axum::http::uri::Authority;

use crate::config::RelayRoute;
use crate::relay::RelayError;

/// A compiled relay route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub path: String,
    pub upstream: Authority,
}

impl Route {
    fn covers(&self, path: &str) -> bool {
        match path.strip_prefix(self.path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || self.path.ends_with('/'),
            None => false,
        }
    }
}

/// Immutable path → upstream table.
#[derive(Debug, Default)]
pub struct RouteTable {
    exact: HashMap<String, Arc<Route>>,
    /// Sorted by path length, longest first.
    by_length: Vec<Arc<Route>>,
}

impl RouteTable {
    /// Compile routes from configuration.
    pub fn from_config(routes: &[RelayRoute]) -> Result<Self, RelayError> {
        if routes.is_empty() {
            return Err(RelayError::NoRoutesConfigured);
        }

        let mut exact = HashMap::with_capacity(routes.len());
        let mut by_length = Vec::with_capacity(routes.len());
        for route in routes {
            let upstream = Authority::from_str(&route.upstream)
                .map_err(|_| RelayError::InvalidUpstream(route.upstream.clone()))?;
            let compiled = Arc::new(Route {
                name: route.name.clone(),
                path: route.path.clone(),
                upstream,
            });
            exact.insert(compiled.path.clone(), Arc::clone(&compiled));
            by_length.push(compiled);
        }
        by_length.sort_by(|a, b| b.path.len().cmp(&a.path.len()).then_with(|| a.path.cmp(&b.path)));

        Ok(Self { exact, by_length })
    }

    /// Find the route serving `path`.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        if let Some(route) = self.exact.get(path) {
            return Some(route.as_ref());
        }
        self.by_length
            .iter()
            .find(|route| route.covers(path))
            .map(|route| route.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }
}
