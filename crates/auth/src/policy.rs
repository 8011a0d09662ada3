//! Per-route role requirements

use std::collections::HashMap;

use axum::http::Method;

use crate::roles::Role;

/// Immutable table mapping routes to the roles allowed through.
///
/// Built once at startup and shared read-only with the gate. Lookup
/// checks exact method + route-template rules first, then falls back
/// to the longest matching path-prefix rule. Routes with no rule are
/// open.
#[derive(Debug, Default)]
pub struct RoutePolicy {
    /// Route template -> per-method rules
    exact: HashMap<String, Vec<(Method, Vec<Role>)>>,
    /// Sorted longest-prefix-first at build time
    prefixes: Vec<(String, Vec<Role>)>,
}

impl RoutePolicy {
    pub fn builder() -> RoutePolicyBuilder {
        RoutePolicyBuilder::default()
    }

    /// Roles admissible for this method + matched route template, or
    /// `None` when the route is open.
    pub fn required_roles(&self, method: &Method, path: &str) -> Option<&[Role]> {
        if let Some(rules) = self.exact.get(path) {
            if let Some((_, roles)) = rules.iter().find(|(m, _)| m == method) {
                return Some(roles);
            }
        }

        self.prefixes
            .iter()
            .find(|(prefix, _)| prefix_matches(prefix, path))
            .map(|(_, roles)| roles.as_slice())
    }
}

/// A prefix matches whole path segments only, so `/api/admin` covers
/// `/api/admin/users` but not `/api/administrators`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Builder for [`RoutePolicy`].
///
/// Misuse is a startup defect: registering an empty role set or the
/// same rule twice panics, the same way axum panics on duplicate
/// routes.
#[derive(Debug, Default)]
pub struct RoutePolicyBuilder {
    exact: HashMap<String, Vec<(Method, Vec<Role>)>>,
    prefixes: Vec<(String, Vec<Role>)>,
}

impl RoutePolicyBuilder {
    /// Require one of `roles` for an exact method + route template
    pub fn route(mut self, method: Method, template: &str, roles: &[Role]) -> Self {
        if roles.is_empty() {
            panic!("route policy for {method} {template} has no roles");
        }

        let rules = self.exact.entry(template.to_string()).or_default();
        if rules.iter().any(|(m, _)| *m == method) {
            panic!("duplicate route policy for {method} {template}");
        }
        rules.push((method, roles.to_vec()));
        self
    }

    /// Require one of `roles` for every route under a path prefix,
    /// regardless of method
    pub fn prefix(mut self, prefix: &str, roles: &[Role]) -> Self {
        if roles.is_empty() {
            panic!("route policy for prefix {prefix} has no roles");
        }
        if self.prefixes.iter().any(|(existing, _)| existing == prefix) {
            panic!("duplicate route policy for prefix {prefix}");
        }
        self.prefixes.push((prefix.to_string(), roles.to_vec()));
        self
    }

    pub fn build(mut self) -> RoutePolicy {
        // Longest prefix wins on overlap
        self.prefixes
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        RoutePolicy {
            exact: self.exact,
            prefixes: self.prefixes,
        }
    }
}
