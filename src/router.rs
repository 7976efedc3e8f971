//! # Router
//!
//! Ordered route table mapping path patterns to handler names.
//!
//! Routes are tried in registration order and the **first** match wins,
//! regardless of how specific a later pattern is. Register literal routes
//! before the catch-alls that would otherwise shadow them:
//!
//! ```rust
//! use routefs::Router;
//!
//! let mut router = Router::new();
//! router.register("/README.txt", "get_readme").unwrap();
//! router.register("/{name}", "get_locker").unwrap();
//!
//! let m = router.route("/README.txt").unwrap();
//! assert_eq!(m.handler, "get_readme");
//!
//! let m = router.route("/joe").unwrap();
//! assert_eq!(m.handler, "get_locker");
//! assert_eq!(m.params.get("name"), Some("joe"));
//!
//! assert!(router.route("/joe/bin").is_none());
//! ```

use crate::{FsError, Pattern};

/// A pattern plus the name of the handler it dispatches to.
#[derive(Debug, Clone)]
pub struct Route {
    /// The parsed pattern.
    pub pattern: Pattern,
    /// Name of the handler in the registry.
    pub handler: String,
}

/// Variable bindings extracted from a path by a route pattern.
///
/// Bindings keep the order in which the variables appear in the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create from name/value pairs.
    pub fn new(bindings: Vec<(String, String)>) -> Self {
        Self(bindings)
    }

    /// Value bound to `name`, if the pattern has that variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the pattern had no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    /// The pattern that matched, as written.
    pub pattern: &'a str,
    /// Name of the handler to invoke.
    pub handler: &'a str,
    /// Variables bound by the pattern.
    pub params: Params,
}

/// Ordered set of routes. Immutable once the filesystem is built.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `pattern` and append it, dispatching to `handler`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if the pattern is malformed
    pub fn register(&mut self, pattern: &str, handler: &str) -> Result<(), FsError> {
        let pattern = Pattern::parse(pattern)?;
        self.routes.push(Route {
            pattern,
            handler: handler.to_string(),
        });
        Ok(())
    }

    /// Find the first route matching `path`.
    pub fn route(&self, path: &str) -> Option<Match<'_>> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|bindings| Match {
                pattern: route.pattern.as_str(),
                handler: route.handler.as_str(),
                params: Params::new(bindings),
            })
        })
    }

    /// Registered routes, in precedence order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_routes_no_match() {
        let router = Router::new();
        assert!(router.route("/").is_none());
    }

    #[test]
    fn first_match_wins_even_when_less_specific() {
        let mut router = Router::new();
        router.register("/{name}", "catch_all").unwrap();
        router.register("/README.txt", "readme").unwrap();

        let m = router.route("/README.txt").unwrap();
        assert_eq!(m.handler, "catch_all");
        assert_eq!(m.pattern, "/{name}");
    }

    #[test]
    fn falls_through_to_later_routes() {
        let mut router = Router::new();
        router.register("", "get_list").unwrap();
        router.register(":action", "get_user").unwrap();

        let root = router.route("/").unwrap();
        assert_eq!(root.handler, "get_list");
        assert!(root.params.is_empty());

        let user = router.route("/joe").unwrap();
        assert_eq!(user.handler, "get_user");
        assert_eq!(user.params.get("action"), Some("joe"));
        assert_eq!(user.params.get("missing"), None);
    }

    #[test]
    fn register_rejects_malformed_pattern() {
        let mut router = Router::new();
        let err = router.register("/{oops", "h").unwrap_err();
        assert!(matches!(err, FsError::InvalidPattern { .. }));
        assert!(router.routes().is_empty());
    }

    #[test]
    fn params_iterate_in_pattern_order() {
        let mut router = Router::new();
        router.register("/{a}/{b}/{*c}", "h").unwrap();

        let m = router.route("/1/2/3/4").unwrap();
        let pairs: Vec<_> = m.params.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3/4")]);
        assert_eq!(m.params.len(), 3);
    }

    #[test]
    fn routes_keep_registration_order() {
        let mut router = Router::new();
        router.register("/a", "first").unwrap();
        router.register("/b", "second").unwrap();

        let names: Vec<_> = router.routes().iter().map(|r| r.handler.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
