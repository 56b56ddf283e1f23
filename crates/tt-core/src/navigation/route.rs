use super::ModuleId;
use crate::errors::RouteError;
use crate::session::SessionGuard;

/// A resolved navigation target: the module plus whatever query string
/// followed it in the hash (used by the auth module for mode dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub module: ModuleId,
    pub query: String,
}

impl Route {
    pub fn to_module(module: ModuleId) -> Self {
        Self {
            module,
            query: String::new(),
        }
    }
}

/// Outcome of running a resolved route through the session guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Proceed to load the target module.
    Load(Route),
    /// No session: force-navigate to the auth module instead. The target
    /// module's loader must not run.
    RedirectToAuth,
}

/// Resolve a raw location hash into a route.
///
/// The module name is the fragment up to the first `?`; a leading `#` is
/// tolerated; an empty fragment resolves to [`ModuleId::HOME`]. A name that
/// matches no registered module is an error rather than a silent no-op.
pub fn resolve_route(hash: &str) -> Result<Route, RouteError> {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);
    let (name, query) = match fragment.split_once('?') {
        Some((name, query)) => (name, query),
        None => (fragment, ""),
    };

    let module = if name.is_empty() {
        ModuleId::HOME
    } else {
        ModuleId::parse(name).ok_or_else(|| RouteError::UnknownModule(name.to_string()))?
    };

    Ok(Route {
        module,
        query: query.to_string(),
    })
}

/// Apply the session guard to a resolved route.
pub fn decide(route: Route, guard: &SessionGuard, token: Option<&str>) -> RouteDecision {
    if guard.admits(route.module, token) {
        RouteDecision::Load(route)
    } else {
        RouteDecision::RedirectToAuth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_resolves_to_home() {
        let route = resolve_route("").unwrap();
        assert_eq!(route.module, ModuleId::HOME);
        assert!(route.query.is_empty());

        let route = resolve_route("#").unwrap();
        assert_eq!(route.module, ModuleId::HOME);
    }

    #[test]
    fn fragment_is_cut_at_query_separator() {
        let route = resolve_route("#auth?mode=signup").unwrap();
        assert_eq!(route.module, ModuleId::Auth);
        assert_eq!(route.query, "mode=signup");
    }

    #[test]
    fn unknown_module_is_an_error() {
        let err = resolve_route("#settings").unwrap_err();
        assert!(matches!(err, RouteError::UnknownModule(name) if name == "settings"));
    }

    #[test]
    fn guard_redirects_without_token() {
        let route = resolve_route("#journal").unwrap();
        let decision = decide(route, &SessionGuard, None);
        assert_eq!(decision, RouteDecision::RedirectToAuth);
    }

    #[test]
    fn guard_admits_auth_without_token() {
        let route = resolve_route("#auth").unwrap();
        let decision = decide(route.clone(), &SessionGuard, None);
        assert_eq!(decision, RouteDecision::Load(route));
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve_route("#news").unwrap();
        let second = resolve_route("#news").unwrap();
        assert_eq!(first, second);
    }
}
