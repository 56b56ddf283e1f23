use std::sync::Arc;

use tracing::{info, warn};
use tt_core::navigation::{decide, resolve_route, ModuleId, RouteDecision};
use tt_core::ports::ContainerPort;
use tt_core::SessionGuard;

use crate::usecases::load_module::{LoadModule, LoadOutcome};
use crate::usecases::session::SessionStore;

/// What a navigation amounted to.
#[derive(Debug)]
pub enum NavigationOutcome {
    /// The guard rejected the target; the caller must rewrite the hash to
    /// the auth module, which re-enters this use case. The target module's
    /// loader was not invoked.
    RedirectedToAuth,
    /// The hash named no known module; nothing was loaded.
    UnknownModule(String),
    /// Navigation reached the loader.
    Loaded(LoadOutcome),
}

/// The hash router: single source of navigation truth.
///
/// Re-entrant and idempotent; navigating to the same hash twice produces
/// the same visible state. Each navigation claims a fresh load generation,
/// so a slower, earlier load can no longer overwrite a newer one.
pub struct Navigate {
    guard: SessionGuard,
    session: Arc<SessionStore>,
    container: Arc<dyn ContainerPort>,
    loader: Arc<LoadModule>,
}

impl Navigate {
    pub fn from_ports(
        session: Arc<SessionStore>,
        container: Arc<dyn ContainerPort>,
        loader: Arc<LoadModule>,
    ) -> Self {
        Self {
            guard: SessionGuard,
            session,
            container,
            loader,
        }
    }

    #[tracing::instrument(name = "usecase.navigate.execute", skip(self))]
    pub async fn execute(&self, hash: &str) -> NavigationOutcome {
        let route = match resolve_route(hash) {
            Ok(route) => route,
            Err(err) => {
                warn!(hash, error = %err, "hash resolves to no module");
                return NavigationOutcome::UnknownModule(hash.to_string());
            }
        };

        // A storage failure reads as "no token": the worst case is an
        // extra trip through the auth module, never a crash.
        let token = match self.session.token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "session read failed, treating as unauthenticated");
                None
            }
        };

        let route = match decide(route, &self.guard, token.as_deref()) {
            RouteDecision::Load(route) => route,
            RouteDecision::RedirectToAuth => {
                info!(hash, "unauthenticated navigation redirected to auth");
                return NavigationOutcome::RedirectedToAuth;
            }
        };

        self.container.set_active_nav(Some(route.module));

        let generation = self.loader.next_generation();
        NavigationOutcome::Loaded(self.loader.execute(&route, generation).await)
    }
}

/// Hash value the caller rewrites to after a redirect.
pub fn auth_hash() -> String {
    format!("#{}", ModuleId::Auth.as_str())
}
