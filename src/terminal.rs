use std::sync::Arc;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::info;
use tt_app::usecases::notes::spawn_identity_poll;
use tt_app::{
    LoadModule, ModuleDescriptor, ModuleRegistry, Navigate, NavigationOutcome, NotesEngine,
    ScriptLoadCache, SessionEvents, SessionStore,
};
use tt_core::{ModuleId, TerminalConfig};

use crate::deps::TerminalDeps;

/// The assembled terminal shell: router, loader, session store and notes
/// engine wired over one set of ports.
pub struct Terminal {
    config: TerminalConfig,
    events: SessionEvents,
    session: Arc<SessionStore>,
    navigate: Navigate,
    notes: Arc<NotesEngine>,
}

impl Terminal {
    /// This constructor signature is the dependency manifest; all wiring
    /// happens here and nowhere else.
    pub fn new(config: TerminalConfig, registry: ModuleRegistry, deps: TerminalDeps) -> Self {
        let events = SessionEvents::new();
        let session = Arc::new(SessionStore::from_ports(deps.store.clone(), events.clone()));

        let loader = Arc::new(LoadModule::from_ports(
            Arc::new(registry),
            deps.assets,
            deps.container.clone(),
            deps.script_host,
            Arc::new(ScriptLoadCache::new()),
        ));
        let navigate = Navigate::from_ports(session.clone(), deps.container, loader);

        let notes = Arc::new(NotesEngine::from_ports(
            deps.store,
            deps.remote,
            deps.cipher,
            deps.view,
            deps.clock,
        ));

        info!("terminal assembled");
        Self {
            config,
            events,
            session,
            navigate,
            notes,
        }
    }

    /// The module set the shell ships with. Auth carries its four-fragment
    /// descriptor; everything else follows the conventional layout.
    pub fn default_registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        for module in ModuleId::all() {
            registry.register(match module {
                ModuleId::Auth => ModuleDescriptor::auth(),
                other => ModuleDescriptor::conventional(other),
            });
        }
        registry
    }

    /// Route a hash change. On [`NavigationOutcome::RedirectedToAuth`] the
    /// caller rewrites the hash to [`tt_app::usecases::navigate::auth_hash`]
    /// and calls this again, mirroring a browser's hashchange re-entry.
    pub async fn navigate(&self, hash: &str) -> NavigationOutcome {
        self.navigate.execute(hash).await
    }

    /// Start the notes engine's identity poll. Session events short-cut
    /// the interval.
    pub fn start_identity_poll(&self) -> AbortHandle {
        spawn_identity_poll(
            self.notes.clone(),
            &self.events,
            Duration::from_secs(self.config.identity_poll_secs),
        )
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notes(&self) -> &Arc<NotesEngine> {
        &self.notes
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_module() {
        let registry = Terminal::default_registry();
        for module in ModuleId::all() {
            assert!(registry.contains(module), "missing {module:?}");
        }
    }
}
