use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use tt_core::errors::LoadError;
use tt_core::navigation::{ModuleId, Route};
use tt_core::ports::{AssetError, ContainerPort, ModuleAssetPort, ModuleBehaviorPort, ScriptHostPort};

use crate::registry::ModuleRegistry;
use crate::script_cache::ScriptLoadCache;

/// What a load attempt amounted to.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Module content is in the container and its init hook has run.
    Applied,
    /// A newer navigation superseded this load; nothing was applied.
    Stale,
    /// The load failed; an error block naming the module was rendered.
    Failed(LoadError),
}

struct ActiveModule {
    id: ModuleId,
    behavior: Option<Arc<dyn ModuleBehaviorPort>>,
}

/// Use case for loading a feature module into the shared container.
///
/// Owns the generation counter that navigations bump: a load whose
/// generation is no longer current when it returns from a suspension point
/// is discarded instead of applied, which is what keeps rapid hash changes
/// from interleaving their container writes.
pub struct LoadModule {
    registry: Arc<ModuleRegistry>,
    assets: Arc<dyn ModuleAssetPort>,
    container: Arc<dyn ContainerPort>,
    script_host: Arc<dyn ScriptHostPort>,
    scripts: Arc<ScriptLoadCache>,
    generation: AtomicU64,
    active: Mutex<Option<ActiveModule>>,
}

impl LoadModule {
    pub fn from_ports(
        registry: Arc<ModuleRegistry>,
        assets: Arc<dyn ModuleAssetPort>,
        container: Arc<dyn ContainerPort>,
        script_host: Arc<dyn ScriptHostPort>,
        scripts: Arc<ScriptLoadCache>,
    ) -> Self {
        Self {
            registry,
            assets,
            container,
            script_host,
            scripts,
            generation: AtomicU64::new(0),
            active: Mutex::new(None),
        }
    }

    /// Claim a new load generation, invalidating every load still in
    /// flight. Called by the router once per navigation.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Load the module named by `route` under the given generation.
    ///
    /// Failure policy: every error in the sequence is caught here, logged,
    /// and surfaced as an error block naming the module. Nothing
    /// propagates; there is no automatic retry.
    #[tracing::instrument(name = "usecase.load_module.execute", skip(self, route), fields(module = %route.module))]
    pub async fn execute(&self, route: &Route, generation: u64) -> LoadOutcome {
        match self.try_load(route, generation).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(module = %err.module(), error = %err, "module load failed");
                if !self.is_stale(generation) {
                    self.container.show_load_error(err.module());
                }
                LoadOutcome::Failed(err)
            }
        }
    }

    async fn try_load(&self, route: &Route, generation: u64) -> Result<LoadOutcome, LoadError> {
        let descriptor = self.registry.get(route.module)?.clone();

        // Fetch every markup fragment before touching the container, so a
        // stale load never leaves a half-applied surface behind.
        let mut fragments = Vec::with_capacity(descriptor.fragments.len());
        for fragment in &descriptor.fragments {
            let html = self
                .assets
                .fetch_markup(&fragment.path)
                .await
                .map_err(|e| Self::asset_error(route.module, &fragment.path, e))?;
            fragments.push((fragment.template_name.clone(), html));
        }

        if self.is_stale(generation) {
            debug!(module = %route.module, generation, "discarding stale module load");
            return Ok(LoadOutcome::Stale);
        }

        self.retire_active().await;

        self.container.clear();
        self.container.remove_module_stylesheet();
        self.container
            .set_auth_chrome_hidden(route.module == ModuleId::Auth);
        self.container
            .set_module_stylesheet(route.module, &descriptor.stylesheet);
        for (template_name, html) in &fragments {
            match template_name {
                Some(name) => self.container.append_template(name, html),
                None => self.container.append_markup(html),
            }
        }

        if let Some(script) = &descriptor.script {
            self.scripts
                .ensure_loaded(&self.script_host, script)
                .await
                .map_err(|source| LoadError::Script {
                    module: route.module,
                    url: script.clone(),
                    source,
                })?;

            if self.is_stale(generation) {
                debug!(module = %route.module, generation, "superseded while script loaded");
                return Ok(LoadOutcome::Stale);
            }
        }

        if let Some(behavior) = &descriptor.behavior {
            behavior
                .init(&route.query)
                .await
                .map_err(|source| LoadError::Init {
                    module: route.module,
                    source,
                })?;
        }

        *self.active.lock().await = Some(ActiveModule {
            id: route.module,
            behavior: descriptor.behavior.clone(),
        });

        info!(module = %route.module, "module loaded");
        Ok(LoadOutcome::Applied)
    }

    /// Invoke the outgoing module's cleanup hook. A failing cleanup is
    /// logged and does not abort the incoming load.
    async fn retire_active(&self) {
        let retired = self.active.lock().await.take();
        if let Some(active) = retired {
            if let Some(behavior) = active.behavior {
                if let Err(e) = behavior.cleanup().await {
                    warn!(module = %active.id, error = %e, "module cleanup failed");
                }
            }
        }
    }

    fn asset_error(module: ModuleId, path: &str, err: AssetError) -> LoadError {
        match err {
            AssetError::Status(status) => LoadError::AssetStatus {
                module,
                path: path.to_string(),
                status,
            },
            AssetError::Network(msg) => LoadError::AssetFetch {
                module,
                path: path.to_string(),
                source: anyhow::anyhow!(msg),
            },
        }
    }

    #[cfg(test)]
    fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }
}
