//! Explicit module registry.
//!
//! Replaces convention-based global function lookup: every hostable module
//! is described by a record populated at startup, and asking for an
//! unregistered module is a structured error instead of a silent no-op.

use std::collections::HashMap;
use std::sync::Arc;

use tt_core::errors::LoadError;
use tt_core::navigation::ModuleId;
use tt_core::ports::ModuleBehaviorPort;
use tt_core::TerminalConfig;

/// One markup fragment of a module: the path it is fetched from, and the
/// template-holder name to wrap it in (None = append directly).
#[derive(Debug, Clone)]
pub struct MarkupFragment {
    pub path: String,
    pub template_name: Option<String>,
}

impl MarkupFragment {
    pub fn direct(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            template_name: None,
        }
    }

    pub fn template(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            template_name: Some(name.into()),
        }
    }
}

/// Everything the loader needs to host a module.
#[derive(Clone)]
pub struct ModuleDescriptor {
    pub id: ModuleId,
    pub fragments: Vec<MarkupFragment>,
    pub stylesheet: String,
    /// Script to ensure-load before init; deduplicated process-wide.
    pub script: Option<String>,
    /// Post-load behavior; modules that are pure markup register none.
    pub behavior: Option<Arc<dyn ModuleBehaviorPort>>,
}

impl std::fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("id", &self.id)
            .field("fragments", &self.fragments)
            .field("stylesheet", &self.stylesheet)
            .field("script", &self.script)
            .field("behavior", &self.behavior.as_ref().map(|_| "<dyn ModuleBehaviorPort>"))
            .finish()
    }
}

impl ModuleDescriptor {
    /// Descriptor with the conventional single-markup layout for `id`.
    pub fn conventional(id: ModuleId) -> Self {
        let name = id.as_str();
        Self {
            id,
            fragments: vec![MarkupFragment::direct(TerminalConfig::markup_path(name))],
            stylesheet: TerminalConfig::stylesheet_path(name),
            script: None,
            behavior: None,
        }
    }

    pub fn with_script(mut self, url: impl Into<String>) -> Self {
        self.script = Some(url.into());
        self
    }

    pub fn with_behavior(mut self, behavior: Arc<dyn ModuleBehaviorPort>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// The auth module fetches four sub-view fragments, each parked in an
    /// inert template holder until its script picks one.
    pub fn auth() -> Self {
        let base = "modules/auth";
        Self {
            id: ModuleId::Auth,
            fragments: ["login", "signup", "forgot-password", "reset-password"]
                .into_iter()
                .map(|view| MarkupFragment::template(view, format!("{base}/{view}.html")))
                .collect(),
            stylesheet: TerminalConfig::stylesheet_path("auth"),
            script: Some(TerminalConfig::script_path("auth")),
            behavior: None,
        }
    }
}

/// Registry mapping module ids to descriptors. Populated once at startup.
#[derive(Default, Clone)]
pub struct ModuleRegistry {
    modules: HashMap<ModuleId, ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ModuleDescriptor) {
        self.modules.insert(descriptor.id, descriptor);
    }

    pub fn get(&self, id: ModuleId) -> Result<&ModuleDescriptor, LoadError> {
        self.modules
            .get(&id)
            .ok_or(LoadError::NotRegistered { module: id })
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }
}
