//! Dependency grouping for terminal construction.
//!
//! This is NOT a Builder: no build steps, no default values, no hidden
//! logic. Just parameter grouping — the struct IS the dependency
//! manifest.

use std::sync::Arc;

use tt_core::ports::{
    ClockPort, ContainerPort, KeyValueStorePort, ModuleAssetPort, NotesCipherPort,
    NotesRemotePort, NotesViewPort, ScriptHostPort,
};

/// Everything the terminal shell needs to run. All dependencies are
/// required — no defaults, no optional fields.
pub struct TerminalDeps {
    // Shared durable storage (sessions, notes blob)
    pub store: Arc<dyn KeyValueStorePort>,

    // Module hosting
    pub assets: Arc<dyn ModuleAssetPort>,
    pub container: Arc<dyn ContainerPort>,
    pub script_host: Arc<dyn ScriptHostPort>,

    // Sticky notes
    pub remote: Arc<dyn NotesRemotePort>,
    pub cipher: Arc<dyn NotesCipherPort>,
    pub view: Arc<dyn NotesViewPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
}
