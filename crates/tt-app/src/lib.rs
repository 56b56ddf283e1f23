//! # tt-app
//!
//! Application layer of the trading terminal shell: use cases composed
//! from the ports in `tt-core`.

pub mod event;
pub mod registry;
pub mod script_cache;
pub mod usecases;

pub use event::{SessionEvent, SessionEvents};
pub use registry::{MarkupFragment, ModuleDescriptor, ModuleRegistry};
pub use script_cache::ScriptLoadCache;
pub use usecases::{
    ConflictChoice, LoadModule, LoadOutcome, Navigate, NavigationOutcome, NotesEngine,
    SessionStore,
};
