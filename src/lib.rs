//! # tradeterm
//!
//! Trading-terminal shell: a hash-routed module host with a guarded
//! session layer and a local-first encrypted sticky-notes engine.
//!
//! The library is split hexagonally: `tt-core` holds the pure domain
//! and the port traits, `tt-app` composes them into use cases, and
//! `tt-infra` provides the file/HTTP/crypto adapters. This crate wires
//! the three together into a runnable [`Terminal`].

pub mod deps;
pub mod terminal;

pub use deps::TerminalDeps;
pub use terminal::Terminal;

pub use tt_app::{
    ConflictChoice, LoadOutcome, ModuleDescriptor, ModuleRegistry, NavigationOutcome,
    SessionEvent, SessionEvents,
};
pub use tt_core::{ModuleId, Session, SyncStatus, TerminalConfig};
pub use tt_infra::{
    load_config, FileKeyValueStore, HttpAssetClient, MemoryKeyValueStore, NotesCipher,
    NotesWorkerClient, SystemClock,
};
