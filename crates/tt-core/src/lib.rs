//! # tt-core
//!
//! Core domain models and business logic for the trading terminal shell.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies.

// Public module exports
pub mod config;
pub mod errors;
pub mod ids;
pub mod navigation;
pub mod notes;
pub mod ports;
pub mod session;
pub mod sync;

// Re-export commonly used types at the crate root
pub use config::TerminalConfig;
pub use errors::{CipherError, LoadError, NotesSyncError, RouteError};
pub use ids::{ListId, TaskId, UserId};
pub use navigation::{ModuleId, Route, RouteDecision};
pub use notes::{NoteColor, NoteList, NotesState, Task};
pub use session::{AuthMode, Session, SessionGuard};
pub use sync::{EngineLifecycle, SyncStatus};
