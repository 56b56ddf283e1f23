//! Business logic use cases.
//!
//! Navigation is a straight pipeline:
//!
//! [hash change]
//!        ↓
//! Navigate (guard, nav marker, generation claim)
//!        ↓
//! LoadModule (assets, script cache, behavior init/cleanup)
//!
//! The notes engine runs beside it, woken by session events with the
//! identity poll as fallback.

pub mod load_module;
pub mod navigate;
pub mod notes;
pub mod session;

pub use load_module::{LoadModule, LoadOutcome};
pub use navigate::{Navigate, NavigationOutcome};
pub use notes::{ConflictChoice, NotesEngine};
pub use session::SessionStore;
