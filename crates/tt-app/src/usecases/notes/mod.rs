//! The sticky-notes engine and its poll driver.

mod engine;
mod poller;

pub use engine::{ConflictChoice, NotesEngine};
pub use poller::spawn_identity_poll;
