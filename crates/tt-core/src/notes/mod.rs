//! Sticky-notes domain: models, key material and the engine's state with
//! its id-addressed mutations.

mod key;
mod model;
mod state;

pub use key::NotesKey;
pub use model::{NoteColor, NoteList, Task};
pub use state::{NotesSnapshot, NotesState, Reconciliation};

/// Durable key under which the encrypted notes blob is stored, suffixed
/// with the owning user id so accounts never read each other's blobs.
pub fn notes_blob_key(user_id: &crate::ids::UserId) -> String {
    format!("notes.blob.{}", user_id)
}
