use crate::notes::NoteList;
use crate::sync::SyncStatus;

/// Render surface for the notes panel and the screen-pinned notes.
pub trait NotesViewPort: Send + Sync {
    /// Full re-render: rebuild the list panel and all pinned notes from
    /// the given state.
    fn render(&self, lists: &[NoteList]);

    /// Remove the panel contents and hide all pinned notes (lock).
    fn clear(&self);

    fn set_status(&self, status: SyncStatus);

    /// Open the keep-local / keep-cloud choice.
    fn present_conflict(&self);

    fn open_delete_confirmation(&self, list: &NoteList);

    fn close_delete_confirmation(&self);
}
