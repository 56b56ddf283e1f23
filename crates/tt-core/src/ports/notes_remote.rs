use async_trait::async_trait;

use crate::errors::NotesSyncError;
use crate::ids::UserId;

/// The notes-sync worker.
///
/// The worker stores one opaque blob per user; the engine seals and opens
/// that blob, the worker never sees plaintext.
#[async_trait]
pub trait NotesRemotePort: Send + Sync {
    /// Fetch the stored blob for `user_id`. `None` means the worker has
    /// nothing for this user yet.
    async fn fetch_notes(&self, user_id: &UserId) -> Result<Option<String>, NotesSyncError>;

    /// Store `blob` for `user_id`, replacing whatever was there.
    async fn save_notes(&self, user_id: &UserId, blob: &str) -> Result<(), NotesSyncError>;
}
