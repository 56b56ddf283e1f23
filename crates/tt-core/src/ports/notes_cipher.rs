use async_trait::async_trait;

use crate::errors::CipherError;
use crate::ids::UserId;
use crate::notes::NotesKey;

/// Seals and opens the serialized note collection.
///
/// Key derivation is deterministic over the user id and a fixed
/// application secret, so the same user always derives the same key; the
/// key itself is never persisted or transmitted.
#[async_trait]
pub trait NotesCipherPort: Send + Sync {
    async fn derive_key(&self, user_id: &UserId) -> Result<NotesKey, CipherError>;

    /// Encrypt `plaintext` into a self-describing string envelope.
    async fn seal(&self, key: &NotesKey, plaintext: &str) -> Result<String, CipherError>;

    /// Decrypt an envelope produced by [`seal`](Self::seal). Callers treat
    /// failure as "no data", not as a fatal condition.
    async fn open(&self, key: &NotesKey, envelope: &str) -> Result<String, CipherError>;
}
