use crate::errors::CipherError;

/// Symmetric key protecting the notes blob.
///
/// Derived deterministically from the user id and a fixed application
/// secret; held in memory only, never serialized and never transmitted.
#[derive(Clone, PartialEq, Eq)]
pub struct NotesKey([u8; 32]);

impl NotesKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CipherError::Malformed(format!("key length {}", bytes.len())))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for NotesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.write_str("NotesKey(..)")
    }
}
