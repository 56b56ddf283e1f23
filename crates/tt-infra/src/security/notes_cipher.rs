use argon2::Argon2;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{KeyInit, XChaCha20Poly1305, XNonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use tt_core::errors::CipherError;
use tt_core::notes::NotesKey;
use tt_core::ports::NotesCipherPort;
use tt_core::UserId;

const ENVELOPE_VERSION: u8 = 1;
const NONCE_LEN: usize = 24;

/// String envelope [`seal`](NotesCipherPort::seal) produces: small JSON
/// wrapper so future format changes stay self-describing.
#[derive(Serialize, Deserialize)]
struct SealedEnvelope {
    v: u8,
    nonce: String,
    ct: String,
}

/// XChaCha20-Poly1305 cipher over the serialized note collection.
///
/// The key is derived with Argon2id from the user id, salted with a
/// blake3 hash of the fixed application secret, so the same user always
/// derives the same key on any device without the key ever being stored.
pub struct NotesCipher {
    salt: [u8; 32],
}

impl NotesCipher {
    pub fn new(app_secret: &str) -> Self {
        Self {
            salt: *blake3::hash(app_secret.as_bytes()).as_bytes(),
        }
    }
}

#[async_trait]
impl NotesCipherPort for NotesCipher {
    async fn derive_key(&self, user_id: &UserId) -> Result<NotesKey, CipherError> {
        let mut okm = [0u8; 32];
        Argon2::default()
            .hash_password_into(user_id.as_ref().as_bytes(), &self.salt, &mut okm)
            .map_err(|_| CipherError::KdfFailed)?;
        NotesKey::from_bytes(&okm)
    }

    async fn seal(&self, key: &NotesKey, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|_| CipherError::EncryptFailed)?;
        let ciphertext = cipher
            .encrypt(XNonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| CipherError::EncryptFailed)?;

        let envelope = SealedEnvelope {
            v: ENVELOPE_VERSION,
            nonce: BASE64.encode(nonce),
            ct: BASE64.encode(ciphertext),
        };
        serde_json::to_string(&envelope).map_err(|_| CipherError::EncryptFailed)
    }

    async fn open(&self, key: &NotesKey, envelope: &str) -> Result<String, CipherError> {
        let envelope: SealedEnvelope = serde_json::from_str(envelope)
            .map_err(|e| CipherError::Malformed(e.to_string()))?;
        if envelope.v != ENVELOPE_VERSION {
            return Err(CipherError::Malformed(format!(
                "unknown envelope version {}",
                envelope.v
            )));
        }

        let nonce = BASE64
            .decode(&envelope.nonce)
            .map_err(|e| CipherError::Malformed(e.to_string()))?;
        if nonce.len() != NONCE_LEN {
            return Err(CipherError::Malformed(format!(
                "nonce length {}",
                nonce.len()
            )));
        }
        let ciphertext = BASE64
            .decode(&envelope.ct)
            .map_err(|e| CipherError::Malformed(e.to_string()))?;

        let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|_| CipherError::DecryptFailed)?;
        let plaintext = cipher
            .decrypt(XNonce::from_slice(&nonce), ciphertext.as_ref())
            .map_err(|_| CipherError::DecryptFailed)?;

        String::from_utf8(plaintext).map_err(|e| CipherError::Malformed(e.to_string()))
    }
}
