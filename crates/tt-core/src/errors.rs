use thiserror::Error;

use crate::navigation::ModuleId;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no module registered for \"{0}\"")]
    UnknownModule(String),
}

/// Failure while loading a module into the shared container.
///
/// Always carries the module so the error block rendered into the container
/// can name what failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("module {module} is not present in the registry")]
    NotRegistered { module: ModuleId },

    #[error("fetching {path} for module {module} failed with status {status}")]
    AssetStatus {
        module: ModuleId,
        path: String,
        status: u16,
    },

    #[error("fetching {path} for module {module} failed: {source}")]
    AssetFetch {
        module: ModuleId,
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("script {url} for module {module} failed to load: {source}")]
    Script {
        module: ModuleId,
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("init of module {module} failed: {source}")]
    Init {
        module: ModuleId,
        #[source]
        source: anyhow::Error,
    },
}

impl LoadError {
    pub fn module(&self) -> ModuleId {
        match self {
            Self::NotRegistered { module }
            | Self::AssetStatus { module, .. }
            | Self::AssetFetch { module, .. }
            | Self::Script { module, .. }
            | Self::Init { module, .. } => *module,
        }
    }
}

#[derive(Debug, Error)]
pub enum NotesSyncError {
    #[error("notes worker returned status {0}")]
    Status(u16),

    #[error("notes worker reported failure: {0}")]
    Rejected(String),

    #[error("network error talking to notes worker: {0}")]
    Network(String),
}

/// Sealing or opening the notes blob failed.
///
/// Decrypt failures are routinely swallowed by the engine (treated as "no
/// data"); encrypt failures are not, the engine fails closed instead of
/// falling back to plaintext.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("no encryption key available")]
    NoKey,

    #[error("key derivation failed")]
    KdfFailed,

    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed")]
    DecryptFailed,

    #[error("ciphertext envelope is malformed: {0}")]
    Malformed(String),
}
