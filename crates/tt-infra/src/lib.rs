//! # tt-infra
//!
//! Infrastructure adapters for the trading terminal shell: durable
//! storage, crypto, HTTP clients, clock and configuration loading.

pub mod config;
pub mod network;
pub mod security;
pub mod storage;
pub mod time;

pub use config::load_config;
pub use network::{HttpAssetClient, NotesWorkerClient};
pub use security::NotesCipher;
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
pub use time::SystemClock;
