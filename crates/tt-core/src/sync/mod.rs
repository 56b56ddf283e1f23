//! Notes engine lifecycle and sync status.

mod state;
mod status;

pub use state::EngineLifecycle;
pub use status::SyncStatus;
