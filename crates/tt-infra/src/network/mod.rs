mod asset_client;
mod notes_client;

pub use asset_client::HttpAssetClient;
pub use notes_client::NotesWorkerClient;
