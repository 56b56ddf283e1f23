use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset host returned status {0}")]
    Status(u16),

    #[error("asset fetch failed: {0}")]
    Network(String),
}

/// Fetches per-module markup documents from the asset host.
///
/// Paths are conventional, keyed by module name; the loader decides which
/// paths to ask for.
#[async_trait]
pub trait ModuleAssetPort: Send + Sync {
    async fn fetch_markup(&self, path: &str) -> Result<String, AssetError>;
}
