use anyhow::Result;
use async_trait::async_trait;

/// Inserts a module script into the host document.
///
/// Callers must go through the application layer's script cache, which
/// guarantees a given URL is inserted at most once per process.
#[async_trait]
pub trait ScriptHostPort: Send + Sync {
    /// Insert the script tag for `url` and resolve once it has executed.
    async fn insert_script(&self, url: &str) -> Result<()>;
}
