use anyhow::Result;
use async_trait::async_trait;

/// Behavior a module registers alongside its assets.
///
/// This replaces the original convention of looking up a globally named
/// init function per module: the registry holds a capability record, and a
/// module without behavior simply registers none.
#[async_trait]
pub trait ModuleBehaviorPort: Send + Sync {
    /// Called once the module's markup is in the container and its script
    /// (if any) has loaded. `query` is the hash query string, used by the
    /// auth module for mode dispatch.
    async fn init(&self, query: &str) -> Result<()>;

    /// Called when the module is about to be replaced by another one.
    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}
