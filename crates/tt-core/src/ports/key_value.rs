use anyhow::Result;
use async_trait::async_trait;

/// Durable string key-value store shared by the whole shell (the browser
/// localStorage equivalent).
///
/// Single-writer assumed; there is no cross-tab coordination, last write
/// wins.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
