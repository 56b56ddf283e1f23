use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tt_core::ports::KeyValueStorePort;

/// File-backed key-value store: one JSON object per file, written
/// atomically (tmp + rename). The durable-storage equivalent of the
/// browser's localStorage, and just as single-writer.
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Default store location under the platform data dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("tradeterm").join("storage.json"))
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create storage dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn read_map(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parse storage file failed: {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => {
                Err(e).with_context(|| format!("read storage file failed: {}", self.path.display()))
            }
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        self.ensure_parent_dir().await?;
        let content = serde_json::to_string_pretty(map).context("serialize storage map failed")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content.as_bytes())
            .await
            .with_context(|| format!("write storage tmp failed: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("rename storage file failed: {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path().join("storage.json"))
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set("session.token", "tok-1").await.unwrap();
        assert_eq!(
            store.get("session.token").await.unwrap().as_deref(),
            Some("tok-1")
        );
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_a_new_store_over_the_same_file() {
        let dir = TempDir::new().unwrap();
        store(&dir).set("k", "v").await.unwrap();

        let reopened = store(&dir);
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn remove_drops_only_the_named_key() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();

        store.remove("a").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn removing_an_absent_key_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.remove("ghost").await.unwrap();
    }
}
