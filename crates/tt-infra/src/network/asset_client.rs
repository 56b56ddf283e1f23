use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use tt_core::ports::{AssetError, ModuleAssetPort};

/// Fetches module markup from the asset host over HTTP.
pub struct HttpAssetClient {
    client: Client,
    base_url: String,
}

impl HttpAssetClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AssetError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssetError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ModuleAssetPort for HttpAssetClient {
    async fn fetch_markup(&self, path: &str) -> Result<String, AssetError> {
        let url = self.url_for(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AssetError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AssetError::Network(e.to_string()))?;
        debug!(url, bytes = body.len(), "fetched module markup");
        Ok(body)
    }
}
