//! Token list provider boundary
//!
//! The provider does the actual work of refreshing token metadata and icons
//! for a network. The coordinator only cares whether it succeeded and keeps
//! whatever summary it returns.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use tracing::error;

use crate::Result;
use crate::TokenIconError;

#[async_trait]
pub trait TokenListProvider: Send + Sync {
    /// Synchronize token data for `network_id`, returning an opaque summary
    async fn synchronize(&self, network_id: u64) -> Result<Value>;
}

/// Provider reached over HTTP at `POST {base_url}/sync/{network_id}`
#[derive(Clone)]
pub struct HttpTokenListProvider {
    client: Client,
    base_url: String,
}

impl HttpTokenListProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to create provider client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &crate::AppConfig) -> Self {
        Self::new(&config.sync.provider_url, config.provider_timeout())
    }

    fn sync_url(&self, network_id: u64) -> String {
        format!("{}/sync/{network_id}", self.base_url)
    }
}

#[async_trait]
impl TokenListProvider for HttpTokenListProvider {
    async fn synchronize(&self, network_id: u64) -> Result<Value> {
        let url = self.sync_url(network_id);
        debug!("Calling token list provider at {}", url);

        let response = self.client.post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenIconError::Provider(format!(
                "provider returned {status} for network {network_id}: {body}"
            )));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
