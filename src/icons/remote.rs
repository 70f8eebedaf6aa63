//! Remote object store reached over HTTP

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use tracing::debug;
use tracing::error;

use super::content_type::content_type_for;
use super::content_type::ICON_EXTENSIONS;
use super::IconImage;
use super::IconSource;
use super::ImageStore;
use crate::Result;
use crate::TokenIconError;

/// Object store serving `{base_url}/{network}/{address}.{ext}`
pub struct RemoteImageStore {
    client: Client,
    base_url: String,
}

impl RemoteImageStore {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to create object store client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, network_id: u64, address: &str, extension: &str) -> String {
        format!("{}/{network_id}/{address}.{extension}", self.base_url)
    }
}

#[async_trait]
impl ImageStore for RemoteImageStore {
    fn source(&self) -> IconSource {
        IconSource::Remote
    }

    async fn fetch(&self, network_id: u64, address: &str) -> Result<Option<IconImage>> {
        for extension in ICON_EXTENSIONS {
            let url = self.url_for(network_id, address, extension);
            let response = self.client.get(&url).send().await?;
            let status = response.status();

            if status.is_success() {
                let bytes = response.bytes().await?;
                debug!("Serving icon from object store {}", url);
                return Ok(Some(IconImage {
                    bytes: bytes.to_vec(),
                    content_type: content_type_for(extension).to_string(),
                    extension: Some(extension.to_string()),
                    source: IconSource::Remote,
                }));
            }

            // Missing keys come back as 404 or, on S3 without list rights, 403
            if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
                continue;
            }

            return Err(TokenIconError::HttpError(format!(
                "object store returned {status} for {url}"
            )));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_layout() {
        let store = RemoteImageStore::new("https://cdn.example.com/icons/", Duration::from_secs(1));
        assert_eq!(
            store.url_for(10, "0xabc", "png"),
            "https://cdn.example.com/icons/10/0xabc.png"
        );
    }

    #[tokio::test]
    async fn test_unreachable_store_is_an_error() {
        let store = RemoteImageStore::new("http://127.0.0.1:9", Duration::from_millis(300));
        assert!(store.fetch(1, "0xabc").await.is_err());
    }
}
