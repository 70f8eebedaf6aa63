//! Token icon lookup
//!
//! Icons are looked up in a fixed order: the remote object store (when
//! configured), then the local cache directory, then the default placeholder.
//! A store that errors is skipped rather than failing the request.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::Result;
use crate::TokenIconError;

pub mod content_type;
pub mod local;
pub mod remote;

pub use local::LocalImageStore;
pub use remote::RemoteImageStore;

/// Placeholder served when no store has the icon
pub const DEFAULT_ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><circle cx="32" cy="32" r="30" fill="#d9dce1"/><text x="32" y="40" font-family="sans-serif" font-size="24" text-anchor="middle" fill="#7b818c">?</text></svg>"##;

const MAX_ADDRESS_LEN: usize = 128;

/// Which tier served an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    Remote,
    Local,
    Default,
}

impl IconSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub extension: Option<String>,
    pub source: IconSource,
}

/// A place icons can be fetched from
#[async_trait]
pub trait ImageStore: Send + Sync {
    fn source(&self) -> IconSource;

    /// `Ok(None)` when the store simply does not have the icon
    async fn fetch(&self, network_id: u64, address: &str) -> Result<Option<IconImage>>;
}

/// Validate and lower-case a token address for use as a storage key
///
/// Accepts ASCII alphanumerics with an optional `0x` prefix, which also keeps
/// path separators and `..` out of filesystem lookups.
pub fn normalize_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if body.is_empty()
        || trimmed.len() > MAX_ADDRESS_LEN
        || !body.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(TokenIconError::InvalidAddress(address.to_string()));
    }

    Ok(trimmed.to_ascii_lowercase())
}

/// Three-tier icon resolver
pub struct IconResolver {
    stores: Vec<Arc<dyn ImageStore>>,
    default_icon: IconImage,
}

impl IconResolver {
    pub fn new(stores: Vec<Arc<dyn ImageStore>>, default_icon: IconImage) -> Self {
        Self {
            stores,
            default_icon,
        }
    }

    /// Build the remote/local/default chain from configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let mut stores: Vec<Arc<dyn ImageStore>> = Vec::new();

        if let Some(base_url) = &config.storage.remote_base_url {
            info!("Icon tier 1: object store at {}", base_url);
            stores.push(Arc::new(RemoteImageStore::new(
                base_url,
                config.remote_timeout(),
            )));
        }

        info!("Icon tier 2: local directory {}", config.storage.local_dir);
        stores.push(Arc::new(LocalImageStore::new(&config.storage.local_dir)));

        let default_icon = match &config.storage.default_icon {
            Some(path) => load_default_icon(Path::new(path)).await?,
            None => embedded_default_icon(),
        };

        Ok(Self::new(stores, default_icon))
    }

    /// Icon for an already-normalized address; always returns an image
    pub async fn resolve(&self, network_id: u64, address: &str) -> IconImage {
        for store in &self.stores {
            match store.fetch(network_id, address).await {
                Ok(Some(icon)) => return icon,
                Ok(None) => {}
                Err(e) => warn!(
                    "Icon store '{}' failed for {}/{}: {}",
                    store.source().as_str(),
                    network_id,
                    address,
                    e
                ),
            }
        }
        self.default_icon.clone()
    }
}

#[must_use]
pub fn embedded_default_icon() -> IconImage {
    IconImage {
        bytes: DEFAULT_ICON_SVG.as_bytes().to_vec(),
        content_type: content_type::content_type_for("svg").to_string(),
        extension: Some("svg".to_string()),
        source: IconSource::Default,
    }
}

async fn load_default_icon(path: &Path) -> Result<IconImage> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        TokenIconError::ConfigError(format!(
            "cannot read default icon {}: {e}",
            path.display()
        ))
    })?;
    let extension = path
        .to_str()
        .and_then(content_type::extension_of)
        .map(str::to_ascii_lowercase);
    let content_type = extension
        .as_deref()
        .map_or("application/octet-stream", content_type::content_type_for);

    Ok(IconImage {
        bytes,
        content_type: content_type.to_string(),
        extension,
        source: IconSource::Default,
    })
}
