//! Local filesystem icon cache

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::content_type::content_type_for;
use super::content_type::ICON_EXTENSIONS;
use super::IconImage;
use super::IconSource;
use super::ImageStore;
use crate::Result;

/// Icons stored as `<root>/<network>/<address>.<ext>`
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, network_id: u64, address: &str, extension: &str) -> PathBuf {
        self.root
            .join(network_id.to_string())
            .join(format!("{address}.{extension}"))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    fn source(&self) -> IconSource {
        IconSource::Local
    }

    async fn fetch(&self, network_id: u64, address: &str) -> Result<Option<IconImage>> {
        for extension in ICON_EXTENSIONS {
            let path = self.path_for(network_id, address, extension);
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    debug!("Serving icon from {}", path.display());
                    return Ok(Some(IconImage {
                        bytes,
                        content_type: content_type_for(extension).to_string(),
                        extension: Some(extension.to_string()),
                        source: IconSource::Local,
                    }));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }
}
