use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::SyncError;

/// Local storage for downloaded assets.
///
/// Files land at `<images_dir>/<file_name>`, overwriting any previous copy.
/// The recorded path is a public raw URL when a prefix is configured,
/// otherwise the relative local path.
#[derive(Debug, Clone)]
pub struct AssetStore {
    images_dir: PathBuf,
    public_prefix: Option<String>,
}

impl AssetStore {
    pub fn new(images_dir: impl Into<PathBuf>, public_prefix: Option<String>) -> Self {
        Self {
            images_dir: images_dir.into(),
            public_prefix,
        }
    }

    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.images_dir.join(file_name)
    }

    /// Whether the asset already exists on disk.
    pub fn exists(&self, file_name: &str) -> bool {
        self.asset_path(file_name).is_file()
    }

    /// The path recorded in the manifest for this asset.
    pub fn recorded_path(&self, file_name: &str) -> String {
        match &self.public_prefix {
            Some(prefix) => format!("{prefix}/{file_name}"),
            None => self.asset_path(file_name).display().to_string(),
        }
    }

    /// Write the asset, creating directories first. The file handle is scoped
    /// to this call and flushed before it closes on every path.
    pub async fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<String, SyncError> {
        let path = self.asset_path(file_name);
        let persist_err = |source| SyncError::Persist {
            path: path.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.images_dir)
            .await
            .map_err(persist_err)?;

        {
            let mut file = tokio::fs::File::create(&path).await.map_err(persist_err)?;
            file.write_all(bytes).await.map_err(persist_err)?;
            file.flush().await.map_err(persist_err)?;
        }

        debug!(path = %path.display(), bytes = bytes.len(), "persisted asset");
        Ok(self.recorded_path(file_name))
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}
