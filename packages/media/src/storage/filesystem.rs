use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use super::error::StorageError;
use super::traits::{AssetStore, BoxReader};
use crate::asset_id::AssetName;

const CHUNK_SIZE: usize = 64 * 1024;

/// Filesystem-backed asset store.
///
/// Assets live in a single flat directory: `{root}/{asset name}`.
/// Writes go straight to the final path; a failed write leaves the partial
/// file behind.
pub struct FilesystemAssetStore {
    root: PathBuf,
}

impl FilesystemAssetStore {
    /// Open the store, creating the root directory if it is absent.
    pub async fn new(root: PathBuf) -> Result<Self, StorageError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);
        builder.create(&root).await?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the filesystem path for a given asset.
    pub fn asset_path(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

#[async_trait]
impl AssetStore for FilesystemAssetStore {
    async fn put_stream(
        &self,
        name: &AssetName,
        mut reader: BoxReader<'_>,
    ) -> Result<u64, StorageError> {
        let path = self.asset_path(name);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total_bytes: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n]).await?;
            total_bytes += n as u64;
        }

        file.flush().await?;
        file.sync_all().await?;

        debug!(asset = %name, bytes = total_bytes, "asset written");
        Ok(total_bytes)
    }

    async fn get_stream(&self, name: &AssetName) -> Result<BoxReader<'static>, StorageError> {
        match fs::File::open(self.asset_path(name)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, name: &AssetName) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.asset_path(name)).await?)
    }
}
