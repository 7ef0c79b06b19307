use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use crate::asset_id::AssetName;

/// Type alias for a boxed async reader.
///
/// The lifetime lets callers hand over readers that borrow request state,
/// such as a multipart field.
pub type BoxReader<'a> = Box<dyn AsyncRead + Unpin + Send + 'a>;

/// Flat, name-addressed asset storage.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store bytes under `name` and return the number of bytes written.
    async fn put(&self, name: &AssetName, data: &[u8]) -> Result<u64, StorageError> {
        let reader: BoxReader<'static> = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(name, reader).await
    }

    /// Stream data from an async reader into a new asset called `name`.
    ///
    /// Never overwrites: an existing asset yields `StorageError::AlreadyExists`.
    async fn put_stream(&self, name: &AssetName, reader: BoxReader<'_>)
    -> Result<u64, StorageError>;

    /// Retrieve all bytes of an asset.
    async fn get(&self, name: &AssetName) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(name).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve an asset as a streaming async reader.
    async fn get_stream(&self, name: &AssetName) -> Result<BoxReader<'static>, StorageError>;

    /// Check whether an asset exists.
    async fn exists(&self, name: &AssetName) -> Result<bool, StorageError>;
}
