mod error;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filesystem::FilesystemAssetStore;
pub use traits::{AssetStore, BoxReader};
