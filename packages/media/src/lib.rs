//! Asset addressing and storage primitives for the thumbnail gateway.
//!
//! Everything here is independent of HTTP and of the record store: the
//! content-type gate, the identifier allocator, the durable asset store and
//! the retrieval URL builder.

pub mod asset_id;
pub mod content_type;
pub mod storage;
pub mod url;

pub use asset_id::{AllocationError, AssetName, InvalidAssetName, allocate, allocate_with};
pub use content_type::{AllowedMediaType, ContentTypeError, classify};
pub use url::AssetUrlBuilder;
