use crate::asset_id::AssetName;

/// Path prefix under which assets are served.
pub const ASSET_PATH_PREFIX: &str = "/assets";

/// Builds public retrieval URLs for stored assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrlBuilder {
    origin: String,
}

impl AssetUrlBuilder {
    /// `origin` is scheme, host and port, e.g. `http://localhost:8080`.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn url_for(&self, name: &AssetName) -> String {
        format!("{}{}/{}", self.origin, ASSET_PATH_PREFIX, name)
    }
}
