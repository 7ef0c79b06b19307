use std::sync::Arc;

use media::AssetUrlBuilder;
use media::storage::AssetStore;

use crate::config::AppConfig;
use crate::ingest::ThumbnailLinker;
use crate::records::VideoStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub videos: Arc<dyn VideoStore>,
    pub assets: Arc<dyn AssetStore>,
    pub urls: AssetUrlBuilder,
}

impl AppState {
    pub fn new(config: AppConfig, videos: Arc<dyn VideoStore>, assets: Arc<dyn AssetStore>) -> Self {
        let urls = AssetUrlBuilder::new(config.public_origin());
        Self {
            config,
            videos,
            assets,
            urls,
        }
    }

    pub fn linker(&self) -> ThumbnailLinker<'_> {
        ThumbnailLinker::new(&*self.videos, &*self.assets, &self.urls)
    }
}
