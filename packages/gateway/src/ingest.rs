//! Ownership-checked thumbnail ingestion.
//!
//! An upload moves through a fixed sequence of states, each a distinct type:
//!
//! ```text
//! [AuthPending] ──authenticate──→ [OwnershipPending] ──verify_ownership──→ [TypePending]
//!      ──classify──→ [WritePending] ──write──→ [Written] ──commit──→ updated record
//! ```
//!
//! Every transition consumes the previous state, and each fallible one
//! returns `Err(IngestError)` to abort. Nothing touches storage before the
//! caller is known to own the record and the media type has been accepted.

use chrono::Utc;
use media::storage::{AssetStore, BoxReader, StorageError};
use media::{AllocationError, AllowedMediaType, AssetName, AssetUrlBuilder, ContentTypeError};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::entity::video;
use crate::records::VideoStore;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("video {0} not found")]
    NotFound(Uuid),

    #[error("user {principal} does not own video {video_id}")]
    NotOwner { principal: Uuid, video_id: Uuid },

    #[error(transparent)]
    ContentType(#[from] ContentTypeError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("failed to store asset {asset}: {source}")]
    Write {
        asset: AssetName,
        source: StorageError,
    },

    #[error("failed to load video: {0}")]
    Lookup(#[source] DbErr),

    /// The asset is on disk but no record points at it.
    #[error("asset {asset} stored but video update failed: {source}")]
    Persist { asset: AssetName, source: DbErr },
}

/// Waiting for the caller's verified identity.
#[derive(Debug, Default)]
pub struct AuthPending;

#[derive(Debug)]
pub struct OwnershipPending {
    principal: Uuid,
}

#[derive(Debug)]
pub struct TypePending {
    video: video::Model,
}

#[derive(Debug)]
pub struct WritePending {
    video: video::Model,
    media: AllowedMediaType,
}

#[derive(Debug)]
pub struct Written {
    video: video::Model,
    asset: AssetName,
    bytes: u64,
}

/// One upload's progress through the ingestion states.
#[derive(Debug, Default)]
pub struct Ingest<S> {
    state: S,
}

impl Ingest<AuthPending> {
    pub fn new() -> Self {
        Self { state: AuthPending }
    }

    /// Accept the principal resolved by the bearer-token verifier.
    pub fn authenticate(self, principal: Uuid) -> Ingest<OwnershipPending> {
        Ingest {
            state: OwnershipPending { principal },
        }
    }
}

impl Ingest<OwnershipPending> {
    /// Load the target record and require that the principal owns it.
    pub async fn verify_ownership(
        self,
        videos: &dyn VideoStore,
        video_id: Uuid,
    ) -> Result<Ingest<TypePending>, IngestError> {
        let principal = self.state.principal;
        let video = videos
            .get(video_id)
            .await
            .map_err(IngestError::Lookup)?
            .ok_or(IngestError::NotFound(video_id))?;

        if video.user_id != principal {
            warn!(%principal, %video_id, owner = %video.user_id, "upload rejected: not the owner");
            return Err(IngestError::NotOwner {
                principal,
                video_id,
            });
        }

        Ok(Ingest {
            state: TypePending { video },
        })
    }
}

impl Ingest<TypePending> {
    /// Run the declared content type through the allow-list.
    pub fn classify(self, content_type: Option<&str>) -> Result<Ingest<WritePending>, IngestError> {
        let media = media::classify(content_type.unwrap_or_default())?;
        Ok(Ingest {
            state: WritePending {
                video: self.state.video,
                media,
            },
        })
    }
}

impl Ingest<WritePending> {
    /// Allocate a fresh asset name and stream the body into storage.
    ///
    /// A failed write leaves the record untouched; any partial file stays
    /// where it is.
    pub async fn write(
        self,
        assets: &dyn AssetStore,
        body: BoxReader<'_>,
    ) -> Result<Ingest<Written>, IngestError> {
        let asset = media::allocate(self.state.media)?;
        let bytes = match assets.put_stream(&asset, body).await {
            Ok(bytes) => bytes,
            Err(source) => return Err(IngestError::Write { asset, source }),
        };

        Ok(Ingest {
            state: Written {
                video: self.state.video,
                asset,
                bytes,
            },
        })
    }
}

impl Ingest<Written> {
    pub fn asset(&self) -> &AssetName {
        &self.state.asset
    }

    pub fn bytes(&self) -> u64 {
        self.state.bytes
    }

    /// Point the record at the stored asset.
    ///
    /// Not transactional with the write: if the update fails the asset is
    /// left orphaned and reported through `IngestError::Persist`.
    pub async fn commit(
        self,
        videos: &dyn VideoStore,
        urls: &AssetUrlBuilder,
    ) -> Result<video::Model, IngestError> {
        let Written {
            mut video,
            asset,
            bytes,
        } = self.state;

        video.thumbnail_url = Some(urls.url_for(&asset));
        video.updated_at = Utc::now();

        match videos.update(video).await {
            Ok(updated) => {
                info!(video_id = %updated.id, %asset, bytes, "thumbnail linked");
                Ok(updated)
            }
            Err(source) => {
                warn!(%asset, error = %source, "asset stored but video update failed; asset is orphaned");
                Err(IngestError::Persist { asset, source })
            }
        }
    }
}

/// Runs the full ingestion pipeline against a record store and an asset store.
pub struct ThumbnailLinker<'a> {
    videos: &'a dyn VideoStore,
    assets: &'a dyn AssetStore,
    urls: &'a AssetUrlBuilder,
}

impl<'a> ThumbnailLinker<'a> {
    pub fn new(
        videos: &'a dyn VideoStore,
        assets: &'a dyn AssetStore,
        urls: &'a AssetUrlBuilder,
    ) -> Self {
        Self {
            videos,
            assets,
            urls,
        }
    }

    /// Store `body` as the thumbnail of `video_id` on behalf of `principal`.
    #[instrument(skip(self, content_type, body))]
    pub async fn link(
        &self,
        principal: Uuid,
        video_id: Uuid,
        content_type: Option<&str>,
        body: BoxReader<'_>,
    ) -> Result<video::Model, IngestError> {
        Ingest::new()
            .authenticate(principal)
            .verify_ownership(self.videos, video_id)
            .await?
            .classify(content_type)?
            .write(self.assets, body)
            .await?
            .commit(self.videos, self.urls)
            .await
    }
}
