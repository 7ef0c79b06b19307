use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait};
use uuid::Uuid;

use crate::entity::video;

/// Store of owned video records.
///
/// The gateway only reads a record and rewrites its asset fields; records are
/// created and deleted elsewhere.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<video::Model>, DbErr>;

    /// Persist the record's `thumbnail_url` and `updated_at`, returning the
    /// stored row. Other columns are left as they are in the database.
    async fn update(&self, video: video::Model) -> Result<video::Model, DbErr>;
}

/// `VideoStore` backed by the `video` table.
#[derive(Clone)]
pub struct DbVideoStore {
    db: DatabaseConnection,
}

impl DbVideoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoStore for DbVideoStore {
    async fn get(&self, id: Uuid) -> Result<Option<video::Model>, DbErr> {
        video::Entity::find_by_id(id).one(&self.db).await
    }

    async fn update(&self, video: video::Model) -> Result<video::Model, DbErr> {
        let active = video::ActiveModel {
            id: Unchanged(video.id),
            thumbnail_url: Set(video.thumbnail_url),
            updated_at: Set(video.updated_at),
            ..Default::default()
        };
        active.update(&self.db).await
    }
}
