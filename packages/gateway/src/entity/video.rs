use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Principal that owns the video. Only the owner may attach assets.
    pub user_id: Uuid,

    pub title: String,
    pub description: String,

    /// Retrieval URL of the current thumbnail; null until the first upload.
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
