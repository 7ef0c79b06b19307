use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::video;

/// Response DTO for a video record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoResponse {
    #[schema(example = "0b6f6c2a-6f55-4b0e-a3c4-3f1f7f6b7d2e")]
    pub id: String,
    /// Owner of the video.
    #[schema(example = "7d1b0c43-9d59-4f0b-bb4c-8d1c9e0b2f71")]
    pub user_id: String,
    #[schema(example = "Boot camp, day one")]
    pub title: String,
    pub description: String,
    /// Retrieval URL of the current thumbnail, if one has been uploaded.
    #[schema(example = "http://localhost:8080/assets/3q2-7wAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA.jpeg")]
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<video::Model> for VideoResponse {
    fn from(model: video::Model) -> Self {
        Self {
            id: model.id.to_string(),
            user_id: model.user_id.to_string(),
            title: model.title,
            description: model.description,
            thumbnail_url: model.thumbnail_url,
            video_url: model.video_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
