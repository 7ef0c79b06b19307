use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::video::VideoResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/videos/{video_id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Get a video record",
    description = "Returns the video, including its current thumbnail URL. Owner only.",
    params(("video_id" = String, Path, description = "Video ID (UUID)")),
    responses(
        (status = 200, description = "Video record", body = VideoResponse),
        (status = 400, description = "Malformed video ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, NOT_OWNER)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<VideoResponse>, AppError> {
    let video_id =
        Uuid::parse_str(&video_id).map_err(|_| AppError::Validation("Invalid video ID".into()))?;

    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {video_id} not found")))?;

    if video.user_id != auth_user.user_id {
        return Err(AppError::NotOwner);
    }

    Ok(Json(VideoResponse::from(video)))
}
