use std::io;

use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use futures::TryStreamExt;
use media::storage::BoxReader;
use tokio_util::io::StreamReader;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody, UploadStreamError};
use crate::extractors::auth::AuthUser;
use crate::models::video::VideoResponse;
use crate::state::AppState;

/// Largest request body accepted by the upload route.
pub const MAX_UPLOAD_BYTES: usize = 10 << 20; // 10 MiB

/// Multipart field that carries the thumbnail.
const THUMBNAIL_FIELD: &str = "thumbnail";

pub fn thumbnail_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_UPLOAD_BYTES)
}

#[utoipa::path(
    post,
    path = "/thumbnail_upload/{video_id}",
    tag = "Thumbnails",
    operation_id = "uploadThumbnail",
    summary = "Upload a thumbnail for a video",
    description = "Stores the `thumbnail` multipart field under a fresh random name and points \
        the video's `thumbnail_url` at it. Only `image/jpeg` and `image/png` are accepted. \
        Uploading again replaces the URL; the previous file is kept.",
    params(("video_id" = String, Path, description = "Video ID (UUID)")),
    request_body(content_type = "multipart/form-data", description = "`thumbnail` file field with its own Content-Type"),
    responses(
        (status = 200, description = "Thumbnail linked", body = VideoResponse),
        (status = 400, description = "Bad request (VALIDATION_ERROR, UNSUPPORTED_MEDIA_TYPE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, NOT_OWNER)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Body exceeds 10 MiB (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "Storage or record failure (INTERNAL_ERROR, PERSISTENCE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = %auth_user.user_id))]
pub async fn upload_thumbnail(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, AppError> {
    let video_id =
        Uuid::parse_str(&video_id).map_err(|_| AppError::Validation("Invalid video ID".into()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue; // Ignore unknown fields.
        }

        let content_type = field.content_type().map(str::to_owned);
        let stream = field.map_err(|e| io::Error::other(UploadStreamError::from(e)));
        let body: BoxReader<'_> = Box::new(StreamReader::new(Box::pin(stream)));

        let video = state
            .linker()
            .link(auth_user.user_id, video_id, content_type.as_deref(), body)
            .await?;

        return Ok(Json(VideoResponse::from(video)));
    }

    Err(AppError::Validation(format!(
        "Missing '{THUMBNAIL_FIELD}' field"
    )))
}
