use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;
use media::AssetName;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/assets/{name}",
    tag = "Assets",
    operation_id = "getAsset",
    summary = "Download a stored asset",
    description = "Streams a stored asset by the name embedded in its retrieval URL.",
    params(("name" = String, Path, description = "Asset name, `<identifier>.<ext>`")),
    responses(
        (status = 200, description = "Asset content"),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_asset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    // Names that could not have been allocated are never looked up on disk.
    let name = AssetName::parse(&name).map_err(|e| {
        tracing::debug!("Rejected asset name: {e}");
        AppError::NotFound("Asset not found".into())
    })?;

    let reader = state.assets.get_stream(&name).await?;
    let content_type = name
        .media_type()
        .map(|m| m.essence())
        .unwrap_or("application/octet-stream");

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(ReaderStream::new(reader)))
        .map_err(|e| AppError::Internal(e.to_string()))
}
