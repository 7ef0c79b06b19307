use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use media::ContentTypeError;
use media::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::ingest::IngestError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `UNSUPPORTED_MEDIA_TYPE`, `TOKEN_MISSING`, `TOKEN_INVALID`, `NOT_OWNER`,
    /// `NOT_FOUND`, `PAYLOAD_TOO_LARGE`, `PERSISTENCE_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "UNSUPPORTED_MEDIA_TYPE")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Unsupported media type: text/plain")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    UnsupportedMediaType(String),
    TokenMissing,
    TokenInvalid,
    /// Authenticated, but not the owner of the target record.
    NotOwner,
    NotFound(String),
    PayloadTooLarge(String),
    /// The asset was written but the record could not be updated.
    Persistence(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "UNSUPPORTED_MEDIA_TYPE",
                    message: msg,
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            AppError::NotOwner => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "NOT_OWNER",
                    message: "You do not own this video".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: msg,
                },
            ),
            AppError::Persistence(detail) => {
                tracing::error!("Persistence error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "PERSISTENCE_ERROR",
                        message: "Thumbnail was stored but the video could not be updated".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::from(&UploadStreamError::from(err))
    }
}

impl From<&UploadStreamError> for AppError {
    fn from(err: &UploadStreamError) -> Self {
        if err.status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.message.clone())
        } else {
            AppError::Validation(format!("Multipart error: {}", err.message))
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AppError::NotFound("Asset not found".into()),
            StorageError::Io(io) => {
                // The client's body stream failed, not the disk.
                match io.get_ref().and_then(|e| e.downcast_ref::<UploadStreamError>()) {
                    Some(upload) => AppError::from(upload),
                    None => AppError::Internal(format!("Storage IO error: {io}")),
                }
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<ContentTypeError> for AppError {
    fn from(err: ContentTypeError) -> Self {
        match err {
            ContentTypeError::Missing => {
                AppError::Validation("Missing Content-Type for thumbnail".into())
            }
            ContentTypeError::Malformed(raw) => {
                AppError::Validation(format!("Malformed Content-Type: {raw:?}"))
            }
            ContentTypeError::Unsupported(essence) => {
                AppError::UnsupportedMediaType(format!("Unsupported media type: {essence}"))
            }
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::NotFound(id) => AppError::NotFound(format!("Video {id} not found")),
            IngestError::NotOwner { .. } => AppError::NotOwner,
            IngestError::ContentType(e) => AppError::from(e),
            IngestError::Allocation(e) => AppError::Internal(e.to_string()),
            IngestError::Write { source, .. } => AppError::from(source),
            IngestError::Lookup(e) => AppError::from(e),
            err @ IngestError::Persist { .. } => AppError::Persistence(err.to_string()),
        }
    }
}

/// A request-body failure carried through the `io::Error` of an upload stream,
/// so it is reported as a client error rather than a storage failure.
#[derive(Debug)]
pub struct UploadStreamError {
    status: StatusCode,
    message: String,
}

impl From<MultipartError> for UploadStreamError {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl std::fmt::Display for UploadStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upload stream error: {}", self.message)
    }
}

impl std::error::Error for UploadStreamError {}
