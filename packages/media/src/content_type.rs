use std::fmt;

use mime_guess::mime::Mime;
use serde::Serialize;
use thiserror::Error;

/// Media types accepted for upload, with the file extension each is stored under.
const ALLOWED: &[AllowedMediaType] = &[
    AllowedMediaType {
        essence: "image/jpeg",
        extension: "jpeg",
    },
    AllowedMediaType {
        essence: "image/png",
        extension: "png",
    },
];

/// Why a declared content type was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentTypeError {
    #[error("missing content type")]
    Missing,

    #[error("malformed content type: {0:?}")]
    Malformed(String),

    #[error("unsupported media type: {0}")]
    Unsupported(String),
}

/// A media type that passed the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AllowedMediaType {
    essence: &'static str,
    extension: &'static str,
}

impl AllowedMediaType {
    /// The bare `type/subtype`, without parameters.
    pub fn essence(&self) -> &'static str {
        self.essence
    }

    /// Storage file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// Reverse lookup from a storage extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        ALLOWED
            .iter()
            .find(|allowed| allowed.extension == extension)
            .copied()
    }

    /// Every media type the gate accepts.
    pub fn all() -> &'static [AllowedMediaType] {
        ALLOWED
    }
}

impl fmt::Display for AllowedMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.essence)
    }
}

/// Classify a `Content-Type` header value against the allow-list.
///
/// Parameters such as `charset` are ignored. Anything that is not on the
/// allow-list is rejected; there is no fallback extension.
pub fn classify(raw: &str) -> Result<AllowedMediaType, ContentTypeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContentTypeError::Missing);
    }

    let mime: Mime = trimmed
        .parse()
        .map_err(|_| ContentTypeError::Malformed(trimmed.to_string()))?;
    let essence = mime.essence_str().to_ascii_lowercase();

    ALLOWED
        .iter()
        .find(|allowed| allowed.essence == essence)
        .copied()
        .ok_or(ContentTypeError::Unsupported(essence))
}
