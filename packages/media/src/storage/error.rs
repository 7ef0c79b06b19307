use std::fmt;

/// Errors that can occur during asset storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested asset was not found.
    NotFound(String),
    /// An asset with this name already exists and was left untouched.
    AlreadyExists(String),
    /// An I/O error occurred, either reading the source or writing the file.
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "asset not found: {name}"),
            Self::AlreadyExists(name) => write!(f, "asset already exists: {name}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
