//! Error types for XaviEdit

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
///
/// A dismissed dialog is not an error: gateway calls report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),
}

impl EditorError {
    /// Classify an I/O failure on `path`, splitting out missing files
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            EditorError::NotFound(path)
        } else {
            EditorError::Io { path, source }
        }
    }
}
