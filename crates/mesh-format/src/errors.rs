use std::path::PathBuf;

use surface_types::MeshError;

/// Errors during mesh file loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("malformed mesh file: {0}")]
    FormatError(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

impl LoadError {
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound { path }
        } else {
            LoadError::Io {
                path,
                reason: err.to_string(),
            }
        }
    }
}
