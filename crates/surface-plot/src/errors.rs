use std::path::PathBuf;

use mesh_format::LoadError;
use surface_types::RangeError;

/// Errors from coloring faces by height.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorizeError {
    #[error("incorrect relation between vmin ({min}) and vmax ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("every face has mean height {value}; the color range is empty")]
    DegenerateRange { value: f64 },

    #[error("mesh has no faces to color")]
    NoFaces,
}

impl From<RangeError> for ColorizeError {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::Inverted { min, max } => ColorizeError::InvalidRange { min, max },
            RangeError::Degenerate { value } => ColorizeError::DegenerateRange { value },
        }
    }
}

/// Errors while writing an interactive document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("invalid output identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("scene serialization failed: {0}")]
    Serialization(String),

    #[error("failed to write {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

/// Any failure between selecting a file and holding a finished scene.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Colorize(#[from] ColorizeError),

    #[error("color table has {colors} entries for {faces} faces")]
    ColorTableMismatch { faces: usize, colors: usize },

    #[error(transparent)]
    Export(#[from] ExportError),
}
