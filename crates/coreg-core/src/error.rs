use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoregError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster {}: {reason}", .path.display())]
    InvalidRaster { path: PathBuf, reason: String },

    #[error("Mask layer not found or unreadable: {}", .0.display())]
    MaskNotFound(PathBuf),

    #[error("Warp failed: {0}")]
    WarpExecution(String),

    #[error("Shift estimation failed: {0}")]
    ShiftEstimation(String),

    #[error("Unsupported raster format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Malformed raster metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoregError {
    pub(crate) fn invalid_raster(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidRaster {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoregError>;
