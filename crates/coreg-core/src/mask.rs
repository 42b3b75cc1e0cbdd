//! Cutline mask validation.
//!
//! Masks are handed to the warp engine by path, so the only thing checked
//! up front is that the path names a readable file in a polygon-capable
//! vector format. Geometry validity is left to the engine.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoregError, Result};

const VECTOR_EXTENSIONS: &[&str] = &[
    "shp", "gpkg", "geojson", "json", "kml", "gml", "sqlite", "fgb",
];

/// Resolve `path` to a usable cutline, or fail with [`CoregError::MaskNotFound`].
pub fn validate_mask(path: &Path) -> Result<PathBuf> {
    let not_found = || CoregError::MaskNotFound(path.to_path_buf());

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(not_found)?;
    if !VECTOR_EXTENSIONS.contains(&ext.as_str()) {
        debug!(path = %path.display(), "mask extension is not a vector format");
        return Err(not_found());
    }

    if !path.is_file() || File::open(path).is_err() {
        return Err(not_found());
    }

    // A shapefile cannot be opened without its shape index.
    if ext == "shp" && !path.with_extension("shx").is_file() {
        debug!(path = %path.display(), "shapefile is missing its .shx index");
        return Err(not_found());
    }

    Ok(path.to_path_buf())
}
