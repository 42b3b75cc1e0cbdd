pub mod gdal_cli;

use std::path::Path;

use crate::error::Result;
use crate::grid::RasterGridDescriptor;
use crate::warp::{TranslateRequest, WarpRequest};

pub use gdal_cli::GdalCli;

/// Raster engine the aligner and panner delegate all pixel work to.
pub trait RasterBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Read the grid of a raster. Unreadable or degenerate rasters fail
    /// with `CoregError::InvalidRaster`.
    fn describe(&self, path: &Path) -> Result<RasterGridDescriptor>;

    /// Execute one warp, writing `request.destination_path`.
    fn warp(&self, request: &WarpRequest) -> Result<()>;

    /// Copy a raster with new bounds assigned, pixel data untouched.
    fn translate(&self, request: &TranslateRequest) -> Result<()>;
}
