//! Manual origin shifts expressed in pixel units.
//!
//! Panning only rewrites georeferencing; pixel values are copied as-is.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::gdal_cli::aux_xml_path;
use crate::backend::RasterBackend;
use crate::driver::{require_driver, uses_header_sidecar};
use crate::error::{CoregError, Result};
use crate::grid::RasterGridDescriptor;
use crate::progress::{JobStage, ProgressReporter};
use crate::warp::TranslateRequest;

/// Move a grid by `dx_px` columns (positive = east) and `dy_px` rows
/// (positive = north). Fractional shifts are allowed.
pub fn shifted_grid(grid: &RasterGridDescriptor, dx_px: f64, dy_px: f64) -> RasterGridDescriptor {
    grid.with_origin(
        grid.origin_x + dx_px * grid.pixel_size_x,
        grid.origin_y + dy_px * grid.pixel_size_y,
    )
}

#[derive(Clone, Debug)]
pub struct PanOutcome {
    pub output: PathBuf,
    pub grid: RasterGridDescriptor,
    pub in_place: bool,
}

pub struct PixelPanner<'a> {
    backend: &'a dyn RasterBackend,
}

impl<'a> PixelPanner<'a> {
    pub fn new(backend: &'a dyn RasterBackend) -> Self {
        Self { backend }
    }

    /// Shift `raster` and write it to `output`, or back over `raster` when
    /// `output` is `None` or names the input.
    pub fn shift(
        &self,
        raster: &Path,
        dx_px: f64,
        dy_px: f64,
        output: Option<&Path>,
        reporter: &dyn ProgressReporter,
    ) -> Result<PanOutcome> {
        let destination = output.unwrap_or(raster);
        let in_place = same_file(destination, raster);
        let destination = if in_place { raster } else { destination };
        let output_format = require_driver(destination)?;
        // The scratch copy would carry its own header that never replaces
        // the input's, dropping the shift.
        if in_place && uses_header_sidecar(output_format) {
            debug!(path = %raster.display(), driver = output_format, "in-place rewrite needs a header side-car");
            return Err(CoregError::UnsupportedFormat(raster.to_path_buf()));
        }

        // Stale statistics would describe the old georeferencing.
        remove_if_exists(&aux_xml_path(raster))?;

        reporter.begin_stage(JobStage::Inspecting);
        let grid = self.backend.describe(raster)?;
        reporter.finish_stage();

        let shifted = shifted_grid(&grid, dx_px, dy_px);
        debug!(
            from_x = grid.origin_x,
            from_y = grid.origin_y,
            to_x = shifted.origin_x,
            to_y = shifted.origin_y,
            "shifting origin"
        );

        reporter.begin_stage(JobStage::Panning);
        if in_place {
            self.rewrite_in_place(raster, &shifted, output_format)?;
        } else {
            self.backend.translate(&TranslateRequest {
                source_path: raster.to_path_buf(),
                destination_path: destination.to_path_buf(),
                output_format: output_format.to_string(),
                assigned_bounds: shifted.extent(),
            })?;
        }
        reporter.finish_stage();

        remove_if_exists(&aux_xml_path(destination))?;
        info!(output = %destination.display(), dx_px, dy_px, "panning done");

        Ok(PanOutcome {
            output: destination.to_path_buf(),
            grid: shifted,
            in_place,
        })
    }

    /// The engine cannot read and write the same file, so the copy goes to a
    /// sibling temporary that replaces the input only once it is complete.
    fn rewrite_in_place(
        &self,
        raster: &Path,
        shifted: &RasterGridDescriptor,
        output_format: &str,
    ) -> Result<()> {
        let dir = match raster.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let suffix = raster
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let scratch = tempfile::Builder::new()
            .prefix(".coreg-pan-")
            .suffix(&suffix)
            .tempfile_in(&dir)?
            .into_temp_path();

        self.backend.translate(&TranslateRequest {
            source_path: raster.to_path_buf(),
            destination_path: scratch.to_path_buf(),
            output_format: output_format.to_string(),
            assigned_bounds: shifted.extent(),
        })?;

        remove_if_exists(&aux_xml_path(&scratch))?;
        scratch
            .persist(raster)
            .map_err(|e| CoregError::Io(e.error))?;
        Ok(())
    }
}

/// True when both paths name the same file. Paths that cannot be resolved
/// (such as a destination that does not exist yet) are compared as written.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed side-car");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GeoTransform;

    fn grid() -> RasterGridDescriptor {
        RasterGridDescriptor::from_geotransform(
            Path::new("in.tif"),
            GeoTransform([100.0, 10.0, 0.0, 200.0, 0.0, -5.0]),
            4,
            4,
            "",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_same_file_resolves_aliases() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let file = dir.path().join("scene.tif");
        std::fs::write(&file, b"x").unwrap();

        assert!(same_file(&file, &dir.path().join("sub/../scene.tif")));
        assert!(!same_file(&file, &dir.path().join("other.tif")));
        assert!(same_file(Path::new("missing.tif"), Path::new("missing.tif")));
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let g = grid();
        assert_eq!(shifted_grid(&g, 0.0, 0.0), g);
    }

    #[test]
    fn test_positive_shift_moves_east_and_north() {
        let s = shifted_grid(&grid(), 1.5, 2.0);
        assert_eq!(s.origin_x, 115.0);
        assert_eq!(s.origin_y, 210.0);
        assert_eq!(s.pixel_size_x, 10.0);
        assert_eq!(s.width_px, 4);
    }
}
