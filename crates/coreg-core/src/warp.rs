//! Warp requests and the pure planning that derives them from a reference grid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::driver::driver_for_path;
use crate::grid::{Extent, RasterGridDescriptor};
use crate::resample::ResampleMethod;

/// How the aligner drives the warp engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignStrategy {
    /// One warp that reprojects, resamples and clips together.
    #[default]
    SinglePass,
    /// Reproject into a temporary raster first, then align it onto the
    /// reference grid. Falls back to a single pass when no reprojection
    /// is needed.
    TwoStage,
}

impl std::fmt::Display for AlignStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SinglePass => write!(f, "Single pass"),
            Self::TwoStage => write!(f, "Reproject then align"),
        }
    }
}

/// Caller-tunable knobs for an alignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignOptions {
    #[serde(default)]
    pub resampling: ResampleMethod,
    /// Overrides nodata on both source and destination.
    pub nodata: Option<f64>,
    /// Polygon layer used as cutline.
    pub mask: Option<PathBuf>,
    /// Explicit driver name; inferred from the output extension otherwise.
    pub output_format: Option<String>,
    #[serde(default)]
    pub strategy: AlignStrategy,
}

/// A single invocation of the warp engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarpRequest {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    /// Empty lets the engine read the source's own projection.
    pub source_projection: String,
    pub destination_projection: String,
    pub target_pixel_size_x: f64,
    pub target_pixel_size_y: f64,
    pub resample_method: ResampleMethod,
    /// `None` lets the engine size the output to the reprojected source.
    pub output_bounds: Option<Extent>,
    pub src_nodata: Option<f64>,
    pub dst_nodata: Option<f64>,
    pub cutline_path: Option<PathBuf>,
    pub output_format: Option<String>,
    /// Snap bounds to multiples of the pixel size. Never set for alignment.
    pub target_aligned_pixels: bool,
}

impl WarpRequest {
    /// Grid the engine will write, when the request pins output bounds.
    pub fn destination_grid(&self) -> Option<RasterGridDescriptor> {
        let bounds = self.output_bounds?;
        Some(RasterGridDescriptor {
            origin_x: bounds.min_x,
            origin_y: bounds.max_y,
            pixel_size_x: self.target_pixel_size_x,
            pixel_size_y: self.target_pixel_size_y,
            width_px: (bounds.width() / self.target_pixel_size_x).round() as u32,
            height_px: (bounds.height() / self.target_pixel_size_y).round() as u32,
            projection: self.destination_projection.clone(),
            nodata_value: self.dst_nodata,
            skew: (0.0, 0.0),
        })
    }
}

/// Derive the warp that puts `source` onto the grid of `reference`.
///
/// The destination projection is always the reference's; whether that
/// implies a reprojection is left to the engine. `options.mask` is passed
/// through untouched and must already be validated.
pub fn plan_alignment(
    reference: &RasterGridDescriptor,
    source_projection: &str,
    source: &Path,
    destination: &Path,
    options: &AlignOptions,
) -> WarpRequest {
    let (src_nodata, dst_nodata) = match options.nodata {
        Some(value) => (Some(value), Some(value)),
        None => (None, reference.nodata_value),
    };

    WarpRequest {
        source_path: source.to_path_buf(),
        destination_path: destination.to_path_buf(),
        source_projection: source_projection.to_string(),
        destination_projection: reference.projection.clone(),
        target_pixel_size_x: reference.pixel_size_x,
        target_pixel_size_y: reference.pixel_size_y,
        resample_method: options.resampling,
        output_bounds: Some(reference.extent()),
        src_nodata,
        dst_nodata,
        cutline_path: options.mask.clone(),
        output_format: resolve_format(destination, options),
        target_aligned_pixels: false,
    }
}

/// First leg of the two-stage path: reproject `source` at the reference
/// resolution without clipping.
pub fn plan_reprojection(
    reference: &RasterGridDescriptor,
    source_projection: &str,
    source: &Path,
    intermediate: &Path,
    options: &AlignOptions,
) -> WarpRequest {
    WarpRequest {
        source_path: source.to_path_buf(),
        destination_path: intermediate.to_path_buf(),
        source_projection: source_projection.to_string(),
        destination_projection: reference.projection.clone(),
        target_pixel_size_x: reference.pixel_size_x,
        target_pixel_size_y: reference.pixel_size_y,
        resample_method: options.resampling,
        output_bounds: None,
        src_nodata: options.nodata,
        dst_nodata: options.nodata,
        cutline_path: None,
        output_format: Some("GTiff".to_string()),
        target_aligned_pixels: false,
    }
}

fn resolve_format(destination: &Path, options: &AlignOptions) -> Option<String> {
    options
        .output_format
        .clone()
        .or_else(|| driver_for_path(destination).map(String::from))
}

/// A metadata-preserving copy with new georeferenced bounds assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub output_format: String,
    /// Bounds stamped on the copy; pixel data is not resampled.
    pub assigned_bounds: Extent,
}
