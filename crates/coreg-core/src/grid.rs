//! Geospatial grid description of a raster.
//!
//! Only north-up grids are modelled: the rotation terms of the affine
//! geotransform are read and carried along, but every extent computation
//! ignores them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoregError, Result};

/// GDAL-ordered affine geotransform:
/// `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub fn origin_x(&self) -> f64 {
        self.0[0]
    }

    pub fn pixel_width(&self) -> f64 {
        self.0[1]
    }

    pub fn row_rotation(&self) -> f64 {
        self.0[2]
    }

    pub fn origin_y(&self) -> f64 {
        self.0[3]
    }

    pub fn column_rotation(&self) -> f64 {
        self.0[4]
    }

    pub fn pixel_height(&self) -> f64 {
        self.0[5]
    }

    pub fn is_north_up(&self) -> bool {
        self.row_rotation() == 0.0 && self.column_rotation() == 0.0
    }
}

/// Axis-aligned bounding box in georeferenced units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// True when the box has positive area and finite corners.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Everything the aligner needs to know about a raster's grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterGridDescriptor {
    /// Top-left corner.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Absolute pixel sizes in georeferenced units.
    pub pixel_size_x: f64,
    pub pixel_size_y: f64,
    pub width_px: u32,
    pub height_px: u32,
    /// Opaque spatial reference (WKT, `EPSG:xxxx`, ...). Empty when unknown.
    pub projection: String,
    /// Nodata of the first band, if any.
    pub nodata_value: Option<f64>,
    /// Rotation terms `(row, column)`, carried but never used for extents.
    #[serde(default)]
    pub skew: (f64, f64),
}

impl RasterGridDescriptor {
    /// Build a descriptor from a geotransform, rejecting degenerate grids.
    ///
    /// `path` is only used for error reporting.
    pub fn from_geotransform(
        path: &Path,
        geotransform: GeoTransform,
        width_px: u32,
        height_px: u32,
        projection: impl Into<String>,
        nodata_value: Option<f64>,
    ) -> Result<Self> {
        if geotransform.0.iter().any(|v| !v.is_finite()) {
            return Err(CoregError::invalid_raster(
                path,
                format!("non-finite geotransform {:?}", geotransform.0),
            ));
        }
        if geotransform.pixel_width() == 0.0 || geotransform.pixel_height() == 0.0 {
            return Err(CoregError::invalid_raster(
                path,
                "geotransform has zero pixel size",
            ));
        }
        if width_px == 0 || height_px == 0 {
            return Err(CoregError::invalid_raster(
                path,
                format!("raster has no pixels ({width_px}x{height_px})"),
            ));
        }
        if !geotransform.is_north_up() {
            warn!(
                path = %path.display(),
                row_rotation = geotransform.row_rotation(),
                column_rotation = geotransform.column_rotation(),
                "geotransform is rotated; rotation terms are ignored and the output grid may be misaligned"
            );
        }

        Ok(Self {
            origin_x: geotransform.origin_x(),
            origin_y: geotransform.origin_y(),
            pixel_size_x: geotransform.pixel_width().abs(),
            pixel_size_y: geotransform.pixel_height().abs(),
            width_px,
            height_px,
            projection: projection.into(),
            nodata_value,
            skew: (geotransform.row_rotation(), geotransform.column_rotation()),
        })
    }

    /// Bounding extent, assuming a top-left origin with rows running south.
    pub fn extent(&self) -> Extent {
        Extent {
            min_x: self.origin_x,
            min_y: self.origin_y - self.height_px as f64 * self.pixel_size_y,
            max_x: self.origin_x + self.width_px as f64 * self.pixel_size_x,
            max_y: self.origin_y,
        }
    }

    /// North-up geotransform for this grid (skew terms preserved as read).
    pub fn geotransform(&self) -> GeoTransform {
        GeoTransform([
            self.origin_x,
            self.pixel_size_x,
            self.skew.0,
            self.origin_y,
            self.skew.1,
            -self.pixel_size_y,
        ])
    }

    /// Same grid, moved to a new top-left corner.
    pub fn with_origin(&self, origin_x: f64, origin_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            ..self.clone()
        }
    }

    /// Geometric equality: origin, pixel size and dimensions within `tolerance`.
    /// Projection and nodata are not compared.
    pub fn same_grid(&self, other: &Self, tolerance: f64) -> bool {
        self.width_px == other.width_px
            && self.height_px == other.height_px
            && (self.origin_x - other.origin_x).abs() <= tolerance
            && (self.origin_y - other.origin_y).abs() <= tolerance
            && (self.pixel_size_x - other.pixel_size_x).abs() <= tolerance
            && (self.pixel_size_y - other.pixel_size_y).abs() <= tolerance
    }

    /// True when `other` carries a different, non-empty projection.
    pub fn needs_reprojection_from(&self, other: &str) -> bool {
        !other.trim().is_empty() && other.trim() != self.projection.trim()
    }
}
