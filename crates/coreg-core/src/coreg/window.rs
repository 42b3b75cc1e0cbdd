use serde::{Deserialize, Serialize};

use crate::error::{CoregError, Result};
use crate::grid::{Extent, RasterGridDescriptor};

/// Where the global shift is measured. `None` fields defer to the engine,
/// which picks the centre of the overlap and its own default size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingWindow {
    /// Centre in map units.
    pub position: Option<(f64, f64)>,
    /// Width and height in target pixels.
    pub size: Option<(u32, u32)>,
}

impl MatchingWindow {
    /// Window covering `extent`, sized in pixels of the `target` grid.
    pub fn from_extent(extent: &Extent, target: &RasterGridDescriptor) -> Result<Self> {
        if !extent.is_valid() {
            return Err(CoregError::InvalidParameter(format!(
                "matching window {extent} has no area"
            )));
        }
        let width = (extent.width() / target.pixel_size_x).round().abs() as u32;
        let height = (extent.height() / target.pixel_size_y).round().abs() as u32;
        if width == 0 || height == 0 {
            return Err(CoregError::InvalidParameter(format!(
                "matching window {extent} is smaller than one target pixel"
            )));
        }
        Ok(Self {
            position: Some(extent.center()),
            size: Some((width, height)),
        })
    }

    pub fn resolve(extent: Option<&Extent>, target: &RasterGridDescriptor) -> Result<Self> {
        match extent {
            Some(e) => Self::from_extent(e, target),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GeoTransform;
    use std::path::Path;

    fn target() -> RasterGridDescriptor {
        RasterGridDescriptor::from_geotransform(
            Path::new("tgt.tif"),
            GeoTransform([0.0, 10.0, 0.0, 1000.0, 0.0, -10.0]),
            100,
            100,
            "",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_window_from_extent() {
        let w = MatchingWindow::from_extent(&Extent::new(100.0, 200.0, 356.0, 456.0), &target())
            .unwrap();
        assert_eq!(w.position, Some((228.0, 328.0)));
        assert_eq!(w.size, Some((26, 26)));
    }

    #[test]
    fn test_no_extent_defers_to_engine() {
        let w = MatchingWindow::resolve(None, &target()).unwrap();
        assert_eq!(w, MatchingWindow::default());
    }

    #[test]
    fn test_sub_pixel_window_rejected() {
        let err = MatchingWindow::from_extent(&Extent::new(0.0, 0.0, 2.0, 2.0), &target());
        assert!(matches!(err, Err(CoregError::InvalidParameter(_))));
    }
}
