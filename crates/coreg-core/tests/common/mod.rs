use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use coreg_core::backend::RasterBackend;
use coreg_core::coreg::{GlobalShiftRequest, LocalShiftRequest, ShiftEngine};
use coreg_core::error::{CoregError, Result};
use coreg_core::grid::{GeoTransform, RasterGridDescriptor};
use coreg_core::progress::{JobStage, ProgressReporter};
use coreg_core::warp::{TranslateRequest, WarpRequest};

pub const UTM_18N: &str = "EPSG:32618";
pub const WGS84: &str = "EPSG:4326";

/// North-up grid with square pixels.
pub fn grid(
    origin: (f64, f64),
    pixel: f64,
    size: (u32, u32),
    projection: &str,
    nodata: Option<f64>,
) -> RasterGridDescriptor {
    RasterGridDescriptor::from_geotransform(
        Path::new("synthetic.tif"),
        GeoTransform([origin.0, pixel, 0.0, origin.1, 0.0, -pixel]),
        size.0,
        size.1,
        projection,
        nodata,
    )
    .expect("valid synthetic grid")
}

/// In-memory raster engine that records every request.
#[derive(Default)]
pub struct FakeBackend {
    rasters: HashMap<PathBuf, RasterGridDescriptor>,
    /// Fail the n-th warp (0-based).
    pub fail_warp_at: Option<usize>,
    pub warps: Mutex<Vec<WarpRequest>>,
    /// Whether each warp's source existed on disk when the warp ran.
    pub warp_sources_existed: Mutex<Vec<bool>>,
    pub translates: Mutex<Vec<TranslateRequest>>,
}

impl FakeBackend {
    pub fn with_raster(mut self, path: impl Into<PathBuf>, grid: RasterGridDescriptor) -> Self {
        self.rasters.insert(path.into(), grid);
        self
    }

    pub fn warps(&self) -> Vec<WarpRequest> {
        self.warps.lock().unwrap().clone()
    }

    pub fn translates(&self) -> Vec<TranslateRequest> {
        self.translates.lock().unwrap().clone()
    }
}

impl RasterBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    fn describe(&self, path: &Path) -> Result<RasterGridDescriptor> {
        self.rasters
            .get(path)
            .cloned()
            .ok_or_else(|| CoregError::InvalidRaster {
                path: path.to_path_buf(),
                reason: "cannot open".into(),
            })
    }

    fn warp(&self, request: &WarpRequest) -> Result<()> {
        let mut warps = self.warps.lock().unwrap();
        self.warp_sources_existed
            .lock()
            .unwrap()
            .push(request.source_path.exists());
        let index = warps.len();
        warps.push(request.clone());
        if self.fail_warp_at == Some(index) {
            return Err(CoregError::WarpExecution("disk full".into()));
        }
        Ok(())
    }

    fn translate(&self, request: &TranslateRequest) -> Result<()> {
        std::fs::write(&request.destination_path, b"shifted")?;
        self.translates.lock().unwrap().push(request.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeShiftEngine {
    pub global: Mutex<Vec<GlobalShiftRequest>>,
    pub local: Mutex<Vec<LocalShiftRequest>>,
}

impl ShiftEngine for FakeShiftEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn correct_global(&self, request: &GlobalShiftRequest) -> Result<()> {
        self.global.lock().unwrap().push(request.clone());
        Ok(())
    }

    fn correct_local(&self, request: &LocalShiftRequest) -> Result<()> {
        self.local.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Records the stages it was told about.
#[derive(Default)]
pub struct StageLog {
    pub stages: Mutex<Vec<JobStage>>,
}

impl ProgressReporter for StageLog {
    fn begin_stage(&self, stage: JobStage) {
        self.stages.lock().unwrap().push(stage);
    }
}
