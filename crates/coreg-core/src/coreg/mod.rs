//! Subpixel co-registration against a reference image.
//!
//! Shift estimation itself belongs to a [`ShiftEngine`]; this module reads
//! both rasters, turns user parameters into engine requests and picks the
//! output format.

pub mod engine;
pub mod window;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::RasterBackend;
use crate::config::{GlobalDefaults, LocalDefaults};
use crate::consts::{
    DEFAULT_LOCAL_WINDOW_SIZE, DEFAULT_MAX_ITER, DEFAULT_MAX_SHIFT, DEFAULT_TIE_POINT_GRID_RES,
};
use crate::driver::{driver_for_path, envi_data_path};
use crate::error::{CoregError, Result};
use crate::grid::{Extent, RasterGridDescriptor};
use crate::progress::{JobStage, ProgressReporter};
use crate::resample::ResampleMethod;

pub use engine::{
    ArosicsCli, GlobalShiftRequest, LocalShiftRequest, ShiftEngine, ShiftSettings,
};
pub use window::MatchingWindow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalCoregParams {
    pub align_grids: bool,
    pub match_gsd: bool,
    /// Custom area to match in, in reference map units; the whole overlap
    /// when `None`.
    pub matching_window: Option<Extent>,
    pub max_shift: u32,
    pub resampling: ResampleMethod,
}

impl Default for GlobalCoregParams {
    fn default() -> Self {
        Self::from(&GlobalDefaults::default())
    }
}

impl From<&GlobalDefaults> for GlobalCoregParams {
    fn from(d: &GlobalDefaults) -> Self {
        Self {
            align_grids: d.align_grids,
            match_gsd: d.match_gsd,
            matching_window: None,
            max_shift: d.max_shift,
            resampling: d.resampling,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalCoregParams {
    pub align_grids: bool,
    pub match_gsd: bool,
    pub grid_res: u32,
    pub window_size: u32,
    pub max_shift: u32,
    pub resampling: ResampleMethod,
    pub workers: Option<u32>,
}

impl Default for LocalCoregParams {
    fn default() -> Self {
        Self::from(&LocalDefaults::default())
    }
}

impl From<&LocalDefaults> for LocalCoregParams {
    fn from(d: &LocalDefaults) -> Self {
        Self {
            align_grids: d.align_grids,
            match_gsd: d.match_gsd,
            grid_res: d.grid_res,
            window_size: d.window_size,
            max_shift: d.max_shift,
            resampling: d.resampling,
            workers: d.workers,
        }
    }
}

/// Worker count handed to the engine. Windows cannot spawn engine worker
/// processes, so it is pinned to one there.
pub fn effective_workers(requested: Option<u32>) -> Option<u32> {
    if cfg!(windows) {
        if requested.is_some_and(|n| n != 1) {
            warn!("parallel shift estimation is unavailable on Windows, using one worker");
        }
        Some(1)
    } else {
        requested
    }
}

/// Output path and driver the engine should write. ENVI headers are
/// redirected to the data file; unknown extensions fall back to GeoTIFF.
pub fn resolve_output(output: &Path) -> (PathBuf, String) {
    let path = envi_data_path(output);
    let format = driver_for_path(&path).unwrap_or("GTiff").to_string();
    (path, format)
}

pub struct Coregistrator<'a> {
    backend: &'a dyn RasterBackend,
    engine: &'a dyn ShiftEngine,
}

impl<'a> Coregistrator<'a> {
    pub fn new(backend: &'a dyn RasterBackend, engine: &'a dyn ShiftEngine) -> Self {
        Self { backend, engine }
    }

    /// Build the request for a single global shift correction.
    pub fn plan_global(
        &self,
        reference: &Path,
        target: &Path,
        output: &Path,
        params: &GlobalCoregParams,
    ) -> Result<GlobalShiftRequest> {
        let (_, target_grid) = self.inspect(reference, target)?;
        let window = MatchingWindow::resolve(params.matching_window.as_ref(), &target_grid)?;
        validate_max_shift(params.max_shift)?;
        Ok(GlobalShiftRequest {
            settings: settings(
                reference,
                target,
                output,
                params.align_grids,
                params.match_gsd,
                params.max_shift,
                params.resampling,
            ),
            window,
        })
    }

    /// Build the request for a tie-point grid correction.
    pub fn plan_local(
        &self,
        reference: &Path,
        target: &Path,
        output: &Path,
        params: &LocalCoregParams,
    ) -> Result<LocalShiftRequest> {
        self.inspect(reference, target)?;
        validate_max_shift(params.max_shift)?;
        if params.grid_res == 0 || params.window_size == 0 {
            return Err(CoregError::InvalidParameter(
                "tie-point grid resolution and window size must be > 0".into(),
            ));
        }
        Ok(LocalShiftRequest {
            settings: settings(
                reference,
                target,
                output,
                params.align_grids,
                params.match_gsd,
                params.max_shift,
                params.resampling,
            ),
            grid_res: params.grid_res,
            window_size: params.window_size,
            workers: effective_workers(params.workers),
        })
    }

    pub fn run_global(
        &self,
        reference: &Path,
        target: &Path,
        output: &Path,
        params: &GlobalCoregParams,
        reporter: &dyn ProgressReporter,
    ) -> Result<PathBuf> {
        reporter.begin_stage(JobStage::Inspecting);
        let request = self.plan_global(reference, target, output, params)?;
        reporter.finish_stage();

        reporter.begin_stage(JobStage::EstimatingShifts);
        info!(engine = self.engine.name(), target = %target.display(), "global co-registration");
        self.engine.correct_global(&request)?;
        reporter.finish_stage();
        Ok(request.settings.output)
    }

    pub fn run_local(
        &self,
        reference: &Path,
        target: &Path,
        output: &Path,
        params: &LocalCoregParams,
        reporter: &dyn ProgressReporter,
    ) -> Result<PathBuf> {
        reporter.begin_stage(JobStage::Inspecting);
        let request = self.plan_local(reference, target, output, params)?;
        reporter.finish_stage();

        reporter.begin_stage(JobStage::EstimatingShifts);
        info!(
            engine = self.engine.name(),
            target = %target.display(),
            grid_res = request.grid_res,
            "local co-registration"
        );
        self.engine.correct_local(&request)?;
        reporter.finish_stage();
        Ok(request.settings.output)
    }

    fn inspect(
        &self,
        reference: &Path,
        target: &Path,
    ) -> Result<(RasterGridDescriptor, RasterGridDescriptor)> {
        Ok((self.backend.describe(reference)?, self.backend.describe(target)?))
    }
}

fn validate_max_shift(max_shift: u32) -> Result<()> {
    if max_shift == 0 {
        return Err(CoregError::InvalidParameter("max_shift must be > 0".into()));
    }
    Ok(())
}

fn settings(
    reference: &Path,
    target: &Path,
    output: &Path,
    align_grids: bool,
    match_gsd: bool,
    max_shift: u32,
    resampling: ResampleMethod,
) -> ShiftSettings {
    let (output, output_format) = resolve_output(output);
    ShiftSettings {
        reference: reference.to_path_buf(),
        target: target.to_path_buf(),
        output,
        output_format,
        align_grids,
        match_gsd,
        max_shift,
        max_iter: DEFAULT_MAX_ITER,
        resampling,
    }
}
