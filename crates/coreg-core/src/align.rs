//! Warp-to-reference alignment.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::RasterBackend;
use crate::consts::INTERMEDIATE_SUFFIX;
use crate::error::Result;
use crate::grid::RasterGridDescriptor;
use crate::mask::validate_mask;
use crate::progress::{JobStage, ProgressReporter};
use crate::warp::{plan_alignment, plan_reprojection, AlignOptions, AlignStrategy, WarpRequest};

/// Result of an executed alignment.
#[derive(Clone, Debug)]
pub struct AlignOutcome {
    /// The warp that produced the output.
    pub request: WarpRequest,
    /// Whether a separate reprojection pass ran first.
    pub reprojected_first: bool,
}

impl AlignOutcome {
    pub fn output(&self) -> &Path {
        &self.request.destination_path
    }
}

/// Puts a target raster onto the grid of a reference raster.
pub struct GridAligner<'a> {
    backend: &'a dyn RasterBackend,
}

impl<'a> GridAligner<'a> {
    pub fn new(backend: &'a dyn RasterBackend) -> Self {
        Self { backend }
    }

    /// Derive the warp request without executing it.
    ///
    /// The mask is checked before either raster is read, so a bad mask
    /// never reaches the engine.
    pub fn align(
        &self,
        reference: &Path,
        target: &Path,
        destination: &Path,
        options: &AlignOptions,
    ) -> Result<WarpRequest> {
        let options = with_validated_mask(options)?;
        let (reference_grid, target_grid) = self.inspect(reference, target)?;
        Ok(plan_alignment(
            &reference_grid,
            &target_grid.projection,
            target,
            destination,
            &options,
        ))
    }

    /// Plan and execute the alignment.
    pub fn run(
        &self,
        reference: &Path,
        target: &Path,
        destination: &Path,
        options: &AlignOptions,
        reporter: &dyn ProgressReporter,
    ) -> Result<AlignOutcome> {
        let options = with_validated_mask(options)?;

        reporter.begin_stage(JobStage::Inspecting);
        let (reference_grid, target_grid) = self.inspect(reference, target)?;
        reporter.finish_stage();

        let two_stage = options.strategy == AlignStrategy::TwoStage
            && reference_grid.needs_reprojection_from(&target_grid.projection);

        let request = if two_stage {
            self.run_two_stage(&reference_grid, &target_grid, target, destination, &options, reporter)?
        } else {
            let request = plan_alignment(
                &reference_grid,
                &target_grid.projection,
                target,
                destination,
                &options,
            );
            self.execute(&request, reporter)?;
            request
        };

        info!(output = %destination.display(), "alignment done");
        Ok(AlignOutcome {
            request,
            reprojected_first: two_stage,
        })
    }

    fn inspect(
        &self,
        reference: &Path,
        target: &Path,
    ) -> Result<(RasterGridDescriptor, RasterGridDescriptor)> {
        let reference_grid = self.backend.describe(reference)?;
        let target_grid = self.backend.describe(target)?;
        debug!(
            reference = %reference.display(),
            extent = %reference_grid.extent(),
            pixel_x = reference_grid.pixel_size_x,
            pixel_y = reference_grid.pixel_size_y,
            "reference grid"
        );
        Ok((reference_grid, target_grid))
    }

    fn run_two_stage(
        &self,
        reference_grid: &RasterGridDescriptor,
        target_grid: &RasterGridDescriptor,
        target: &Path,
        destination: &Path,
        options: &AlignOptions,
        reporter: &dyn ProgressReporter,
    ) -> Result<WarpRequest> {
        // Removed when dropped, on every exit path.
        let intermediate = tempfile::Builder::new()
            .prefix("coreg-reprojected-")
            .suffix(INTERMEDIATE_SUFFIX)
            .tempfile()?
            .into_temp_path();
        info!(projection = %reference_grid.projection, "reprojection required");

        reporter.begin_stage(JobStage::Reprojecting);
        let reprojection = plan_reprojection(
            reference_grid,
            &target_grid.projection,
            target,
            &intermediate,
            options,
        );
        self.backend.warp(&reprojection)?;
        reporter.finish_stage();

        let request = plan_alignment(
            reference_grid,
            &reference_grid.projection,
            &intermediate,
            destination,
            options,
        );
        self.execute(&request, reporter)?;

        debug!(path = %intermediate.display(), "removing intermediate");
        intermediate.close()?;
        Ok(request)
    }

    fn execute(&self, request: &WarpRequest, reporter: &dyn ProgressReporter) -> Result<()> {
        reporter.begin_stage(JobStage::Aligning);
        if let Some(v) = request.dst_nodata {
            info!(nodata = v, "stamping nodata");
        }
        self.backend.warp(request)?;
        reporter.finish_stage();
        Ok(())
    }
}

fn with_validated_mask(options: &AlignOptions) -> Result<AlignOptions> {
    let mask: Option<PathBuf> = options.mask.as_deref().map(validate_mask).transpose()?;
    Ok(AlignOptions {
        mask,
        ..options.clone()
    })
}
