/// Stage of a co-registration job, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStage {
    Inspecting,
    Reprojecting,
    Aligning,
    Panning,
    EstimatingShifts,
}

impl std::fmt::Display for JobStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inspecting => write!(f, "Reading raster metadata"),
            Self::Reprojecting => write!(f, "Reprojecting"),
            Self::Aligning => write!(f, "Aligning to reference grid"),
            Self::Panning => write!(f, "Shifting origin"),
            Self::EstimatingShifts => write!(f, "Estimating and correcting shifts"),
        }
    }
}

/// Progress feedback for long-running engine calls.
///
/// Engine invocations are opaque, so only stage boundaries are reported.
/// All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    fn begin_stage(&self, _stage: JobStage) {}

    fn finish_stage(&self) {}
}

/// Reporter that ignores everything.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
