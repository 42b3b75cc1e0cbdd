//! Subpixel shift engines.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoregError, Result};
use crate::resample::ResampleMethod;

use super::window::MatchingWindow;

/// Settings shared by global and local correction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShiftSettings {
    pub reference: PathBuf,
    pub target: PathBuf,
    pub output: PathBuf,
    pub output_format: String,
    pub align_grids: bool,
    pub match_gsd: bool,
    pub max_shift: u32,
    pub max_iter: u32,
    pub resampling: ResampleMethod,
}

/// One shift vector for the whole image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalShiftRequest {
    pub settings: ShiftSettings,
    pub window: MatchingWindow,
}

/// Shifts estimated on a tie-point grid and interpolated between points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalShiftRequest {
    pub settings: ShiftSettings,
    /// Tie-point spacing in target pixels.
    pub grid_res: u32,
    /// Square matching window edge in pixels.
    pub window_size: u32,
    pub workers: Option<u32>,
}

/// Estimates misregistration and writes the corrected target.
pub trait ShiftEngine: Send + Sync {
    fn name(&self) -> &str;

    fn correct_global(&self, request: &GlobalShiftRequest) -> Result<()>;

    fn correct_local(&self, request: &LocalShiftRequest) -> Result<()>;
}

/// Drives the `arosics` command-line front end.
pub struct ArosicsCli {
    bin: PathBuf,
}

impl ArosicsCli {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    fn run(&self, args: &[OsString]) -> Result<()> {
        debug!(tool = %self.bin.display(), ?args, "running");
        let output = Command::new(&self.bin).args(args).output().map_err(|e| {
            CoregError::ShiftEstimation(format!("{} could not be started: {e}", self.bin.display()))
        })?;
        if !output.status.success() {
            return Err(CoregError::ShiftEstimation(format!(
                "{} exited with {}: {}",
                self.bin.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

impl ShiftEngine for ArosicsCli {
    fn name(&self) -> &str {
        "AROSICS"
    }

    fn correct_global(&self, request: &GlobalShiftRequest) -> Result<()> {
        self.run(&global_args(request))
    }

    fn correct_local(&self, request: &LocalShiftRequest) -> Result<()> {
        self.run(&local_args(request))
    }
}

fn flag(value: bool) -> OsString {
    OsString::from(if value { "1" } else { "0" })
}

fn path_arg(path: &Path) -> OsString {
    path.as_os_str().to_owned()
}

fn common_args(args: &mut Vec<OsString>, s: &ShiftSettings) {
    args.push("-o".into());
    args.push(path_arg(&s.output));
    args.push("-fmt_out".into());
    args.push(s.output_format.as_str().into());
    args.push("-max_shift".into());
    args.push(s.max_shift.to_string().into());
    args.push("-max_iter".into());
    args.push(s.max_iter.to_string().into());
    args.push("-align_grids".into());
    args.push(flag(s.align_grids));
    args.push("-match_gsd".into());
    args.push(flag(s.match_gsd));
    args.push("-rsp_alg_deshift".into());
    args.push(s.resampling.arosics_name().into());
}

/// Argument vector for `arosics global`.
pub fn global_args(request: &GlobalShiftRequest) -> Vec<OsString> {
    let s = &request.settings;
    let mut args: Vec<OsString> = vec!["global".into(), path_arg(&s.reference), path_arg(&s.target)];
    common_args(&mut args, s);
    if let Some((x, y)) = request.window.position {
        args.push("-wp".into());
        args.push(x.to_string().into());
        args.push(y.to_string().into());
    }
    if let Some((w, h)) = request.window.size {
        args.push("-ws".into());
        args.push(w.to_string().into());
        args.push(h.to_string().into());
    }
    args
}

/// Argument vector for `arosics local`.
pub fn local_args(request: &LocalShiftRequest) -> Vec<OsString> {
    let s = &request.settings;
    let mut args: Vec<OsString> = vec![
        "local".into(),
        path_arg(&s.reference),
        path_arg(&s.target),
        request.grid_res.to_string().into(),
    ];
    common_args(&mut args, s);
    args.push("-ws".into());
    args.push(request.window_size.to_string().into());
    args.push(request.window_size.to_string().into());
    if let Some(n) = request.workers {
        args.push("-CPUs".into());
        args.push(n.to_string().into());
    }
    args
}
