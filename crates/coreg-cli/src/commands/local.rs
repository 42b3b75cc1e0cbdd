use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coreg_core::backend::GdalCli;
use coreg_core::config::CoregConfig;
use coreg_core::coreg::{ArosicsCli, Coregistrator, LocalCoregParams};

use super::ResampleArg;
use crate::progress::SpinnerReporter;

#[derive(Args)]
pub struct LocalArgs {
    /// Reference raster
    pub reference: PathBuf,

    /// Raster to correct
    pub target: PathBuf,

    /// Output raster path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Tie-point spacing in target pixels [default: from config]
    #[arg(long)]
    pub grid_res: Option<u32>,

    /// Matching window edge in pixels [default: from config]
    #[arg(long)]
    pub window_size: Option<u32>,

    /// Maximum shift in pixels [default: from config]
    #[arg(long)]
    pub max_shift: Option<u32>,

    /// Keep the target's own grid instead of snapping to the reference
    #[arg(long)]
    pub no_align_grids: bool,

    /// Keep the target's pixel size
    #[arg(long)]
    pub no_match_gsd: bool,

    /// Resampling method for the deshift [default: from config]
    #[arg(short, long, value_enum)]
    pub resampling: Option<ResampleArg>,

    /// Worker processes for shift estimation [default: all cores]
    #[arg(short, long)]
    pub workers: Option<u32>,
}

pub fn run(args: &LocalArgs, config: &CoregConfig) -> Result<()> {
    let mut params = LocalCoregParams::from(&config.local);
    if let Some(n) = args.grid_res {
        params.grid_res = n;
    }
    if let Some(n) = args.window_size {
        params.window_size = n;
    }
    if let Some(n) = args.max_shift {
        params.max_shift = n;
    }
    if args.no_align_grids {
        params.align_grids = false;
    }
    if args.no_match_gsd {
        params.match_gsd = false;
    }
    if let Some(r) = args.resampling {
        params.resampling = r.into();
    }
    if args.workers.is_some() {
        params.workers = args.workers;
    }

    crate::summary::print_local_summary(&args.reference, &args.target, &params);

    let backend = GdalCli::new(config.tools.clone());
    let engine = ArosicsCli::new(config.tools.arosics.clone());
    let reporter = SpinnerReporter::new();
    let output = Coregistrator::new(&backend, &engine)
        .run_local(&args.reference, &args.target, &args.output, &params, &reporter)
        .with_context(|| format!("Local co-registration of {} failed", args.target.display()))?;
    reporter.finish("Done");

    println!("Corrected raster saved to {}", output.display());
    Ok(())
}
