use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coreg_core::backend::GdalCli;
use coreg_core::config::CoregConfig;
use coreg_core::coreg::{ArosicsCli, Coregistrator, GlobalCoregParams};

use super::{parse_extent, ResampleArg};
use crate::progress::SpinnerReporter;

#[derive(Args)]
pub struct GlobalArgs {
    /// Reference raster
    pub reference: PathBuf,

    /// Raster to correct
    pub target: PathBuf,

    /// Output raster path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Matching area as min_x,min_y,max_x,max_y in reference coordinates
    #[arg(long, allow_hyphen_values = true)]
    pub window: Option<String>,

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
}

pub fn run(args: &GlobalArgs, config: &CoregConfig) -> Result<()> {
    let mut params = GlobalCoregParams::from(&config.global);
    if let Some(ref window) = args.window {
        params.matching_window = Some(parse_extent(window)?);
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

    crate::summary::print_global_summary(&args.reference, &args.target, &params);

    let backend = GdalCli::new(config.tools.clone());
    let engine = ArosicsCli::new(config.tools.arosics.clone());
    let reporter = SpinnerReporter::new();
    let output = Coregistrator::new(&backend, &engine)
        .run_global(&args.reference, &args.target, &args.output, &params, &reporter)
        .with_context(|| format!("Global co-registration of {} failed", args.target.display()))?;
    reporter.finish("Done");

    println!("Corrected raster saved to {}", output.display());
    Ok(())
}
