use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use coreg_core::align::GridAligner;
use coreg_core::backend::GdalCli;
use coreg_core::config::CoregConfig;
use coreg_core::warp::{AlignOptions, AlignStrategy};

use super::ResampleArg;
use crate::progress::SpinnerReporter;

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Reproject, resample and clip in one warp
    SinglePass,
    /// Reproject into a temporary raster, then align
    TwoStage,
}

impl From<StrategyArg> for AlignStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SinglePass => AlignStrategy::SinglePass,
            StrategyArg::TwoStage => AlignStrategy::TwoStage,
        }
    }
}

#[derive(Args)]
pub struct AlignArgs {
    /// Raster whose grid is the target
    pub reference: PathBuf,

    /// Raster to put onto the reference grid
    pub target: PathBuf,

    /// Output raster path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Resampling method [default: from config]
    #[arg(short, long, value_enum)]
    pub resampling: Option<ResampleArg>,

    /// Nodata value for source and output [default: reference nodata on output]
    #[arg(long, allow_negative_numbers = true)]
    pub nodata: Option<f64>,

    /// Polygon layer to clip the output with
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Output driver name [default: from the output extension]
    #[arg(long)]
    pub format: Option<String>,

    /// Warp strategy [default: from config]
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Print the warp plan without running it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &AlignArgs, config: &CoregConfig) -> Result<()> {
    let backend = GdalCli::new(config.tools.clone());
    let aligner = GridAligner::new(&backend);

    let options = AlignOptions {
        resampling: args
            .resampling
            .map(Into::into)
            .unwrap_or(config.align.resampling),
        nodata: args.nodata,
        mask: args.mask.clone(),
        output_format: args.format.clone(),
        strategy: args.strategy.map(Into::into).unwrap_or(config.align.strategy),
    };

    if args.dry_run {
        let request = aligner.align(&args.reference, &args.target, &args.output, &options)?;
        crate::summary::print_warp_plan(&request);
        return Ok(());
    }

    let reporter = SpinnerReporter::new();
    let outcome = aligner
        .run(&args.reference, &args.target, &args.output, &options, &reporter)
        .with_context(|| format!("Failed to align {}", args.target.display()))?;
    reporter.finish("Done");

    if outcome.reprojected_first {
        println!("Reprojected and aligned to {}", outcome.output().display());
    } else {
        println!("Aligned to {}", outcome.output().display());
    }
    Ok(())
}
