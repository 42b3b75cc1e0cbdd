use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coreg_core::backend::GdalCli;
use coreg_core::config::CoregConfig;
use coreg_core::pan::PixelPanner;

use crate::progress::SpinnerReporter;

#[derive(Args)]
pub struct PanArgs {
    /// Raster to shift
    pub raster: PathBuf,

    /// Shift along x in pixels (positive moves east)
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub dx: f64,

    /// Shift along y in pixels (positive moves north)
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub dy: f64,

    /// Write to a new file instead of rewriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &PanArgs, config: &CoregConfig) -> Result<()> {
    let backend = GdalCli::new(config.tools.clone());
    let reporter = SpinnerReporter::new();
    let outcome = PixelPanner::new(&backend)
        .shift(&args.raster, args.dx, args.dy, args.output.as_deref(), &reporter)
        .with_context(|| format!("Failed to shift {}", args.raster.display()))?;
    reporter.finish("Done");

    let verb = if outcome.in_place { "Rewrote" } else { "Wrote" };
    println!(
        "{} {} with origin {}, {}",
        verb,
        outcome.output.display(),
        outcome.grid.origin_x,
        outcome.grid.origin_y
    );
    Ok(())
}
