use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coreg_core::backend::{GdalCli, RasterBackend};
use coreg_core::config::CoregConfig;

#[derive(Args)]
pub struct InfoArgs {
    /// Input raster
    pub file: PathBuf,

    /// Print the grid as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &InfoArgs, config: &CoregConfig) -> Result<()> {
    let backend = GdalCli::new(config.tools.clone());
    let grid = backend
        .describe(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        crate::summary::print_grid(&args.file, &grid);
    }
    Ok(())
}
