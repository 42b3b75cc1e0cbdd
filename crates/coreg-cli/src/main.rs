mod commands;
mod progress;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coreg", about = "Raster co-registration and pixel alignment")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Toolkit config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grid of a raster
    Info(commands::info::InfoArgs),
    /// Warp a raster onto the grid of a reference raster
    Align(commands::align::AlignArgs),
    /// Shift a raster's origin by whole or fractional pixels
    Pan(commands::pan::PanArgs),
    /// Detect and correct one global subpixel shift
    Global(commands::global::GlobalArgs),
    /// Detect and correct local shifts on a tie-point grid
    Local(commands::local::LocalArgs),
    /// Print or save the effective config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = commands::load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::Align(args) => commands::align::run(args, &config),
        Commands::Pan(args) => commands::pan::run(args, &config),
        Commands::Global(args) => commands::global::run(args, &config),
        Commands::Local(args) => commands::local::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
