use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coreg_core::config::CoregConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the effective CoregConfig as TOML. Without `--config`
/// this is the built-in default.
pub fn run(args: &ConfigArgs, config: &CoregConfig) -> Result<()> {
    let toml_str = config.to_toml()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
