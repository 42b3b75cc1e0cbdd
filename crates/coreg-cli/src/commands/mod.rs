pub mod align;
pub mod config;
pub mod global;
pub mod info;
pub mod local;
pub mod pan;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use coreg_core::config::CoregConfig;
use coreg_core::grid::Extent;
use coreg_core::resample::ResampleMethod;
use tracing::debug;

pub fn load_config(path: Option<&Path>) -> Result<CoregConfig> {
    match path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            CoregConfig::load(p).with_context(|| format!("Failed to load config {}", p.display()))
        }
        None => Ok(CoregConfig::default()),
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ResampleArg {
    Nearest,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
    Max,
    Min,
    Median,
    Q1,
    Q3,
}

impl From<ResampleArg> for ResampleMethod {
    fn from(arg: ResampleArg) -> Self {
        match arg {
            ResampleArg::Nearest => ResampleMethod::Nearest,
            ResampleArg::Bilinear => ResampleMethod::Bilinear,
            ResampleArg::Cubic => ResampleMethod::Cubic,
            ResampleArg::CubicSpline => ResampleMethod::CubicSpline,
            ResampleArg::Lanczos => ResampleMethod::Lanczos,
            ResampleArg::Average => ResampleMethod::Average,
            ResampleArg::Mode => ResampleMethod::Mode,
            ResampleArg::Max => ResampleMethod::Max,
            ResampleArg::Min => ResampleMethod::Min,
            ResampleArg::Median => ResampleMethod::Median,
            ResampleArg::Q1 => ResampleMethod::FirstQuartile,
            ResampleArg::Q3 => ResampleMethod::ThirdQuartile,
        }
    }
}

/// Parse "min_x,min_y,max_x,max_y".
pub fn parse_extent(s: &str) -> Result<Extent> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .context("Invalid extent format (expected 'min_x,min_y,max_x,max_y')")?;
    if parts.len() != 4 {
        anyhow::bail!("Extent requires exactly 4 values: min_x,min_y,max_x,max_y");
    }
    let extent = Extent::new(parts[0], parts[1], parts[2], parts[3]);
    if !extent.is_valid() {
        anyhow::bail!("Extent {} has no area", extent);
    }
    Ok(extent)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_parse_extent() {
        let e = parse_extent("500000, 4297000,503000,4300000").unwrap();
        assert_eq!(e, Extent::new(500_000.0, 4_297_000.0, 503_000.0, 4_300_000.0));
    }

    #[test]
    fn test_parse_extent_negative_coordinates() {
        let e = parse_extent("-75.5,40,-74.5,41").unwrap();
        assert_eq!(e.min_x, -75.5);
        assert_eq!(e.max_x, -74.5);
    }

    #[test]
    fn test_parse_extent_wrong_count() {
        assert!(parse_extent("1,2,3").is_err());
        assert!(parse_extent("1,2,3,4,5").is_err());
        assert!(parse_extent("").is_err());
    }

    #[test]
    fn test_parse_extent_not_a_number() {
        assert!(parse_extent("a,2,3,4").is_err());
    }

    #[test]
    fn test_parse_extent_without_area() {
        assert!(parse_extent("10,10,10,20").is_err());
        assert!(parse_extent("10,20,30,5").is_err());
    }

    #[test]
    fn test_every_resample_arg_maps_to_its_own_method() {
        let methods: HashSet<ResampleMethod> = ResampleArg::value_variants()
            .iter()
            .map(|&arg| ResampleMethod::from(arg))
            .collect();
        assert_eq!(ResampleArg::value_variants().len(), 12);
        assert_eq!(methods.len(), ResampleMethod::ALL.len());
    }

    #[test]
    fn test_default_config_without_path() {
        assert_eq!(load_config(None).unwrap(), CoregConfig::default());
    }
}
