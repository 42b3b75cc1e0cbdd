use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    AROSICS_BIN, DEFAULT_LOCAL_WINDOW_SIZE, DEFAULT_MAX_SHIFT, DEFAULT_TIE_POINT_GRID_RES,
    GDALINFO_BIN, GDALWARP_BIN, GDAL_TRANSLATE_BIN,
};
use crate::error::{CoregError, Result};
use crate::resample::ResampleMethod;
use crate::warp::AlignStrategy;

/// Toolkit-wide settings, stored as TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoregConfig {
    #[serde(default)]
    pub tools: ToolPaths,
    #[serde(default)]
    pub align: AlignDefaults,
    #[serde(default)]
    pub global: GlobalDefaults,
    #[serde(default)]
    pub local: LocalDefaults,
}

impl CoregConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CoregError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CoregError::Config(e.to_string()))
    }
}

/// External executables. Bare names are resolved through `PATH`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub gdalinfo: PathBuf,
    pub gdalwarp: PathBuf,
    pub gdal_translate: PathBuf,
    pub arosics: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            gdalinfo: PathBuf::from(GDALINFO_BIN),
            gdalwarp: PathBuf::from(GDALWARP_BIN),
            gdal_translate: PathBuf::from(GDAL_TRANSLATE_BIN),
            arosics: PathBuf::from(AROSICS_BIN),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignDefaults {
    #[serde(default)]
    pub resampling: ResampleMethod,
    #[serde(default)]
    pub strategy: AlignStrategy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalDefaults {
    pub align_grids: bool,
    pub match_gsd: bool,
    pub max_shift: u32,
    pub resampling: ResampleMethod,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            align_grids: true,
            match_gsd: true,
            max_shift: DEFAULT_MAX_SHIFT,
            resampling: ResampleMethod::Nearest,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalDefaults {
    pub align_grids: bool,
    pub match_gsd: bool,
    pub grid_res: u32,
    pub window_size: u32,
    pub max_shift: u32,
    pub resampling: ResampleMethod,
    /// Worker processes for the shift engine; `None` uses the platform default.
    pub workers: Option<u32>,
}

impl Default for LocalDefaults {
    fn default() -> Self {
        Self {
            align_grids: true,
            match_gsd: true,
            grid_res: DEFAULT_TIE_POINT_GRID_RES,
            window_size: DEFAULT_LOCAL_WINDOW_SIZE,
            max_shift: DEFAULT_MAX_SHIFT,
            resampling: ResampleMethod::Cubic,
            workers: None,
        }
    }
}
