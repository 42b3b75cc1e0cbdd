/// Absolute tolerance used when comparing grid coordinates.
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Maximum shift (in reference pixels) the shift engine may report.
pub const DEFAULT_MAX_SHIFT: u32 = 5;

/// Iteration cap for the shift engine's convergence loop.
pub const DEFAULT_MAX_ITER: u32 = 15;

/// Tie-point grid spacing for local co-registration, in target pixels.
pub const DEFAULT_TIE_POINT_GRID_RES: u32 = 200;

/// Edge length of the square matching window for local co-registration.
pub const DEFAULT_LOCAL_WINDOW_SIZE: u32 = 256;

/// Suffix of the reproject-only intermediate written by the two-stage path.
pub const INTERMEDIATE_SUFFIX: &str = ".tif";

/// Side-car written by GDAL next to rasters whose statistics were touched.
pub const AUX_XML_SUFFIX: &str = ".aux.xml";

/// Default executable names, resolved through `PATH`.
pub const GDALINFO_BIN: &str = "gdalinfo";
pub const GDALWARP_BIN: &str = "gdalwarp";
pub const GDAL_TRANSLATE_BIN: &str = "gdal_translate";
pub const AROSICS_BIN: &str = "arosics";
