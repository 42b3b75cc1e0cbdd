//! Raster driver lookup from file extensions.

use std::path::{Path, PathBuf};

use crate::error::{CoregError, Result};

/// GDAL driver name for a bare extension (no dot), case-insensitive.
pub fn driver_for_extension(ext: &str) -> Option<&'static str> {
    let driver = match ext.to_ascii_lowercase().as_str() {
        "tif" | "tiff" | "geotiff" => "GTiff",
        "img" => "HFA",
        "hdr" | "dat" => "ENVI",
        "jp2" => "JPEG2000",
        "png" => "PNG",
        "jpg" | "jpeg" => "JPEG",
        "bmp" => "BMP",
        "gif" => "GIF",
        "asc" => "AAIGrid",
        "bil" => "EHdr",
        "nc" => "netCDF",
        "hdf" => "HDF4",
        "grd" => "GSBG",
        "ecw" => "ECW",
        "sid" => "MrSID",
        _ => return None,
    };
    Some(driver)
}

/// Driver inferred from the final extension of `path`.
pub fn driver_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(driver_for_extension)
}

/// Like [`driver_for_path`] but unknown extensions are an error.
pub fn require_driver(path: &Path) -> Result<&'static str> {
    driver_for_path(path).ok_or_else(|| CoregError::UnsupportedFormat(path.to_path_buf()))
}

/// Drivers that keep georeferencing in a `.hdr` file beside the data file.
pub fn uses_header_sidecar(driver: &str) -> bool {
    matches!(driver, "ENVI" | "EHdr")
}

/// ENVI rasters are addressed by their `.hdr` header, but engines write
/// the `.dat` data file. Any other path is returned unchanged.
pub fn envi_data_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("hdr") => path.with_extension("dat"),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(driver_for_extension("tif"), Some("GTiff"));
        assert_eq!(driver_for_extension("TIFF"), Some("GTiff"));
        assert_eq!(driver_for_extension("img"), Some("HFA"));
        assert_eq!(driver_for_extension("jp2"), Some("JPEG2000"));
        assert_eq!(driver_for_extension("hdr"), Some("ENVI"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(driver_for_extension("xyz"), None);
        assert_eq!(driver_for_path(Path::new("noext")), None);
        assert!(matches!(
            require_driver(Path::new("out.xyz")),
            Err(CoregError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_uses_final_extension_only() {
        assert_eq!(driver_for_path(Path::new("scene.tar.img")), Some("HFA"));
    }

    #[test]
    fn test_header_sidecar_drivers() {
        assert!(uses_header_sidecar("ENVI"));
        assert!(uses_header_sidecar("EHdr"));
        assert!(!uses_header_sidecar("GTiff"));
        assert!(!uses_header_sidecar("HFA"));
    }

    #[test]
    fn test_envi_header_redirected_to_data_file() {
        assert_eq!(envi_data_path(Path::new("out/scene.hdr")), PathBuf::from("out/scene.dat"));
        assert_eq!(envi_data_path(Path::new("out/scene.tif")), PathBuf::from("out/scene.tif"));
    }
}
