//! Backend that shells out to the GDAL command-line utilities.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::config::ToolPaths;
use crate::error::{CoregError, Result};
use crate::grid::{GeoTransform, RasterGridDescriptor};
use crate::warp::{TranslateRequest, WarpRequest};

use super::RasterBackend;

pub struct GdalCli {
    tools: ToolPaths,
}

impl GdalCli {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }
}

impl Default for GdalCli {
    fn default() -> Self {
        Self::new(ToolPaths::default())
    }
}

impl RasterBackend for GdalCli {
    fn name(&self) -> &str {
        "GDAL command-line utilities"
    }

    fn describe(&self, path: &Path) -> Result<RasterGridDescriptor> {
        let args = vec![OsString::from("-json"), path.as_os_str().to_owned()];
        let stdout = run_tool(&self.tools.gdalinfo, &args)
            .map_err(|reason| CoregError::invalid_raster(path, reason))?;
        parse_gdalinfo(path, &stdout)
    }

    fn warp(&self, request: &WarpRequest) -> Result<()> {
        run_tool(&self.tools.gdalwarp, &warp_args(request)).map_err(CoregError::WarpExecution)?;
        Ok(())
    }

    fn translate(&self, request: &TranslateRequest) -> Result<()> {
        run_tool(&self.tools.gdal_translate, &translate_args(request))
            .map_err(CoregError::WarpExecution)?;
        Ok(())
    }
}

/// Run `bin` to completion, returning stdout or a description of the failure.
fn run_tool(bin: &Path, args: &[OsString]) -> std::result::Result<String, String> {
    debug!(tool = %bin.display(), ?args, "running");
    let output = Command::new(bin)
        .args(args)
        .output()
        .map_err(|e| format!("{} could not be started: {e}", bin.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{} exited with {}: {}",
            bin.display(),
            output.status,
            stderr.trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Engines accept `nan` but not Rust's `NaN` spelling.
fn num(value: f64) -> OsString {
    if value.is_nan() {
        OsString::from("nan")
    } else {
        OsString::from(value.to_string())
    }
}

/// `gdalwarp` argument vector for a request.
pub fn warp_args(request: &WarpRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-overwrite".into()];

    if let Some(ref format) = request.output_format {
        push_pair(&mut args, "-of", format.into());
    }
    if !request.source_projection.trim().is_empty() {
        push_pair(&mut args, "-s_srs", request.source_projection.as_str().into());
    }
    if !request.destination_projection.trim().is_empty() {
        push_pair(&mut args, "-t_srs", request.destination_projection.as_str().into());
    }
    args.push("-tr".into());
    args.push(num(request.target_pixel_size_x));
    args.push(num(request.target_pixel_size_y));
    push_pair(&mut args, "-r", request.resample_method.gdal_name().into());
    if let Some(bounds) = request.output_bounds {
        args.push("-te".into());
        for v in [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y] {
            args.push(num(v));
        }
    }
    if request.target_aligned_pixels {
        args.push("-tap".into());
    }
    if let Some(v) = request.src_nodata {
        push_pair(&mut args, "-srcnodata", num(v));
    }
    if let Some(v) = request.dst_nodata {
        push_pair(&mut args, "-dstnodata", num(v));
    }
    if let Some(ref cutline) = request.cutline_path {
        push_pair(&mut args, "-cutline", cutline.as_os_str().to_owned());
    }

    args.push(request.source_path.as_os_str().to_owned());
    args.push(request.destination_path.as_os_str().to_owned());
    args
}

fn push_pair(args: &mut Vec<OsString>, flag: &str, value: OsString) {
    args.push(flag.into());
    args.push(value);
}

/// `gdal_translate` argument vector for a request.
pub fn translate_args(request: &TranslateRequest) -> Vec<OsString> {
    let b = request.assigned_bounds;
    vec![
        "-of".into(),
        request.output_format.clone().into(),
        "-a_ullr".into(),
        num(b.min_x),
        num(b.max_y),
        num(b.max_x),
        num(b.min_y),
        request.source_path.as_os_str().to_owned(),
        request.destination_path.as_os_str().to_owned(),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GdalInfo {
    size: [u32; 2],
    geo_transform: Option<[f64; 6]>,
    coordinate_system: Option<CoordinateSystem>,
    #[serde(default)]
    bands: Vec<BandInfo>,
}

#[derive(Deserialize)]
struct CoordinateSystem {
    #[serde(default)]
    wkt: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BandInfo {
    no_data_value: Option<serde_json::Value>,
}

/// Build a descriptor from `gdalinfo -json` output.
pub fn parse_gdalinfo(path: &Path, json: &str) -> Result<RasterGridDescriptor> {
    let info: GdalInfo = serde_json::from_str(json)
        .map_err(|e| CoregError::invalid_raster(path, format!("unreadable gdalinfo output: {e}")))?;
    let geotransform = info
        .geo_transform
        .ok_or_else(|| CoregError::invalid_raster(path, "raster is not georeferenced"))?;
    let projection = info.coordinate_system.map(|c| c.wkt).unwrap_or_default();
    let nodata = info
        .bands
        .first()
        .and_then(|b| b.no_data_value.as_ref())
        .and_then(nodata_from_json);

    RasterGridDescriptor::from_geotransform(
        path,
        GeoTransform(geotransform),
        info.size[0],
        info.size[1],
        projection,
        nodata,
    )
}

/// gdalinfo writes non-finite nodata values as strings.
fn nodata_from_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "nan" => Some(f64::NAN),
            "inf" | "infinity" => Some(f64::INFINITY),
            "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
            other => other.parse().ok(),
        },
        _ => None,
    }
}

/// Path of the `.aux.xml` side-car GDAL keeps next to `path`.
pub fn aux_xml_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(crate::consts::AUX_XML_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Extent;
    use crate::resample::ResampleMethod;

    const INFO: &str = r#"{
        "description": "ref.tif",
        "driverShortName": "GTiff",
        "size": [100, 50],
        "coordinateSystem": {"wkt": "PROJCS[\"WGS 84 / UTM zone 18N\"]"},
        "geoTransform": [500000.0, 30.0, 0.0, 4300000.0, 0.0, -30.0],
        "bands": [{"band": 1, "type": "UInt16", "noDataValue": 0}]
    }"#;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_parse_gdalinfo() {
        let g = parse_gdalinfo(Path::new("ref.tif"), INFO).unwrap();
        assert_eq!((g.width_px, g.height_px), (100, 50));
        assert_eq!(g.pixel_size_y, 30.0);
        assert_eq!(g.nodata_value, Some(0.0));
        assert!(g.projection.contains("UTM zone 18N"));
    }

    #[test]
    fn test_parse_gdalinfo_nan_nodata() {
        let json = INFO.replace("\"noDataValue\": 0", "\"noDataValue\": \"nan\"");
        let g = parse_gdalinfo(Path::new("ref.tif"), &json).unwrap();
        assert!(g.nodata_value.unwrap().is_nan());
    }

    #[test]
    fn test_parse_gdalinfo_without_georeferencing() {
        let json = r#"{"size": [10, 10], "bands": []}"#;
        let err = parse_gdalinfo(Path::new("plain.png"), json).unwrap_err();
        assert!(matches!(err, CoregError::InvalidRaster { .. }));
    }

    #[test]
    fn test_parse_gdalinfo_garbage_is_invalid_raster() {
        let err = parse_gdalinfo(Path::new("broken.tif"), "ERROR 4: not a JSON document").unwrap_err();
        match err {
            CoregError::InvalidRaster { path, reason } => {
                assert_eq!(path, PathBuf::from("broken.tif"));
                assert!(reason.contains("gdalinfo"));
            }
            other => panic!("expected InvalidRaster, got {other:?}"),
        }
    }

    #[test]
    fn test_warp_args_pin_bounds_without_tap() {
        let request = WarpRequest {
            source_path: PathBuf::from("in.tif"),
            destination_path: PathBuf::from("out.tif"),
            source_projection: "EPSG:4326".into(),
            destination_projection: "EPSG:32618".into(),
            target_pixel_size_x: 30.0,
            target_pixel_size_y: 30.0,
            resample_method: ResampleMethod::Nearest,
            output_bounds: Some(Extent::new(500000.0, 4297000.0, 503000.0, 4300000.0)),
            src_nodata: None,
            dst_nodata: Some(-9999.0),
            cutline_path: Some(PathBuf::from("aoi.gpkg")),
            output_format: Some("GTiff".into()),
            target_aligned_pixels: false,
        };
        let args = strings(&warp_args(&request));
        assert_eq!(
            args,
            [
                "-overwrite", "-of", "GTiff", "-s_srs", "EPSG:4326", "-t_srs", "EPSG:32618",
                "-tr", "30", "30", "-r", "near", "-te", "500000", "4297000", "503000",
                "4300000", "-dstnodata", "-9999", "-cutline", "aoi.gpkg", "in.tif", "out.tif",
            ]
        );
    }

    #[test]
    fn test_translate_args_assign_upper_left_lower_right() {
        let request = TranslateRequest {
            source_path: PathBuf::from("in.tif"),
            destination_path: PathBuf::from("out.img"),
            output_format: "HFA".into(),
            assigned_bounds: Extent::new(0.5, -10.0, 10.5, 0.0),
        };
        let args = strings(&translate_args(&request));
        assert_eq!(
            args,
            ["-of", "HFA", "-a_ullr", "0.5", "0", "10.5", "-10", "in.tif", "out.img"]
        );
    }

    #[test]
    fn test_aux_xml_path() {
        assert_eq!(
            aux_xml_path(Path::new("/data/scene.tif")),
            PathBuf::from("/data/scene.tif.aux.xml")
        );
    }
}
