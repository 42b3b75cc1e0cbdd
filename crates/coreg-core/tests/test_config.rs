use std::path::PathBuf;

use coreg_core::config::CoregConfig;
use coreg_core::coreg::{GlobalCoregParams, LocalCoregParams};
use coreg_core::error::CoregError;
use coreg_core::progress::JobStage;
use coreg_core::resample::ResampleMethod;
use coreg_core::warp::AlignStrategy;

#[test]
fn test_default_config_survives_toml() {
    let config = CoregConfig::default();
    let text = config.to_toml().unwrap();
    assert_eq!(CoregConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn test_partial_config_fills_defaults() {
    let config = CoregConfig::from_toml(
        r#"
        [tools]
        gdalinfo = "/opt/gdal/bin/gdalinfo"
        gdalwarp = "/opt/gdal/bin/gdalwarp"
        gdal_translate = "/opt/gdal/bin/gdal_translate"
        arosics = "arosics"

        [align]
        resampling = "cubic-spline"
        strategy = "two-stage"
        "#,
    )
    .unwrap();

    assert_eq!(config.tools.gdalwarp, PathBuf::from("/opt/gdal/bin/gdalwarp"));
    assert_eq!(config.align.resampling, ResampleMethod::CubicSpline);
    assert_eq!(config.align.strategy, AlignStrategy::TwoStage);
    assert_eq!(config.local.grid_res, 200);
    assert!(config.global.align_grids);
}

#[test]
fn test_bad_resampling_name_is_config_error() {
    let err = CoregConfig::from_toml("[align]\nresampling = \"sinc\"\n").unwrap_err();
    assert!(matches!(err, CoregError::Config(_)));
}

#[test]
fn test_params_follow_config_defaults() {
    let mut config = CoregConfig::default();
    config.global.max_shift = 9;
    config.local.workers = Some(4);

    assert_eq!(GlobalCoregParams::from(&config.global).max_shift, 9);
    assert_eq!(LocalCoregParams::from(&config.local).workers, Some(4));
}

#[test]
fn test_resample_display_names() {
    assert_eq!(format!("{}", ResampleMethod::Nearest), "Nearest Neighbour");
    assert_eq!(format!("{}", ResampleMethod::Lanczos), "Lanczos Windowed Sinc");
    assert_eq!(format!("{}", ResampleMethod::ThirdQuartile), "Third Quartile");
}

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", JobStage::Reprojecting), "Reprojecting");
    assert_eq!(format!("{}", AlignStrategy::TwoStage), "Reproject then align");
}
