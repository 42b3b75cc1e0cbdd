#[allow(dead_code)]
mod common;

use std::path::{Path, PathBuf};

use coreg_core::coreg::{Coregistrator, GlobalCoregParams, LocalCoregParams, MatchingWindow};
use coreg_core::error::CoregError;
use coreg_core::grid::Extent;
use coreg_core::progress::{JobStage, NoOpReporter};
use coreg_core::resample::ResampleMethod;

use common::{grid, FakeBackend, FakeShiftEngine, StageLog, UTM_18N};

fn backend() -> FakeBackend {
    FakeBackend::default()
        .with_raster(
            "ref.tif",
            grid((500_000.0, 4_300_000.0), 10.0, (1000, 1000), UTM_18N, None),
        )
        .with_raster(
            "tgt.tif",
            grid((500_005.0, 4_300_003.0), 30.0, (300, 300), UTM_18N, None),
        )
}

#[test]
fn test_global_defaults_defer_window_to_engine() {
    let b = backend();
    let engine = FakeShiftEngine::default();
    let log = StageLog::default();
    let out = Coregistrator::new(&b, &engine)
        .run_global(
            Path::new("ref.tif"),
            Path::new("tgt.tif"),
            Path::new("out.tif"),
            &GlobalCoregParams::default(),
            &log,
        )
        .unwrap();

    assert_eq!(out, PathBuf::from("out.tif"));
    let requests = engine.global.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let r = &requests[0];
    assert_eq!(r.window, MatchingWindow::default());
    assert_eq!(r.settings.max_shift, 5);
    assert_eq!(r.settings.max_iter, 15);
    assert!(r.settings.align_grids && r.settings.match_gsd);
    assert_eq!(r.settings.output_format, "GTiff");
    assert_eq!(
        *log.stages.lock().unwrap(),
        vec![JobStage::Inspecting, JobStage::EstimatingShifts]
    );
}

#[test]
fn test_global_custom_window_in_target_pixels() {
    let b = backend();
    let engine = FakeShiftEngine::default();
    let params = GlobalCoregParams {
        matching_window: Some(Extent::new(501_000.0, 4_298_000.0, 502_920.0, 4_299_280.0)),
        resampling: ResampleMethod::Lanczos,
        ..Default::default()
    };
    let request = Coregistrator::new(&b, &engine)
        .plan_global(
            Path::new("ref.tif"),
            Path::new("tgt.tif"),
            Path::new("out.tif"),
            &params,
        )
        .unwrap();

    assert_eq!(request.window.position, Some((501_960.0, 4_298_640.0)));
    assert_eq!(request.window.size, Some((64, 43)));
    assert_eq!(request.settings.resampling, ResampleMethod::Lanczos);
}

#[test]
fn test_global_rejects_unreadable_target() {
    let b = backend();
    let engine = FakeShiftEngine::default();
    let err = Coregistrator::new(&b, &engine)
        .run_global(
            Path::new("ref.tif"),
            Path::new("nope.tif"),
            Path::new("out.tif"),
            &GlobalCoregParams::default(),
            &NoOpReporter,
        )
        .unwrap_err();
    assert!(matches!(err, CoregError::InvalidRaster { .. }));
    assert!(engine.global.lock().unwrap().is_empty());
}

#[test]
fn test_local_envi_output_redirected() {
    let b = backend();
    let engine = FakeShiftEngine::default();
    let out = Coregistrator::new(&b, &engine)
        .run_local(
            Path::new("ref.tif"),
            Path::new("tgt.tif"),
            Path::new("out/scene.hdr"),
            &LocalCoregParams::default(),
            &NoOpReporter,
        )
        .unwrap();

    assert_eq!(out, PathBuf::from("out/scene.dat"));
    let requests = engine.local.lock().unwrap();
    let r = &requests[0];
    assert_eq!(r.settings.output_format, "ENVI");
    assert_eq!(r.grid_res, 200);
    assert_eq!(r.window_size, 256);
    assert_eq!(r.settings.resampling, ResampleMethod::Cubic);
}

#[test]
fn test_local_rejects_zero_grid() {
    let b = backend();
    let engine = FakeShiftEngine::default();
    let params = LocalCoregParams {
        grid_res: 0,
        ..Default::default()
    };
    let err = Coregistrator::new(&b, &engine)
        .plan_local(
            Path::new("ref.tif"),
            Path::new("tgt.tif"),
            Path::new("out.tif"),
            &params,
        )
        .unwrap_err();
    assert!(matches!(err, CoregError::InvalidParameter(_)));
}
