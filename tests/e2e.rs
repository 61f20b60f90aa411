mod common;

use common::synthetic_image::{camera_frames, views};
use fringe_stereo::pipeline::{PhaseStereo, PreRectified, StereoParams, StereoReport};
use fringe_stereo::stereo::{MatchConfig, SearchStrategy, ValidRegion};
use nalgebra::Matrix4;

const WIDTH: usize = 320;
const HEIGHT: usize = 6;
const SHIFT: usize = 6;
const FREQS: [f64; 3] = [64.0, 63.0, 56.0];

fn left_position(x: usize) -> f64 {
    (x as f64 + 20.0) / 400.0
}

fn right_position(x: usize) -> f64 {
    left_position(x + SHIFT)
}

fn run(matching: MatchConfig, rectifier: &PreRectified) -> StereoReport {
    let left = camera_frames(WIDTH, HEIGHT, 4, FREQS, left_position);
    let right = camera_frames(WIDTH, HEIGHT, 4, FREQS, right_position);
    let stereo = PhaseStereo::new(StereoParams {
        matching,
        ..Default::default()
    })
    .unwrap();
    stereo
        .process(
            &views(&left, WIDTH, HEIGHT),
            &views(&right, WIDTH, HEIGHT),
            rectifier,
        )
        .unwrap()
}

#[test]
fn fringe_pair_recovers_constant_disparity() {
    let _ = env_logger::builder().is_test(true).try_init();
    let report = run(MatchConfig::default(), &PreRectified::full_frame(WIDTH, HEIGHT));

    assert_eq!(report.left_phase.valid_count(), WIDTH * HEIGHT);
    assert_eq!(report.right_phase.valid_count(), WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..SHIFT {
            assert_eq!(report.disparity.get(x, y), None, "x={x} y={y}");
        }
        for x in SHIFT..WIDTH {
            let d = report
                .disparity
                .get(x, y)
                .unwrap_or_else(|| panic!("no match at x={x} y={y}"));
            assert!((d - SHIFT as f32).abs() < 0.05, "x={x} y={y}: d={d}");
        }
    }
    assert_eq!(report.stats.matched, (WIDTH - SHIFT) * HEIGHT);
    assert_eq!(report.stats.invalid, SHIFT * HEIGHT);
    assert_eq!(report.disparity_to_depth, Matrix4::identity());

    let summary = report.summary();
    assert_eq!(summary.width, WIDTH);
    assert!(summary.timing.total_ms >= 0.0);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["stats"]["matched"], (WIDTH - SHIFT) * HEIGHT);
}

#[test]
fn bucketed_search_agrees_with_linear_scan() {
    let full = PreRectified::full_frame(WIDTH, HEIGHT);
    let linear = run(MatchConfig::default(), &full);
    let bucketed = run(
        MatchConfig {
            strategy: SearchStrategy::BucketedBinary,
            window_size: 16,
            ..Default::default()
        },
        &full,
    );
    // Column SHIFT maps onto the row's first sample, where the bucketed path
    // rejects queries that noise pushed just below it.
    for y in 0..HEIGHT {
        for x in (0..SHIFT).chain(SHIFT + 1..WIDTH) {
            match (linear.disparity.get(x, y), bucketed.disparity.get(x, y)) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-4, "x={x} y={y}: {a} vs {b}"),
                (a, b) => assert_eq!(a, b, "x={x} y={y}"),
            }
        }
    }
}

#[test]
fn valid_regions_restrict_matching() {
    let left_region = ValidRegion::new(10, 1, 300, 4);
    let right_region = ValidRegion::new(0, 1, 300, 4);
    let q = Matrix4::new_scaling(2.0);
    let report = run(
        MatchConfig::default(),
        &PreRectified::new(left_region, right_region, q),
    );

    assert_eq!(report.disparity_to_depth, q);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let d = report.disparity.get(x, y);
            let inside = left_region.contains(x, y);
            if inside && x < 306 {
                let d = d.unwrap_or_else(|| panic!("no match at x={x} y={y}"));
                assert!((d - SHIFT as f32).abs() < 0.05, "x={x} y={y}: d={d}");
            } else {
                assert_eq!(d, None, "x={x} y={y}");
            }
        }
    }
}

#[test]
fn disparity_below_threshold_is_zeroed() {
    let report = run(
        MatchConfig {
            disparity_threshold: 10.0,
            ..Default::default()
        },
        &PreRectified::full_frame(WIDTH, HEIGHT),
    );
    assert_eq!(report.stats.matched, 0);
    assert_eq!(report.stats.zeroed, (WIDTH - SHIFT) * HEIGHT);
    assert_eq!(report.disparity.valid_range(), Some((0.0, 0.0)));
}
