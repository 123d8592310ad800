use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::math::Vec3;

use super::*;
use crate::error::CurveError;

fn straight(len: f32) -> ControlPath {
    ControlPath::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, len)]).unwrap()
}

fn bend() -> ControlPath {
    ControlPath::new(vec![
        Vec3::new(30.0, 8.0, -135.0),
        Vec3::new(20.0, 7.5, -100.0),
        Vec3::new(6.0, 7.0, -50.0),
        Vec3::new(4.8, 7.0, -30.0),
        Vec3::new(4.8, 7.0, 50.0),
        Vec3::new(3.0, 7.0, 90.0),
    ])
    .unwrap()
}

// ---------------------------------------------------------------------------
// ControlPath
// ---------------------------------------------------------------------------

#[test]
fn test_path_rejects_single_point() {
    let err = ControlPath::new(vec![Vec3::ONE]).unwrap_err();
    assert_eq!(err, CurveError::TooFewControlPoints { got: 1 });
}

#[test]
fn test_path_rejects_coincident_points() {
    let err = ControlPath::new(vec![Vec3::ONE, Vec3::ONE]).unwrap_err();
    assert_eq!(err, CurveError::ZeroLength);
}

#[test]
fn test_path_passes_through_control_points() {
    let path = bend();
    let n = path.control_points().len();
    for (i, cp) in path.control_points().iter().enumerate() {
        let p = path.point(i as f32 / (n - 1) as f32);
        assert!(p.distance(*cp) < 1e-3, "point {i}: {p:?} vs {cp:?}");
    }
}

#[test]
fn test_straight_path_length() {
    let path = straight(10.0);
    assert!((path.length() - 10.0).abs() < 1e-3);
}

#[test]
fn test_point_at_is_arc_length_uniform() {
    let path = bend();
    let a = path.point_at(0.25);
    let b = path.point_at(0.5);
    let c = path.point_at(0.75);
    let ab = a.distance(b);
    let bc = b.distance(c);
    // Chords over quarter-length spans of a gentle curve are close in length.
    assert!((ab - bc).abs() / ab < 0.05, "ab={ab} bc={bc}");
}

#[test]
fn test_u_to_t_endpoints() {
    let path = bend();
    assert_eq!(path.u_to_t(0.0), 0.0);
    assert!((path.u_to_t(1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn test_slice_keeps_middle() {
    let path = bend();
    let sliced = path.slice(0.4, 0.8, 1000).unwrap();
    assert!(sliced.length() < path.length());
    let first = sliced.control_points()[0];
    assert!(first.distance(path.point(400.0 / 1000.0)) < 0.5);
}

#[test]
fn test_slice_rejects_inverted_range() {
    let path = bend();
    let err = path.slice(0.8, 0.4, 1000).unwrap_err();
    assert_eq!(err, CurveError::InvalidSlice { start: 0.8, end: 0.4 });
}

#[test]
fn test_reversed_swaps_ends() {
    let path = bend();
    let rev = path.reversed(100).unwrap();
    assert!(rev.point(0.0).distance(path.point(1.0)) < 1e-3);
    assert!(rev.point(1.0).distance(path.point(0.0)) < 1e-3);
    assert!((rev.length() - path.length()).abs() / path.length() < 0.01);
}

// ---------------------------------------------------------------------------
// SampleTable
// ---------------------------------------------------------------------------

#[test]
fn test_sample_rejects_non_positive_interval() {
    let path = straight(5.0);
    assert_eq!(
        SampleTable::sample(&path, 0.0).unwrap_err(),
        CurveError::NonPositiveInterval(0.0)
    );
    assert!(SampleTable::sample(&path, -1.0).is_err());
}

#[test]
fn test_sample_table_length_formula() {
    let path = bend();
    let table = SampleTable::sample(&path, 1.0).unwrap();
    let expected = (path.length() / 1.0).floor() as usize + 1;
    assert_eq!(table.len(), expected);
}

#[test]
fn test_arc_length_uniformity() {
    let path = bend();
    let interval = 0.5;
    let table = SampleTable::sample(&path, interval).unwrap();
    let positions = table.positions();
    for (i, pair) in positions.windows(2).enumerate() {
        let d = pair[0].distance(pair[1]);
        let is_last = i + 2 == positions.len();
        if is_last {
            assert!(d <= interval + 0.02, "last gap {d}");
        } else {
            assert!((d - interval).abs() < 0.02, "gap {i} = {d}");
        }
    }
}

#[test]
fn test_first_sample_is_path_start_and_last_never_overshoots() {
    let path = bend();
    let table = SampleTable::sample(&path, 3.0).unwrap();
    assert!(table.position(0).unwrap().distance(path.point(0.0)) < 1e-4);
    assert!(table.total_distance() <= path.length());
    let distances: Vec<f32> = table.samples().iter().map(|s| s.distance).collect();
    assert!(distances.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_interval_longer_than_path_gives_single_sample() {
    let path = straight(2.0);
    let table = SampleTable::sample(&path, 5.0).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.point_at_ratio(0.7), Vec3::ZERO);
    assert!(table.tangent_at_ratio(0.5).is_none());
}

#[test]
fn test_sampling_is_deterministic() {
    let a = SampleTable::sample(&bend(), 0.25).unwrap();
    let b = SampleTable::sample(&bend(), 0.25).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_point_at_ratio_clamps() {
    let table = SampleTable::sample(&straight(10.5), 1.0).unwrap();
    assert_eq!(table.len(), 11);
    assert_eq!(table.point_at_ratio(-0.5), table.position(0).unwrap());
    assert_eq!(table.point_at_ratio(1.0), table.position(10).unwrap());
    assert_eq!(table.point_at_ratio(7.0), table.position(10).unwrap());
    // floor(0.5 * 11) = 5
    assert_eq!(table.point_at_ratio(0.5), table.position(5).unwrap());
}

#[test]
fn test_tangent_at_ratio_keeps_successor() {
    let table = SampleTable::sample(&straight(10.5), 1.0).unwrap();
    let (pos, dir) = table.tangent_at_ratio(1.0).unwrap();
    assert_eq!(pos, table.position(9).unwrap());
    assert!((dir - Vec3::Z).length() < 1e-4);
}

#[test]
fn test_by_count_includes_both_ends() {
    let path = bend();
    let table = SampleTable::by_count(&path, 200);
    assert_eq!(table.len(), 201);
    assert!(table.position(200).unwrap().distance(path.point(1.0)) < 1e-3);
}

#[test]
fn test_frames_on_straight_line() {
    let path = ControlPath::new(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]).unwrap();
    let table = SampleTable::sample(&path, 1.0).unwrap();
    for frame in table.frames() {
        assert!((frame.heading - FRAC_PI_2).abs() < 1e-4);
        assert!(frame.grade.abs() < 1e-4);
        assert!(frame.bank.abs() < 1e-4);
    }
}

#[test]
fn test_frames_report_grade() {
    let path = ControlPath::new(vec![Vec3::ZERO, Vec3::new(0.0, 10.0, 10.0)]).unwrap();
    let table = SampleTable::sample(&path, 1.0).unwrap();
    let frame = table.frames()[3];
    assert!((frame.grade - PI / 4.0).abs() < 1e-3);
}

#[test]
fn test_frames_bank_into_curve_is_bounded() {
    let table = SampleTable::sample(&bend(), 0.5).unwrap();
    for frame in table.frames() {
        assert!(frame.bank.abs() <= crate::config::MAX_BANK_RAD + 1e-6);
    }
}

#[test]
fn test_wrap_helpers() {
    assert!((wrap_tau(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
    assert!((wrap_tau(TAU + 0.5) - 0.5).abs() < 1e-5);
    assert!(wrap_tau(-1e-9) < TAU);
    assert!((wrap_pi(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn test_heading_between_axes() {
    assert!(heading_between(Vec3::ZERO, Vec3::Z).abs() < 1e-6);
    assert!((heading_between(Vec3::ZERO, Vec3::X) - FRAC_PI_2).abs() < 1e-6);
}
