//! Unit tests for door groups.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec3;

use super::*;
use crate::error::DoorError;

fn leaf(x: f32, z: f32, heading: f32) -> DoorLeaf {
    DoorLeaf {
        rest: Vec3::new(x, 7.0, z),
        heading,
        size: Vec3::new(0.03, 0.37, 0.325),
    }
}

fn platform_group() -> DoorGroup {
    DoorGroup::new(
        vec![
            leaf(0.0, 0.1625, 0.0),
            leaf(0.0, -0.1625, 0.0),
            leaf(1.0, 5.0, 0.3),
            leaf(1.0, 4.7, 0.3),
        ],
        0.31,
        1.5,
    )
}

fn run(group: &mut DoorGroup, seconds: f32) -> Vec<DoorEvent> {
    let dt = 1.0 / 60.0;
    let mut events = Vec::new();
    let mut elapsed = 0.0;
    while elapsed < seconds {
        if let Some(e) = group.advance(dt) {
            events.push(e);
        }
        elapsed += dt;
    }
    events
}

#[test]
fn test_new_group_is_closed_at_rest() {
    let group = platform_group();
    assert_eq!(group.state(), DoorState::Closed);
    for (i, leaf) in group.leaves().iter().enumerate() {
        assert_eq!(group.leaf_position(i), Some(leaf.rest));
    }
    assert_eq!(group.leaf_position(99), None);
}

#[test]
fn test_open_requires_claim() {
    let mut group = platform_group();
    let stranger = DoorToken { owner: 7 };
    assert_eq!(group.open(&stranger), Err(DoorError::NotOwner));
}

#[test]
fn test_second_claim_is_refused() {
    let mut group = platform_group();
    let _token = group.claim(1).unwrap();
    assert_eq!(group.claim(2), Err(DoorError::AlreadyClaimed));
    assert_eq!(group.owner(), Some(1));
}

#[test]
fn test_open_reports_fully_opened_once() {
    let mut group = platform_group();
    let token = group.claim(1).unwrap();
    group.open(&token).unwrap();
    let events = run(&mut group, 2.0);
    assert_eq!(events, vec![DoorEvent::FullyOpened]);
    assert_eq!(group.state(), DoorState::Open);
}

#[test]
fn test_opening_takes_duration_regardless_of_step() {
    let mut coarse = platform_group();
    let token = coarse.claim(1).unwrap();
    coarse.open(&token).unwrap();
    assert_eq!(coarse.advance(0.75), None);
    assert!(matches!(coarse.state(), DoorState::Opening { progress } if (progress - 0.5).abs() < 1e-6));
    assert_eq!(coarse.advance(0.75), Some(DoorEvent::FullyOpened));
}

#[test]
fn test_open_leaves_part_in_opposite_directions() {
    let mut group = platform_group();
    let token = group.claim(1).unwrap();
    group.open(&token).unwrap();
    run(&mut group, 2.0);
    let p0 = group.leaf_position(0).unwrap();
    let p1 = group.leaf_position(1).unwrap();
    // Heading 0 slides along Z: even leaf +Z, odd leaf -Z.
    assert!((p0.z - (0.1625 + 0.31)).abs() < 1e-5);
    assert!((p1.z - (-0.1625 - 0.31)).abs() < 1e-5);
    assert_eq!(p0.y, 7.0);
}

#[test]
fn test_open_close_round_trip_restores_rest() {
    let mut group = platform_group();
    let rest: Vec<Vec3> = group.leaves().iter().map(|l| l.rest).collect();
    let token = group.claim(3).unwrap();
    group.open(&token).unwrap();
    run(&mut group, 2.0);
    group.close(&token).unwrap();
    let events = run(&mut group, 2.0);
    assert_eq!(events, vec![DoorEvent::FullyClosed]);
    for (now, before) in group.leaf_positions().iter().zip(&rest) {
        assert!(now.distance(*before) < 1e-6);
    }
    group.release(token).unwrap();
    assert_eq!(group.owner(), None);
}

#[test]
fn test_cannot_reverse_mid_flight() {
    let mut group = platform_group();
    let token = group.claim(1).unwrap();
    group.open(&token).unwrap();
    group.advance(0.1);
    let err = group.close(&token).unwrap_err();
    assert!(matches!(err, DoorError::Busy { state: DoorState::Opening { .. } }));
    let err = group.open(&token).unwrap_err();
    assert!(matches!(err, DoorError::Busy { .. }));
}

#[test]
fn test_release_refused_while_open() {
    let mut group = platform_group();
    let token = group.claim(1).unwrap();
    group.open(&token).unwrap();
    run(&mut group, 2.0);
    let err = group.release(token).unwrap_err();
    assert_eq!(err, DoorError::Busy { state: DoorState::Open });
}

#[test]
fn test_cancelled_group_freezes() {
    let mut group = platform_group();
    let token = group.claim(1).unwrap();
    group.open(&token).unwrap();
    group.advance(0.3);
    let before = group.leaf_positions();
    group.cancel();
    assert_eq!(group.advance(5.0), None);
    assert_eq!(group.leaf_positions(), before);
    assert!(group.is_cancelled());
}

#[test]
fn test_lateral_follows_heading() {
    let l = leaf(0.0, 0.0, FRAC_PI_2);
    assert!((l.lateral() - Vec3::X).length() < 1e-6);
}

#[test]
fn test_openness_by_state() {
    assert_eq!(DoorState::Closed.openness(), 0.0);
    assert_eq!(DoorState::Open.openness(), 1.0);
    assert_eq!(DoorState::Opening { progress: 0.25 }.openness(), 0.25);
    assert_eq!(DoorState::Closing { progress: 0.25 }.openness(), 0.75);
    assert!(DoorState::Open.is_at_rest());
    assert!(!DoorState::Closing { progress: 0.1 }.is_at_rest());
}

#[test]
fn test_platform_doors_cancel_all() {
    let mut doors = PlatformDoors {
        groups: vec![platform_group(), platform_group()],
    };
    doors.cancel_all();
    assert!(doors.groups.iter().all(|g| g.is_cancelled()));
    assert!(doors.get(1).is_some());
    assert!(doors.get(2).is_none());
}
