//! Unit tests for the elevator script.

use super::*;
use crate::config::{ELEVATOR_FLOOR_HEIGHT, ELEVATOR_TRAVEL_STEPS};
use crate::platform_doors::DoorState;
use crate::structures::StructureKind;

const DT: f32 = 1.0 / 60.0;

fn shaft(starts_upper: bool) -> ElevatorShaft {
    let assembly = build_elevator("lift", 7.1, 36.0, 0.0).unwrap();
    ElevatorShaft::new("lift", assembly, 0, starts_upper).unwrap()
}

/// Tick until `pred` holds, returning every event seen. Panics after
/// `max_secs` of simulated time.
fn run_until(
    shaft: &mut ElevatorShaft,
    max_secs: f32,
    pred: impl Fn(&ElevatorShaft) -> bool,
) -> Vec<ElevatorEvent> {
    let mut events = Vec::new();
    let mut elapsed = 0.0;
    while !pred(shaft) {
        assert!(elapsed < max_secs, "condition not reached in {max_secs}s");
        if let Some(e) = shaft.advance(DT) {
            events.push(e);
        }
        elapsed += DT;
    }
    events
}

#[test]
fn test_step_duration_profile() {
    let range = ELEVATOR_TRAVEL_STEPS;
    assert_eq!(step_duration_ms(0, range, 30), 30.0);
    assert_eq!(step_duration_ms(900, range, 30), 10.0);
    assert!((step_duration_ms(269, range, 30) - 10.0).abs() < 1e-4);
    assert_eq!(step_duration_ms(1530, range, 30), 10.0);
    assert!((step_duration_ms(range - 1, range, 30) - 30.0).abs() < 1e-4);
    // Monotonic on the way in.
    for i in 1..270 {
        assert!(step_duration_ms(i, range, 30) <= step_duration_ms(i - 1, range, 30));
    }
}

#[test]
fn test_assembly_layout() {
    let a = build_elevator("lift", 7.1, 36.0, 0.0).unwrap();
    assert_eq!(a.shell.kind, StructureKind::ElevatorShell);
    assert_eq!(a.shell.boxes.len(), 5);
    assert_eq!(a.frame.len(), 4);
    assert_eq!(a.lower.leaves().len(), 2);
    assert!((a.upper.leaves()[0].rest.y - ELEVATOR_FLOOR_HEIGHT).abs() < 1e-6);
    assert!((a.car.leaves()[1].rest.x + 0.2).abs() < 1e-6);
}

#[test]
fn test_shaft_claims_its_doors() {
    let s = shaft(false);
    assert_eq!(s.assembly().lower.owner(), Some(0));
    assert_eq!(s.assembly().car.owner(), Some(0));
}

#[test]
fn test_lower_shaft_opens_landing_first() {
    let mut s = shaft(false);
    assert_eq!(s.stage(), ElevatorStage::Serve(Floor::Lower));
    s.advance(DT);
    assert!(matches!(s.assembly().lower.state(), DoorState::Opening { .. }));
    // Car doors lag behind.
    assert_eq!(s.assembly().car.state(), DoorState::Closed);
    run_until(&mut s, 1.0, |s| s.assembly().car.state() != DoorState::Closed);
}

#[test]
fn test_doors_open_hold_and_close() {
    let mut s = shaft(false);
    let events = run_until(&mut s, 5.0, |s| {
        matches!(s.phase(), ElevatorPhase::Doors { cycle: DoorCycle::Holding { .. }, .. })
    });
    assert_eq!(events, vec![ElevatorEvent::DoorsOpen(Floor::Lower)]);
    assert_eq!(s.assembly().lower.state(), DoorState::Open);
    assert_eq!(s.assembly().car.state(), DoorState::Open);

    let events = run_until(&mut s, 12.0, |s| s.stage() == ElevatorStage::Wait);
    assert_eq!(events, vec![ElevatorEvent::DoorsClosed(Floor::Lower)]);
    assert_eq!(s.assembly().lower.state(), DoorState::Closed);
    assert_eq!(s.assembly().car.state(), DoorState::Closed);
}

#[test]
fn test_round_trip_restores_leaves() {
    let mut s = shaft(false);
    let before = s.leaf_offsets();
    run_until(&mut s, 20.0, |s| s.stage() == ElevatorStage::Wait);
    for (now, rest) in s.leaf_offsets().iter().zip(&before) {
        assert!(now.distance(*rest) < 1e-5);
    }
}

#[test]
fn test_car_travels_to_upper_floor() {
    let mut s = shaft(false);
    run_until(&mut s, 40.0, |s| {
        matches!(s.stage(), ElevatorStage::Travel { to: Floor::Upper })
    });
    assert_eq!(s.floor(), Some(Floor::Lower));
    s.advance(DT);
    s.advance(DT);
    assert_eq!(s.floor(), None);
    let events = run_until(&mut s, 30.0, |s| s.stage() != ElevatorStage::Travel { to: Floor::Upper });
    assert_eq!(events, vec![ElevatorEvent::Arrived(Floor::Upper)]);
    assert_eq!(s.car_offset(), ELEVATOR_FLOOR_HEIGHT);
    // Car doors ride with the car.
    let car = s.leaf_offsets()[4];
    assert!((car.y - ELEVATOR_FLOOR_HEIGHT).abs() < 1e-5);
}

#[test]
fn test_second_shaft_starts_upstairs() {
    let mut upper = shaft(true);
    let mut lower = shaft(false);
    assert_eq!(upper.floor(), Some(Floor::Upper));
    assert_eq!(upper.stage(), ElevatorStage::Serve(Floor::Upper));
    // Both shafts leave at the same moment in opposite directions.
    run_until(&mut upper, 40.0, |s| matches!(s.phase(), ElevatorPhase::Travelling { .. }));
    run_until(&mut lower, 40.0, |s| matches!(s.phase(), ElevatorPhase::Travelling { .. }));
    for _ in 0..600 {
        upper.advance(DT);
        lower.advance(DT);
    }
    assert!(upper.car_offset() < ELEVATOR_FLOOR_HEIGHT);
    assert!(lower.car_offset() > 0.0);
    assert!((upper.car_offset() + lower.car_offset() - ELEVATOR_FLOOR_HEIGHT).abs() < 1e-3);
}

#[test]
fn test_cancel_freezes_shaft() {
    let mut s = shaft(false);
    s.advance(0.5);
    let phase = s.phase();
    let leaves = s.leaf_offsets();
    s.cancel();
    assert_eq!(s.advance(1.0), None);
    assert_eq!(s.phase(), phase);
    assert_eq!(s.leaf_offsets(), leaves);
    assert!(s.is_cancelled());

    let mut all = Elevators {
        shafts: vec![shaft(false), shaft(true)],
    };
    all.cancel_all();
    assert!(all.shafts.iter().all(|s| s.is_cancelled()));
}
