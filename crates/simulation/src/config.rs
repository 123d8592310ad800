// Rolling stock and platform geometry (metres).
pub const TRAIN_WIDTH: f32 = 6.8;
pub const CAR_GAP: f32 = 0.15;
/// Span covered by one car plus its coupling gap. Platform door units and
/// car spacing along the path both use this length.
pub const DOOR_INTERVAL: f32 = TRAIN_WIDTH + CAR_GAP;
pub const CAR_HEIGHT: f32 = 1.0;
pub const CAR_BODY_WIDTH: f32 = 1.0;
/// Rail head to car centre.
pub const CAR_RIDE_HEIGHT: f32 = 0.5;

pub const RAIL_GAUGE: f32 = 1.067;
pub const PLATFORM_MARGIN: f32 = 0.7;
pub const PLATFORM_DELICACY: usize = 200;
pub const PLATFORM_THICKNESS: f32 = 0.2;
pub const PLATFORM_DROP: f32 = 0.4;

// Sample spacing (metres) for the different consumers of a path.
pub const TRAIN_SAMPLE_INTERVAL: f32 = 0.01;
pub const GUIDEWAY_SAMPLE_INTERVAL: f32 = 1.0;
pub const ESCALATOR_SAMPLE_INTERVAL: f32 = 0.005;
pub const SLICE_RESOLUTION: usize = 1000;
pub const REVERSE_RESOLUTION: usize = 100;
/// Number of chord segments used for arc-length tables.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

// Elevated guideway.
pub const PIER_EVERY: usize = 10;
pub const PIER_WIDTH: f32 = 0.5;
pub const PIER_GROUND_CLEARANCE: f32 = 2.0;
pub const GIRDER_DEPTH: f32 = 0.2;
pub const GIRDER_WIDTH: f32 = 2.0;
pub const GIRDER_DROP: f32 = 1.0;

// Roof.
pub const ROOF_BAYS: usize = 10;
pub const ROOF_THICKNESS: f32 = 0.1;
pub const ROOF_PITCH_DEG: f32 = 10.0;
pub const ROOF_DROP: f32 = 0.4;
pub const ROOF_PILLAR_WIDTH: f32 = 0.15;
pub const ROOF_PILLAR_HEIGHT: f32 = 1.4;
pub const ROOF_PILLAR_DROP: f32 = 1.1;
pub const ROOF_ABOVE_RAIL: f32 = 1.4;

// Platform screen doors.
pub const DOORS_PER_UNIT: usize = 4;
pub const DOOR_WIDTH: f32 = 0.65;
pub const DOOR_LEAF_THICKNESS: f32 = 0.03;
pub const DOOR_LEAF_HEIGHT: f32 = 0.37;
pub const DOOR_LIFT: f32 = 0.005;
pub const FENCE_THICKNESS: f32 = 0.07;
pub const FENCE_HEIGHT: f32 = 0.45;
pub const FENCE_OVERLAP: f32 = 0.05;
pub const DOOR_SETBACK: f32 = 0.9;
pub const DOOR_DROP: f32 = 0.2;
pub const DOOR_TRAVEL: f32 = 0.31;
pub const DOOR_SLIDE_SECS: f32 = 1.5;

// Kinematics, in normalized path units per fixed tick.
pub const FIXED_HZ: f64 = 60.0;
pub const MAX_SPEED: f64 = 0.0005;
pub const ADD_SPEED: f64 = 0.000001;

// Dwell timeline (seconds).
pub const DWELL_BEFORE_OPEN_SECS: f32 = 2.0;
pub const DWELL_OPEN_SECS: f32 = 8.2;
pub const DWELL_AFTER_CLOSE_SECS: f32 = 3.5;
/// Ambient layover range at the lap boundary, in fixed ticks.
pub const LAYOVER_TICKS_MIN: u32 = 100;
pub const LAYOVER_TICKS_MAX: u32 = 1000;

// Elevator.
pub const ELEVATOR_FLOOR_HEIGHT: f32 = 3.5;
pub const ELEVATOR_DOOR_TRAVEL: f32 = 0.2;
pub const ELEVATOR_DOOR_SECS: f32 = 2.525;
pub const ELEVATOR_INNER_LAG: f32 = 0.2;
pub const ELEVATOR_HOLD_SECS: f32 = 7.0;
pub const ELEVATOR_WAIT_SECS: f32 = 3.0;
pub const ELEVATOR_TRAVEL_STEPS: u32 = 1800;
pub const ELEVATOR_EASE_STAGES: u32 = 30;
pub const ELEVATOR_EASE_SLOW_MS: f32 = 30.0;
pub const ELEVATOR_EASE_FAST_MS: f32 = 10.0;

// Escalator.
pub const ESCALATOR_STEP_DEPTH: f32 = 0.3;
pub const ESCALATOR_SPEED: f32 = 0.0005;
pub const ESCALATOR_PLATE_LIFT: f32 = 0.085;

// Bank angle derived from curvature.
pub const BANK_PER_CURVATURE: f32 = 4.0;
pub const MAX_BANK_RAD: f32 = 0.1;
