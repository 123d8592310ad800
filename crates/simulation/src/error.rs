//! Error types for curve sampling, structure building, door ownership and
//! network configuration.

use std::fmt;

use crate::platform_doors::DoorState;

/// Errors from building or sampling a [`crate::curve::ControlPath`].
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A spline needs at least two control points.
    TooFewControlPoints { got: usize },
    /// Sampling interval must be strictly positive.
    NonPositiveInterval(f32),
    /// All control points coincide.
    ZeroLength,
    /// Slice ratios must satisfy `0 <= start < end <= 1` and keep two points.
    InvalidSlice { start: f32, end: f32 },
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::TooFewControlPoints { got } => {
                write!(f, "control path needs at least 2 points, got {got}")
            }
            CurveError::NonPositiveInterval(interval) => {
                write!(f, "sample interval must be positive, got {interval}")
            }
            CurveError::ZeroLength => write!(f, "control path has zero length"),
            CurveError::InvalidSlice { start, end } => {
                write!(f, "invalid slice range {start}..{end}")
            }
        }
    }
}

impl std::error::Error for CurveError {}

/// Errors produced by structure builders.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    Curve(CurveError),
    /// Two tables that must be walked in lockstep differ in length.
    MismatchedTables { left: usize, right: usize },
    /// Offsetting by `margin` folded the line back on itself near `index`.
    SelfIntersectingOffset { index: usize, margin: f32 },
    InvalidParameter { name: &'static str, value: f32 },
    EmptyInput(&'static str),
    /// A door group could not be taken over by its animator.
    Door(DoorError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Curve(e) => write!(f, "curve error: {e}"),
            BuildError::MismatchedTables { left, right } => {
                write!(f, "paired tables differ in length ({left} vs {right})")
            }
            BuildError::SelfIntersectingOffset { index, margin } => write!(
                f,
                "offset of {margin} self-intersects near sample {index}"
            ),
            BuildError::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
            BuildError::EmptyInput(what) => write!(f, "no input for {what}"),
            BuildError::Door(e) => write!(f, "door error: {e}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Curve(e) => Some(e),
            BuildError::Door(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CurveError> for BuildError {
    fn from(e: CurveError) -> Self {
        BuildError::Curve(e)
    }
}

impl From<DoorError> for BuildError {
    fn from(e: DoorError) -> Self {
        BuildError::Door(e)
    }
}

/// Errors from driving a [`crate::platform_doors::DoorGroup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorError {
    /// The group is mid-animation or already in the requested state.
    Busy { state: DoorState },
    /// The token does not own this group.
    NotOwner,
    /// Another owner holds the group.
    AlreadyClaimed,
}

impl fmt::Display for DoorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorError::Busy { state } => write!(f, "door group busy ({state:?})"),
            DoorError::NotOwner => write!(f, "door token does not own this group"),
            DoorError::AlreadyClaimed => write!(f, "door group already claimed"),
        }
    }
}

impl std::error::Error for DoorError {}

/// Errors from loading a [`crate::network_config::NetworkConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse network config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid network config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_error_display() {
        let e = CurveError::TooFewControlPoints { got: 1 };
        assert_eq!(e.to_string(), "control path needs at least 2 points, got 1");
        assert_eq!(
            CurveError::NonPositiveInterval(0.0).to_string(),
            "sample interval must be positive, got 0"
        );
        assert_eq!(CurveError::ZeroLength.to_string(), "control path has zero length");
        assert_eq!(
            CurveError::InvalidSlice { start: 0.8, end: 0.4 }.to_string(),
            "invalid slice range 0.8..0.4"
        );
    }

    #[test]
    fn test_build_error_display() {
        assert_eq!(
            BuildError::MismatchedTables { left: 10, right: 11 }.to_string(),
            "paired tables differ in length (10 vs 11)"
        );
        assert_eq!(
            BuildError::SelfIntersectingOffset { index: 3, margin: 2.5 }.to_string(),
            "offset of 2.5 self-intersects near sample 3"
        );
        assert_eq!(
            BuildError::InvalidParameter { name: "radius", value: -1.0 }.to_string(),
            "invalid value for radius: -1"
        );
        assert_eq!(
            BuildError::EmptyInput("catenary poles").to_string(),
            "no input for catenary poles"
        );
    }

    #[test]
    fn test_build_error_wraps_curve_error() {
        let e: BuildError = CurveError::ZeroLength.into();
        assert_eq!(e.to_string(), "curve error: control path has zero length");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn test_build_error_wraps_door_error() {
        let e: BuildError = DoorError::AlreadyClaimed.into();
        assert_eq!(e.to_string(), "door error: door group already claimed");
    }

    #[test]
    fn test_door_error_display() {
        let e = DoorError::Busy { state: DoorState::Open };
        assert_eq!(e.to_string(), "door group busy (Open)");
        assert_eq!(
            DoorError::NotOwner.to_string(),
            "door token does not own this group"
        );
        assert_eq!(
            DoorError::AlreadyClaimed.to_string(),
            "door group already claimed"
        );
    }

    #[test]
    fn test_config_error_display() {
        let e = ConfigError::Invalid("no lines".to_string());
        assert_eq!(e.to_string(), "invalid network config: no lines");
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: ConfigError = parse.into();
        assert!(e.to_string().starts_with("failed to parse network config:"));
    }
}
