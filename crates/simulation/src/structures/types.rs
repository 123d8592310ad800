//! Geometry descriptors emitted by the structure builders.
//!
//! Descriptors are plain data in world space. The renderer turns each
//! primitive into a mesh; nothing here depends on a rendering API.

use bevy::math::{Quat, Vec3};

/// What a structure is, so the renderer can pick a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Rails,
    Guideway,
    Platform,
    Roof,
    ScreenDoorFence,
    Catenary,
    TunnelWall,
    Bridge,
    Concourse,
    ElevatorShell,
    Escalator,
}

/// An oriented box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPiece {
    pub center: Vec3,
    /// Full extents along the local X, Y and Z axes.
    pub size: Vec3,
    pub rotation: Quat,
}

impl BoxPiece {
    pub fn axis_aligned(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            size,
            rotation: Quat::IDENTITY,
        }
    }

    /// A strut spanning `a` to `b` with its local X along the span.
    pub fn between(a: Vec3, b: Vec3, thickness: f32, depth: f32) -> Self {
        let span = b - a;
        let length = span.length();
        let rotation = if length > f32::EPSILON {
            Quat::from_rotation_arc(Vec3::X, span / length)
        } else {
            Quat::IDENTITY
        };
        Self {
            center: (a + b) * 0.5,
            size: Vec3::new(length, thickness, depth),
            rotation,
        }
    }

    /// The same box moved and turned by a rigid placement.
    pub fn placed(&self, placement: &Placement) -> Self {
        Self {
            center: placement.apply(self.center),
            size: self.size,
            rotation: placement.rotation * self.rotation,
        }
    }
}

/// A quad with thickness. `corners` wind around the top face and the
/// solid extends `thickness` below it, along the face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    pub corners: [Vec3; 4],
    pub thickness: f32,
}

impl Slab {
    /// Upward-facing unit normal of the top face.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c, d] = self.corners;
        let n = (c - a).cross(d - b);
        let n = if n.y < 0.0 { -n } else { n };
        let n = n.normalize_or_zero();
        if n == Vec3::ZERO {
            Vec3::Y
        } else {
            n
        }
    }
}

/// A vertical cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderPiece {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

/// An open polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPlacement {
    pub position: Vec3,
    pub intensity: f32,
    pub range: f32,
}

/// A rigid transform (rotation then translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Placement {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }
}

/// One template of boxes repeated at several placements.
#[derive(Debug, Clone, PartialEq)]
pub struct InstancedPieces {
    pub template: Vec<BoxPiece>,
    pub placements: Vec<Placement>,
}

impl InstancedPieces {
    /// Every instance expanded into world-space boxes.
    pub fn flatten(&self) -> Vec<BoxPiece> {
        self.placements
            .iter()
            .flat_map(|p| self.template.iter().map(move |b| b.placed(p)))
            .collect()
    }
}

/// Everything one builder call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDescriptor {
    pub label: String,
    pub kind: StructureKind,
    pub boxes: Vec<BoxPiece>,
    pub slabs: Vec<Slab>,
    pub cylinders: Vec<CylinderPiece>,
    pub lines: Vec<Polyline>,
    pub instanced: Vec<InstancedPieces>,
    pub lights: Vec<LightPlacement>,
}

impl StructureDescriptor {
    pub fn new(label: impl Into<String>, kind: StructureKind) -> Self {
        Self {
            label: label.into(),
            kind,
            boxes: Vec::new(),
            slabs: Vec::new(),
            cylinders: Vec::new(),
            lines: Vec::new(),
            instanced: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Number of primitives, counting each instance of a template.
    pub fn piece_count(&self) -> usize {
        self.boxes.len()
            + self.slabs.len()
            + self.cylinders.len()
            + self.lines.len()
            + self
                .instanced
                .iter()
                .map(|i| i.template.len() * i.placements.len())
                .sum::<usize>()
    }
}
