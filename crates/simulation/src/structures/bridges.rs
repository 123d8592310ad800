//! Parametric bridges: the double-arc truss and a Warren girder.

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

use super::types::{BoxPiece, Placement, StructureDescriptor, StructureKind};

const CHORD: f32 = 0.3;
const WEB: f32 = 0.2;
const BRACE: f32 = 0.1;

/// One circular arc, sampled as `steps` equal chords in X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcParams {
    pub radius: f32,
    /// Angle subtended by the arc, in degrees.
    pub range_deg: f32,
    pub steps: usize,
    /// Vertical offset of the arc centre.
    pub center_y: f32,
}

impl ArcParams {
    fn half_width(&self) -> f32 {
        self.radius * (self.range_deg.to_radians() * 0.5).sin()
    }

    fn step(&self) -> f32 {
        self.half_width() * 2.0 / self.steps as f32
    }

    fn x(&self, i: usize) -> f32 {
        -self.half_width() + i as f32 * self.step()
    }

    fn y_at(&self, x: f32) -> f32 {
        (self.radius * self.radius - x * x).max(0.0).sqrt() + self.center_y
    }

    fn y(&self, i: usize) -> f32 {
        self.y_at(self.x(i))
    }
}

/// Two concentric-ish arcs forming the lower chord (`outer`) and upper
/// chord (`inner`) of a through-arch, doubled in depth and braced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchBridgeParams {
    pub outer: ArcParams,
    pub inner: ArcParams,
    /// Distance between the two trusses.
    pub depth: f32,
    pub position: [f32; 3],
    pub yaw_deg: f32,
}

impl Default for ArchBridgeParams {
    fn default() -> Self {
        Self {
            outer: ArcParams {
                radius: 29.0,
                range_deg: 65.0,
                steps: 16,
                center_y: 0.0,
            },
            inner: ArcParams {
                radius: 25.2,
                range_deg: 85.0,
                steps: 16,
                center_y: 3.0,
            },
            depth: 3.5,
            position: [-6.2, -17.0, -145.0],
            yaw_deg: 107.0,
        }
    }
}

/// Build the arch truss in its local XY plane, copy it `depth` along Z,
/// add the bracing between the copies, then place the whole bridge.
pub fn build_arch_bridge(
    label: &str,
    params: &ArchBridgeParams,
) -> Result<StructureDescriptor, BuildError> {
    let (a, b) = (params.outer, params.inner);
    for arc in [a, b] {
        if arc.radius <= 0.0 {
            return Err(BuildError::InvalidParameter {
                name: "arc radius",
                value: arc.radius,
            });
        }
        if arc.steps < 6 {
            return Err(BuildError::InvalidParameter {
                name: "arc steps",
                value: arc.steps as f32,
            });
        }
    }
    // The upper chord is evaluated at the lower chord's stations.
    if a.half_width() > b.radius {
        return Err(BuildError::InvalidParameter {
            name: "inner arc radius",
            value: b.radius,
        });
    }

    let depth = params.depth;
    let segments = a.steps.max(b.steps);
    let deck_x = a.x(2);
    let deck_y = b.y(2);

    let mut truss = vec![BoxPiece::between(
        Vec3::new(a.x(1), a.y(1), 0.0),
        Vec3::new(a.x(1), b.y(1), 0.0),
        CHORD,
        CHORD,
    )];
    let mut bracing = Vec::new();

    for i in 1..segments - 1 {
        let (x1, y1) = (a.x(i), a.y(i));
        let (x2, y2) = (a.x(i + 1), a.y(i + 1));
        let (y1_b, y2_b) = (b.y(i), b.y(i + 1));
        let p = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

        truss.push(BoxPiece::between(p(x2, y2, 0.0), p(x1, y1, 0.0), CHORD, CHORD));
        truss.push(BoxPiece::between(p(x1, y1_b, 0.0), p(x2, y2_b, 0.0), CHORD, CHORD));

        // Diagonals lean toward the crown on each half.
        if (i as f32) < (segments as f32 - 1.0) * 0.5 {
            truss.push(BoxPiece::between(p(x1, y1, 0.0), p(x2, y2_b, 0.0), WEB, WEB));
            if i > 2 {
                bracing.push(BoxPiece::between(p(x1, y1, 0.0), p(x2, y2, depth * 0.5), BRACE, BRACE));
                bracing.push(BoxPiece::between(p(x1, y1, depth), p(x2, y2, depth * 0.5), BRACE, BRACE));
            }
        } else {
            truss.push(BoxPiece::between(p(x2, y2, 0.0), p(x1, y1_b, 0.0), WEB, WEB));
            if i + 3 < segments {
                bracing.push(BoxPiece::between(p(x1, y1, depth * 0.5), p(x2, y2, 0.0), BRACE, BRACE));
                bracing.push(BoxPiece::between(p(x1, y1, depth * 0.5), p(x2, y2, depth), BRACE, BRACE));
            }
        }

        truss.push(BoxPiece::between(p(x2, y2, 0.0), p(x2, y2_b, 0.0), WEB, WEB));
        if i > 2 && i + 3 < segments {
            bracing.push(BoxPiece::between(p(x1, y1, depth), p(x1, y1, 0.0), BRACE, BRACE));
        }

        // Hanger up to the deck line.
        truss.push(BoxPiece::between(p(x2, y2, 0.0), p(x2, deck_y, 0.0), WEB, WEB));

        if i + 4 == segments {
            bracing.push(BoxPiece::between(p(x2, y2, depth), p(x2, y2, 0.0), WEB, WEB));
        }
        if i + 2 == segments {
            truss.push(BoxPiece::between(p(deck_x, deck_y, 0.0), p(x1, y1_b, 0.0), CHORD, CHORD));
        }
    }

    let placement = Placement::new(
        Vec3::from_array(params.position),
        Quat::from_rotation_y(params.yaw_deg.to_radians()),
    );
    let mirror = Placement::new(Vec3::new(0.0, 0.0, depth), Quat::IDENTITY);

    let mut out = StructureDescriptor::new(label, StructureKind::Bridge);
    out.boxes.extend(truss.iter().map(|b| b.placed(&placement)));
    out.boxes
        .extend(truss.iter().map(|b| b.placed(&mirror).placed(&placement)));
    out.boxes.extend(bracing.iter().map(|b| b.placed(&placement)));
    Ok(out)
}

/// A Warren-truss girder span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GirderBridgeParams {
    pub span: f32,
    pub height: f32,
    pub panels: usize,
    pub depth: f32,
    pub position: [f32; 3],
    pub yaw_deg: f32,
}

impl Default for GirderBridgeParams {
    fn default() -> Self {
        Self {
            span: 24.0,
            height: 2.0,
            panels: 8,
            depth: 2.4,
            position: [0.0, 0.0, 0.0],
            yaw_deg: 0.0,
        }
    }
}

/// Two Warren trusses (bottom chord, top chord, zig-zag web) `depth` apart
/// along local Z, tied by a floor beam at every bottom node.
pub fn build_girder_bridge(
    label: &str,
    params: &GirderBridgeParams,
) -> Result<StructureDescriptor, BuildError> {
    if params.panels < 2 {
        return Err(BuildError::InvalidParameter {
            name: "panels",
            value: params.panels as f32,
        });
    }
    if params.span <= 0.0 || params.height <= 0.0 {
        return Err(BuildError::InvalidParameter {
            name: "girder span",
            value: params.span.min(params.height),
        });
    }

    let panel = params.span / params.panels as f32;
    let placement = Placement::new(
        Vec3::from_array(params.position),
        Quat::from_rotation_y(params.yaw_deg.to_radians()),
    );
    let mut out = StructureDescriptor::new(label, StructureKind::Bridge);

    for z in [0.0, params.depth] {
        let bottom = |i: usize| Vec3::new(i as f32 * panel, 0.0, z);
        let top = |i: usize| Vec3::new((i as f32 + 0.5) * panel, params.height, z);

        out.boxes
            .push(BoxPiece::between(bottom(0), bottom(params.panels), CHORD, CHORD).placed(&placement));
        out.boxes.push(
            BoxPiece::between(top(0), top(params.panels - 1), CHORD, CHORD).placed(&placement),
        );
        for i in 0..params.panels {
            out.boxes
                .push(BoxPiece::between(bottom(i), top(i), WEB, WEB).placed(&placement));
            out.boxes
                .push(BoxPiece::between(top(i), bottom(i + 1), WEB, WEB).placed(&placement));
        }
    }
    for i in 0..=params.panels {
        let x = i as f32 * panel;
        out.boxes.push(
            BoxPiece::between(
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x, 0.0, params.depth),
                WEB,
                WEB,
            )
            .placed(&placement),
        );
    }
    Ok(out)
}
