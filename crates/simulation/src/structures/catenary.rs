//! Catenary portals: a pair of lattice towers joined by a head beam,
//! repeated along the track.

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::curve::SampleTable;
use crate::error::BuildError;

use super::types::{BoxPiece, InstancedPieces, Placement, StructureDescriptor, StructureKind};

/// Shape and spacing of the catenary portals along one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatenaryParams {
    /// Arc length between portals.
    pub spacing: f32,
    pub count: usize,
    /// Distance between the two tower centres, across the track.
    pub span: f32,
    pub left_height: f32,
    pub right_height: f32,
    /// Tower footprint; also the height of one lattice layer.
    pub tower_width: f32,
    /// Cross-section of each lattice member.
    pub member: f32,
}

impl Default for CatenaryParams {
    fn default() -> Self {
        Self {
            spacing: 30.0,
            count: 6,
            span: 3.6,
            left_height: 2.8,
            right_height: 2.6,
            tower_width: 0.25,
            member: 0.03,
        }
    }
}

/// Build one portal template in track-local space (X across, Z along) and
/// place it every `spacing` metres.
pub fn build_catenary(
    label: &str,
    table: &SampleTable,
    params: &CatenaryParams,
) -> Result<StructureDescriptor, BuildError> {
    if params.count == 0 {
        return Err(BuildError::EmptyInput("catenary poles"));
    }
    if params.spacing <= 0.0 {
        return Err(BuildError::InvalidParameter {
            name: "pole spacing",
            value: params.spacing,
        });
    }
    if params.tower_width <= 0.0 || params.span <= params.tower_width {
        return Err(BuildError::InvalidParameter {
            name: "portal span",
            value: params.span,
        });
    }
    for height in [params.left_height, params.right_height] {
        if height < params.tower_width {
            return Err(BuildError::InvalidParameter {
                name: "tower height",
                value: height,
            });
        }
    }
    if table.len() < 2 {
        return Err(BuildError::EmptyInput("catenary track"));
    }

    let template = portal_template(params);
    let frames = table.frames();
    let samples = table.samples();

    let mut placements = Vec::with_capacity(params.count);
    let mut cursor = 0;
    for k in 0..params.count {
        let target = params.spacing * k as f32;
        while cursor < samples.len() && samples[cursor].distance < target {
            cursor += 1;
        }
        if cursor >= samples.len() {
            break;
        }
        placements.push(Placement::new(
            samples[cursor].position,
            Quat::from_rotation_y(frames[cursor].heading),
        ));
    }

    let mut out = StructureDescriptor::new(label, StructureKind::Catenary);
    out.instanced.push(InstancedPieces {
        template,
        placements,
    });
    Ok(out)
}

/// Two towers and the head beam between their tops.
pub fn portal_template(params: &CatenaryParams) -> Vec<BoxPiece> {
    let half_span = params.span * 0.5;
    let mut pieces = lattice_tower(-half_span, params.left_height, params);
    pieces.extend(lattice_tower(half_span, params.right_height, params));
    pieces.push(BoxPiece::between(
        Vec3::new(-half_span, params.left_height, 0.0),
        Vec3::new(half_span, params.right_height, 0.0),
        params.member * 2.0,
        params.member * 2.0,
    ));
    pieces
}

/// A flat lattice tower centred at `x`: two chords, a horizontal strut at
/// every layer boundary, and one diagonal per layer whose direction
/// alternates layer by layer.
pub fn lattice_tower(x: f32, height: f32, params: &CatenaryParams) -> Vec<BoxPiece> {
    let w = params.tower_width;
    let m = params.member;
    let left = x - w * 0.5;
    let right = x + w * 0.5;
    let layers = (height / w).floor() as usize;
    let layer_h = height / layers as f32;

    let mut pieces = Vec::with_capacity(2 + layers * 2 + 1);
    for chord_x in [left, right] {
        pieces.push(BoxPiece::axis_aligned(
            Vec3::new(chord_x, height * 0.5, 0.0),
            Vec3::new(m, height, m),
        ));
    }
    for layer in 0..layers {
        let y0 = layer as f32 * layer_h;
        let y1 = y0 + layer_h;
        pieces.push(BoxPiece::between(
            Vec3::new(left, y0, 0.0),
            Vec3::new(right, y0, 0.0),
            m,
            m,
        ));
        let (from, to) = if layer % 2 == 0 {
            (Vec3::new(left, y0, 0.0), Vec3::new(right, y1, 0.0))
        } else {
            (Vec3::new(right, y0, 0.0), Vec3::new(left, y1, 0.0))
        };
        pieces.push(BoxPiece::between(from, to, m, m));
    }
    pieces.push(BoxPiece::between(
        Vec3::new(left, height, 0.0),
        Vec3::new(right, height, 0.0),
        m,
        m,
    ));
    pieces
}
