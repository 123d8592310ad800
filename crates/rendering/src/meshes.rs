//! Mesh builders for structure descriptors.
//!
//! Every solid primitive of a descriptor is merged into one triangle mesh
//! with flat per-face normals; polylines go into a separate line-list mesh.

use std::f32::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use simulation::structures::{BoxPiece, CylinderPiece, Polyline, Slab, StructureDescriptor};

const CYLINDER_SEGMENTS: u32 = 16;

// ---------------------------------------------------------------------------
// MeshData
// ---------------------------------------------------------------------------

#[derive(Default, Debug)]
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }

    /// One flat quad. Corners wind counter-clockwise seen from `normal`.
    pub fn add_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.positions.len() as u32;
        let uv = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        for (corner, uv) in corners.iter().zip(uv) {
            self.positions.push(corner.to_array());
            self.normals.push(normal.to_array());
            self.uvs.push(uv);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn add_box(&mut self, piece: &BoxPiece) {
        let half = piece.size * 0.5;
        let at = |x: f32, y: f32, z: f32| piece.center + piece.rotation * (half * Vec3::new(x, y, z));
        let dir = |v: Vec3| piece.rotation * v;
        #[rustfmt::skip]
        let faces: [([Vec3; 4], Vec3); 6] = [
            ([at(1.0, -1.0, 1.0), at(1.0, -1.0, -1.0), at(1.0, 1.0, -1.0), at(1.0, 1.0, 1.0)], Vec3::X),
            ([at(-1.0, -1.0, -1.0), at(-1.0, -1.0, 1.0), at(-1.0, 1.0, 1.0), at(-1.0, 1.0, -1.0)], Vec3::NEG_X),
            ([at(-1.0, 1.0, 1.0), at(1.0, 1.0, 1.0), at(1.0, 1.0, -1.0), at(-1.0, 1.0, -1.0)], Vec3::Y),
            ([at(-1.0, -1.0, -1.0), at(1.0, -1.0, -1.0), at(1.0, -1.0, 1.0), at(-1.0, -1.0, 1.0)], Vec3::NEG_Y),
            ([at(-1.0, -1.0, 1.0), at(1.0, -1.0, 1.0), at(1.0, 1.0, 1.0), at(-1.0, 1.0, 1.0)], Vec3::Z),
            ([at(1.0, -1.0, -1.0), at(-1.0, -1.0, -1.0), at(-1.0, 1.0, -1.0), at(1.0, 1.0, -1.0)], Vec3::NEG_Z),
        ];
        for (corners, normal) in faces {
            self.add_quad(corners, dir(normal));
        }
    }

    /// Top face, bottom face one thickness below, and four edges.
    pub fn add_slab(&mut self, slab: &Slab) {
        let normal = slab.normal();
        let mut top = slab.corners;
        // Wind counter-clockwise seen from above.
        if (top[1] - top[0]).cross(top[2] - top[0]).dot(normal) < 0.0 {
            top.reverse();
        }
        let bottom = top.map(|c| c - normal * slab.thickness);

        self.add_quad(top, normal);
        self.add_quad([bottom[3], bottom[2], bottom[1], bottom[0]], -normal);
        for i in 0..4 {
            let j = (i + 1) % 4;
            let edge = top[j] - top[i];
            let outward = edge.cross(normal).normalize_or_zero();
            self.add_quad([bottom[i], bottom[j], top[j], top[i]], outward);
        }
    }

    pub fn add_cylinder(&mut self, piece: &CylinderPiece) {
        let half = piece.height * 0.5;
        let ring = |i: u32| {
            let a = i as f32 / CYLINDER_SEGMENTS as f32 * TAU;
            Vec3::new(a.cos(), 0.0, a.sin())
        };
        let top = piece.center + Vec3::Y * half;
        let bottom = piece.center - Vec3::Y * half;
        for i in 0..CYLINDER_SEGMENTS {
            let (a, b) = (ring(i), ring(i + 1));
            let side = ((a + b) * 0.5).normalize_or_zero();
            self.add_quad(
                [
                    bottom + b * piece.radius,
                    bottom + a * piece.radius,
                    top + a * piece.radius,
                    top + b * piece.radius,
                ],
                side,
            );
            // Caps as degenerate quads around the axis point.
            self.add_quad(
                [top, top + b * piece.radius, top + a * piece.radius, top],
                Vec3::Y,
            );
            self.add_quad(
                [bottom, bottom + a * piece.radius, bottom + b * piece.radius, bottom],
                Vec3::NEG_Y,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptor conversion
// ---------------------------------------------------------------------------

/// All solid primitives of `descriptor`, instances expanded.
pub fn solid_mesh(descriptor: &StructureDescriptor) -> MeshData {
    let mut data = MeshData::new();
    for piece in &descriptor.boxes {
        data.add_box(piece);
    }
    for instanced in &descriptor.instanced {
        for piece in instanced.flatten() {
            data.add_box(&piece);
        }
    }
    for slab in &descriptor.slabs {
        data.add_slab(slab);
    }
    for cylinder in &descriptor.cylinders {
        data.add_cylinder(cylinder);
    }
    data
}

/// Polylines as a line list for an unlit material, or `None` if there are
/// none.
pub fn line_mesh(lines: &[Polyline]) -> Option<Mesh> {
    let positions: Vec<[f32; 3]> = lines
        .iter()
        .flat_map(|line| {
            line.points
                .windows(2)
                .flat_map(|w| [w[0].to_array(), w[1].to_array()])
        })
        .collect();
    if positions.is_empty() {
        return None;
    }
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    Some(
        Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals),
    )
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use simulation::structures::{InstancedPieces, Placement, StructureKind};

    #[test]
    fn test_box_has_six_faces() {
        let mut data = MeshData::new();
        data.add_box(&BoxPiece::axis_aligned(Vec3::ZERO, Vec3::ONE));
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.index_count(), 36);
    }

    #[test]
    fn test_box_normals_follow_rotation() {
        let mut data = MeshData::new();
        let mut piece = BoxPiece::axis_aligned(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        piece.rotation = Quat::from_rotation_y(FRAC_PI_2);
        data.add_box(&piece);
        let first = Vec3::from_array(data.normals[0]);
        assert!(first.distance(Vec3::NEG_Z) < 1e-5, "{first}");
        // The long axis now runs along Z.
        let max_z = data.positions.iter().map(|p| p[2]).fold(f32::MIN, f32::max);
        assert!((max_z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_slab_top_faces_up() {
        let mut data = MeshData::new();
        data.add_slab(&Slab {
            corners: [
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            thickness: 0.2,
        });
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.normals[0], [0.0, 1.0, 0.0]);
        let min_y = data.positions.iter().map(|p| p[1]).fold(f32::MAX, f32::min);
        assert!((min_y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_solid_mesh_expands_instances() {
        let mut descriptor = StructureDescriptor::new("test", StructureKind::Catenary);
        descriptor.instanced.push(InstancedPieces {
            template: vec![BoxPiece::axis_aligned(Vec3::ZERO, Vec3::ONE)],
            placements: vec![Placement::IDENTITY; 3],
        });
        descriptor.cylinders.push(CylinderPiece {
            center: Vec3::ZERO,
            radius: 0.1,
            height: 2.0,
        });
        let data = solid_mesh(&descriptor);
        assert_eq!(data.vertex_count(), 3 * 24 + CYLINDER_SEGMENTS as usize * 12);
    }

    #[test]
    fn test_line_mesh_pairs_segments() {
        assert!(line_mesh(&[]).is_none());
        let line = Polyline {
            points: vec![Vec3::ZERO, Vec3::X, Vec3::Z],
        };
        let mesh = line_mesh(&[line]).expect("mesh");
        assert_eq!(mesh.count_vertices(), 4);
    }
}
