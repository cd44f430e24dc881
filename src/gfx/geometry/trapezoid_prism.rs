//! Eight-corner solid with a trapezoidal side profile

use cgmath::{Vector2, Vector3};

use super::{
    error::ensure_positive, face_normal, GenerateGeometry, MeshBuilder, ShapeError, ShapeKind,
};

/// Block whose top and bottom have different depths.
///
/// The back face rests against `z = 0` at the bottom; the top is centered
/// over the bottom, so a deeper bottom leans the front and back faces
/// inwards. Useful for benches, plinths and wall-mounted ledges. Like
/// [`Cube`](super::Cube), each of the six faces has its own four vertices
/// and a flat normal derived from its corners.
#[derive(Debug, Clone, PartialEq)]
pub struct TrapezoidPrism {
    width: f32,
    height: f32,
    depth_top: f32,
    depth_bottom: f32,
    color: Vector3<f32>,
}

impl TrapezoidPrism {
    pub fn new(
        width: f32,
        height: f32,
        depth_top: f32,
        depth_bottom: f32,
        color: Vector3<f32>,
    ) -> Result<Self, ShapeError> {
        let kind = ShapeKind::TrapezoidPrism;
        Ok(Self {
            width: ensure_positive(kind, "width", width)?,
            height: ensure_positive(kind, "height", height)?,
            depth_top: ensure_positive(kind, "top depth", depth_top)?,
            depth_bottom: ensure_positive(kind, "bottom depth", depth_bottom)?,
            color,
        })
    }

    /// The eight corners: bottom back-left, back-right, front-right,
    /// front-left, then the same four at the top.
    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let hw = self.width / 2.0;
        let h = self.height;
        let db = self.depth_bottom;
        let mid = db / 2.0;
        let ht = self.depth_top / 2.0;

        [
            Vector3::new(-hw, 0.0, 0.0),
            Vector3::new(hw, 0.0, 0.0),
            Vector3::new(hw, 0.0, db),
            Vector3::new(-hw, 0.0, db),
            Vector3::new(-hw, h, mid - ht),
            Vector3::new(hw, h, mid - ht),
            Vector3::new(hw, h, mid + ht),
            Vector3::new(-hw, h, mid + ht),
        ]
    }
}

impl GenerateGeometry for TrapezoidPrism {
    fn kind(&self) -> ShapeKind {
        ShapeKind::TrapezoidPrism
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        let v = self.corners();

        // Corner indices per face, counter-clockwise seen from outside.
        const FACES: [[usize; 4]; 6] = [
            [3, 2, 6, 7], // front
            [1, 0, 4, 5], // back
            [7, 6, 5, 4], // top
            [0, 1, 2, 3], // bottom
            [2, 1, 5, 6], // right
            [0, 3, 7, 4], // left
        ];
        let tex_coords = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];

        for face in FACES {
            let normal = face_normal(v[face[0]], v[face[1]], v[face[2]]);
            let mut quad = [0u32; 4];
            for (slot, (&corner, uv)) in quad.iter_mut().zip(face.iter().zip(tex_coords)) {
                *slot = builder.add_vertex(v[corner], self.color, uv, normal);
            }
            builder.add_quad(quad[0], quad[1], quad[2], quad[3]);
        }
    }
}
