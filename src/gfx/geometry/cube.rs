//! Axis-aligned box with one independent quad per face

use cgmath::{Vector2, Vector3};

use super::{error::ensure_positive, GenerateGeometry, MeshBuilder, ShapeError, ShapeKind};

/// Box centered at the origin.
///
/// Faces do not share vertices, so each face carries its own flat normal
/// and a full `[0, 1]²` texture range: 24 vertices, 36 indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    width: f32,
    height: f32,
    depth: f32,
    color: Vector3<f32>,
}

impl Cube {
    pub fn new(width: f32, height: f32, depth: f32, color: Vector3<f32>) -> Result<Self, ShapeError> {
        Ok(Self {
            width: ensure_positive(ShapeKind::Cube, "width", width)?,
            height: ensure_positive(ShapeKind::Cube, "height", height)?,
            depth: ensure_positive(ShapeKind::Cube, "depth", depth)?,
            color,
        })
    }

    /// Cube with equal edges
    pub fn uniform(size: f32, color: Vector3<f32>) -> Result<Self, ShapeError> {
        Self::new(size, size, size, color)
    }

    pub fn size(&self) -> Vector3<f32> {
        Vector3::new(self.width, self.height, self.depth)
    }
}

impl GenerateGeometry for Cube {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cube
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let hd = self.depth / 2.0;

        // f/b = front/back, t/b = top/bottom, l/r = left/right
        let ftl = Vector3::new(-hw, hh, hd);
        let ftr = Vector3::new(hw, hh, hd);
        let fbl = Vector3::new(-hw, -hh, hd);
        let fbr = Vector3::new(hw, -hh, hd);
        let btl = Vector3::new(-hw, hh, -hd);
        let btr = Vector3::new(hw, hh, -hd);
        let bbl = Vector3::new(-hw, -hh, -hd);
        let bbr = Vector3::new(hw, -hh, -hd);

        // Corners of each face, counter-clockwise from outside, starting at
        // the corner that maps to UV (0, 0).
        let faces = [
            ([fbl, fbr, ftr, ftl], Vector3::unit_z()),
            ([bbr, bbl, btl, btr], -Vector3::unit_z()),
            ([ftl, ftr, btr, btl], Vector3::unit_y()),
            ([bbl, bbr, fbr, fbl], -Vector3::unit_y()),
            ([fbr, bbr, btr, ftr], Vector3::unit_x()),
            ([bbl, fbl, ftl, btl], -Vector3::unit_x()),
        ];
        let tex_coords = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];

        for (corners, normal) in faces {
            let mut quad = [0u32; 4];
            for (slot, (corner, uv)) in quad.iter_mut().zip(corners.into_iter().zip(tex_coords)) {
                *slot = builder.add_vertex(corner, self.color, uv, normal);
            }
            builder.add_quad(quad[0], quad[1], quad[2], quad[3]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn red_cube() -> Cube {
        Cube::new(1.0, 2.0, 3.0, Vector3::new(1.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_cube_generation() {
        let mesh = red_cube().generate_mesh();
        assert_eq!(mesh.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(mesh.index_count(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_normals_are_axis_aligned_units() {
        let mesh = red_cube().generate_mesh();
        for vertex in mesh.vertices() {
            let n = Vector3::from(vertex.normal);
            assert!((n.magnitude() - 1.0).abs() < 1e-6);
            let non_zero = vertex.normal.iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(non_zero, 1);
        }
    }

    #[test]
    fn test_faces_do_not_share_vertices() {
        let mesh = red_cube().generate_mesh();
        for (face, chunk) in mesh.indices().chunks(6).enumerate() {
            let lo = face as u32 * 4;
            assert!(chunk.iter().all(|&i| (lo..lo + 4).contains(&i)));
        }
    }

    #[test]
    fn test_extents_follow_parameters() {
        let mesh = red_cube().generate_mesh();
        let max = mesh.vertices().iter().fold([f32::MIN; 3], |acc, v| {
            [
                acc[0].max(v.position[0]),
                acc[1].max(v.position[1]),
                acc[2].max(v.position[2]),
            ]
        });
        assert_eq!(max, [0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let err = Cube::new(1.0, 1.0, 0.0, Vector3::new(1.0, 1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::NonPositiveDimension { name: "depth", .. }
        ));
    }
}
