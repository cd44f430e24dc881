//! Single quad in the X-Z plane

use cgmath::{Vector2, Vector3};

use super::{error::ensure_positive, GenerateGeometry, MeshBuilder, ShapeError, ShapeKind};

/// Flat rectangle facing +Y, `width` along X and `length` along Z.
///
/// Used for floors, ceilings and walls, and as artwork billboards once
/// rotated by the model matrix. The texture repeat factor scales the UVs
/// beyond `[0, 1]` so textures tile across large surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: f32,
    length: f32,
    color: Vector3<f32>,
    tex_repeat: Vector2<f32>,
    y_offset: f32,
}

impl Plane {
    /// White plane at y = 0 with the texture shown once
    pub fn new(width: f32, length: f32) -> Result<Self, ShapeError> {
        Ok(Self {
            width: ensure_positive(ShapeKind::Plane, "width", width)?,
            length: ensure_positive(ShapeKind::Plane, "length", length)?,
            color: Vector3::new(1.0, 1.0, 1.0),
            tex_repeat: Vector2::new(1.0, 1.0),
            y_offset: 0.0,
        })
    }

    pub fn with_color(mut self, color: Vector3<f32>) -> Self {
        self.color = color;
        self
    }

    pub fn with_tex_repeat(mut self, tex_repeat: Vector2<f32>) -> Self {
        self.tex_repeat = tex_repeat;
        self
    }

    pub fn with_y_offset(mut self, y_offset: f32) -> Self {
        self.y_offset = y_offset;
        self
    }
}

impl GenerateGeometry for Plane {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Plane
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        let hw = self.width / 2.0;
        let hl = self.length / 2.0;
        let y = self.y_offset;
        let (su, sv) = (self.tex_repeat.x, self.tex_repeat.y);
        let normal = Vector3::unit_y();

        let corners = [
            (Vector3::new(-hw, y, hl), Vector2::new(0.0, sv)),
            (Vector3::new(hw, y, hl), Vector2::new(su, sv)),
            (Vector3::new(hw, y, -hl), Vector2::new(su, 0.0)),
            (Vector3::new(-hw, y, -hl), Vector2::new(0.0, 0.0)),
        ];

        let first = builder.vertex_count();
        for (position, uv) in corners {
            builder.add_vertex(position, self.color, uv, normal);
        }
        builder.add_quad(first, first + 1, first + 2, first + 3);
    }

    /// A plane has no back side of its own, so it stays visible from below.
    fn requires_double_sided(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_generation() {
        let mesh = Plane::new(2.0, 3.0).unwrap().generate_mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert!(mesh.vertices().iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_corners_span_width_and_length() {
        let mesh = Plane::new(2.0, 3.0).unwrap().generate_mesh();
        let xs: Vec<f32> = mesh.vertices().iter().map(|v| v.position[0]).collect();
        let zs: Vec<f32> = mesh.vertices().iter().map(|v| v.position[2]).collect();
        assert_eq!(xs, vec![-1.0, 1.0, 1.0, -1.0]);
        assert_eq!(zs, vec![1.5, 1.5, -1.5, -1.5]);
    }

    #[test]
    fn test_texture_repeat_and_offset() {
        let mesh = Plane::new(25.0, 25.0)
            .unwrap()
            .with_tex_repeat(Vector2::new(12.0, 6.0))
            .with_y_offset(-0.01)
            .generate_mesh();
        assert_eq!(mesh.vertices()[1].tex_coords, [12.0, 6.0]);
        assert_eq!(mesh.vertices()[3].tex_coords, [0.0, 0.0]);
        assert!(mesh.vertices().iter().all(|v| v.position[1] == -0.01));
    }

    #[test]
    fn test_rejects_negative_length() {
        assert!(Plane::new(1.0, -2.0).is_err());
    }
}
