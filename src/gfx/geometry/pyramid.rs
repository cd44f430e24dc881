//! Square pyramid with flat-shaded, two-tone sides

use cgmath::{Vector2, Vector3};

use super::{
    error::ensure_positive, face_normal, GenerateGeometry, MeshBuilder, ShapeError, ShapeKind,
};

/// Pyramid standing on the X-Z plane with its apex on +Y.
///
/// The base is one quad (4 vertices) facing down. Each side is an
/// independent triangle so it keeps its own flat normal; the apex vertex
/// uses `peak_color` while base vertices use `base_color`, which gives the
/// sides a vertical gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    base_size: f32,
    height: f32,
    base_color: Vector3<f32>,
    peak_color: Vector3<f32>,
    uv_repeat: f32,
}

impl Default for Pyramid {
    fn default() -> Self {
        Self {
            base_size: 1.0,
            height: 0.8,
            base_color: Vector3::new(0.83, 0.70, 0.44),
            peak_color: Vector3::new(0.92, 0.86, 0.76),
            uv_repeat: 5.0,
        }
    }
}

impl Pyramid {
    pub fn new(base_color: Vector3<f32>, peak_color: Vector3<f32>) -> Self {
        Self {
            base_color,
            peak_color,
            ..Default::default()
        }
    }

    /// Set the base edge length and the apex height
    pub fn with_dimensions(mut self, base_size: f32, height: f32) -> Result<Self, ShapeError> {
        self.base_size = ensure_positive(ShapeKind::Pyramid, "base size", base_size)?;
        self.height = ensure_positive(ShapeKind::Pyramid, "height", height)?;
        Ok(self)
    }

    pub fn with_uv_repeat(mut self, uv_repeat: f32) -> Self {
        self.uv_repeat = uv_repeat;
        self
    }

    pub fn apex(&self) -> Vector3<f32> {
        Vector3::new(0.0, self.height, 0.0)
    }
}

impl GenerateGeometry for Pyramid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Pyramid
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        let h = self.base_size / 2.0;
        let r = self.uv_repeat;
        let apex = self.apex();

        // Base corners counter-clockwise seen from above, starting front-left.
        let corners = [
            Vector3::new(-h, 0.0, h),
            Vector3::new(h, 0.0, h),
            Vector3::new(h, 0.0, -h),
            Vector3::new(-h, 0.0, -h),
        ];

        // Base: the same corners walked the other way round face down.
        let down = -Vector3::unit_y();
        let first = builder.vertex_count();
        for (corner, uv) in [
            (corners[0], Vector2::new(0.0, 0.0)),
            (corners[3], Vector2::new(0.0, r)),
            (corners[2], Vector2::new(r, r)),
            (corners[1], Vector2::new(r, 0.0)),
        ] {
            builder.add_vertex(corner, self.base_color, uv, down);
        }
        builder.add_quad(first, first + 1, first + 2, first + 3);

        // Sides: front, right, back, left, each base edge paired with the apex.
        for i in 0..corners.len() {
            let left = corners[i];
            let right = corners[(i + 1) % corners.len()];
            let normal = face_normal(left, right, apex);

            let a = builder.add_vertex(left, self.base_color, Vector2::new(0.0, 0.0), normal);
            let b = builder.add_vertex(right, self.base_color, Vector2::new(r, 0.0), normal);
            let c = builder.add_vertex(apex, self.peak_color, Vector2::new(r / 2.0, r), normal);
            builder.add_triangle(a, b, c);
        }
    }
}
