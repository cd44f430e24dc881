//! Cylinder, frustum and cone around the Y axis

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector2, Vector3};

use super::{
    error::{ensure_positive, ensure_radius, ensure_sectors},
    face_normal, GenerateGeometry, MeshBuilder, ShapeError, ShapeKind,
};

/// Surface of revolution centered at the origin, spanning `-height/2` to
/// `height/2` along Y.
///
/// Different base and top radii give a frustum; a zero radius gives a cone
/// whose apex cap is skipped. With smooth shading the side shares vertices
/// between neighbouring quads and uses the exact surface normal; with flat
/// shading every side quad gets its own four vertices and face normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    base_radius: f32,
    top_radius: f32,
    height: f32,
    sectors: u32,
    stacks: u32,
    smooth: bool,
    color: Vector3<f32>,
}

impl Cylinder {
    pub fn new(
        base_radius: f32,
        top_radius: f32,
        height: f32,
        sectors: u32,
        stacks: u32,
        smooth: bool,
        color: Vector3<f32>,
    ) -> Result<Self, ShapeError> {
        let base_radius = ensure_radius(ShapeKind::Cylinder, "base radius", base_radius)?;
        let top_radius = ensure_radius(ShapeKind::Cylinder, "top radius", top_radius)?;
        if base_radius == 0.0 && top_radius == 0.0 {
            return Err(ShapeError::DegenerateCylinder);
        }

        Ok(Self {
            base_radius,
            top_radius,
            height: ensure_positive(ShapeKind::Cylinder, "height", height)?,
            sectors: ensure_sectors(ShapeKind::Cylinder, sectors)?,
            stacks: stacks.max(1),
            smooth,
            color,
        })
    }

    /// Cone with its apex at the top
    pub fn cone(
        radius: f32,
        height: f32,
        sectors: u32,
        color: Vector3<f32>,
    ) -> Result<Self, ShapeError> {
        Self::new(radius, 0.0, height, sectors, 1, true, color)
    }

    pub fn stacks(&self) -> u32 {
        self.stacks
    }

    pub fn sectors(&self) -> u32 {
        self.sectors
    }

    pub fn is_cone(&self) -> bool {
        self.base_radius == 0.0 || self.top_radius == 0.0
    }

    fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    fn angle(&self, j: u32) -> f32 {
        j as f32 * 2.0 * PI / self.sectors as f32
    }

    fn ring_radius(&self, i: u32) -> f32 {
        let t = i as f32 / self.stacks as f32;
        self.base_radius + t * (self.top_radius - self.base_radius)
    }

    fn ring_point(&self, i: u32, j: u32) -> Vector3<f32> {
        let radius = self.ring_radius(i);
        let angle = self.angle(j);
        let y = -self.half_height() + i as f32 / self.stacks as f32 * self.height;
        Vector3::new(radius * angle.cos(), y, -radius * angle.sin())
    }

    /// Outward side normal at angle `j`.
    fn side_normal(&self, j: u32) -> Vector3<f32> {
        let (sin, cos) = self.angle(j).sin_cos();
        if self.base_radius == self.top_radius {
            return Vector3::new(cos, 0.0, -sin);
        }

        // Circumferential tangent crossed with the slanted generator line.
        let slope = (self.top_radius - self.base_radius) / self.height;
        let around = Vector3::new(-sin, 0.0, -cos);
        let along = Vector3::new(cos * slope, 1.0, -sin * slope);
        around.cross(along).normalize()
    }

    fn side_uv(&self, i: u32, j: u32) -> Vector2<f32> {
        Vector2::new(
            j as f32 / self.sectors as f32,
            i as f32 / self.stacks as f32,
        )
    }

    fn build_smooth_side(&self, builder: &mut MeshBuilder) {
        let first = builder.vertex_count();
        for i in 0..=self.stacks {
            for j in 0..=self.sectors {
                builder.add_vertex(
                    self.ring_point(i, j),
                    self.color,
                    self.side_uv(i, j),
                    self.side_normal(j),
                );
            }
        }

        let ring = self.sectors + 1;
        for i in 0..self.stacks {
            let mut k1 = first + i * ring; // current level
            let mut k2 = k1 + ring; // level above
            for _ in 0..self.sectors {
                builder.add_triangle(k1, k1 + 1, k2);
                builder.add_triangle(k2, k1 + 1, k2 + 1);
                k1 += 1;
                k2 += 1;
            }
        }
    }

    fn build_flat_side(&self, builder: &mut MeshBuilder) {
        for i in 0..self.stacks {
            for j in 0..self.sectors {
                let corners = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
                let [a, b, c, d] = corners.map(|(ci, cj)| self.ring_point(ci, cj));
                // A quad narrowing to an apex has a zero-length top edge.
                let normal = if (a - b).magnitude2() > (c - d).magnitude2() {
                    face_normal(a, b, d)
                } else {
                    face_normal(b, c, d)
                };

                let quad = corners.map(|(ci, cj)| {
                    builder.add_vertex(
                        self.ring_point(ci, cj),
                        self.color,
                        self.side_uv(ci, cj),
                        normal,
                    )
                });
                builder.add_triangle(quad[0], quad[1], quad[3]);
                builder.add_triangle(quad[3], quad[1], quad[2]);
            }
        }
    }

    /// Triangle fan closing one end. Skipped when that end's radius is zero.
    fn build_cap(&self, builder: &mut MeshBuilder, top: bool) {
        let (radius, y, normal) = if top {
            (self.top_radius, self.half_height(), Vector3::unit_y())
        } else {
            (self.base_radius, -self.half_height(), -Vector3::unit_y())
        };
        if radius == 0.0 {
            return;
        }

        let center = builder.add_vertex(
            Vector3::new(0.0, y, 0.0),
            self.color,
            Vector2::new(0.5, 0.5),
            normal,
        );
        for j in 0..=self.sectors {
            let (sin, cos) = self.angle(j).sin_cos();
            builder.add_vertex(
                Vector3::new(radius * cos, y, -radius * sin),
                self.color,
                Vector2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
                normal,
            );
        }

        let ring = center + 1;
        for j in 0..self.sectors {
            // The bottom fan is seen from below, so its traversal is mirrored.
            if top {
                builder.add_triangle(center, ring + j, ring + j + 1);
            } else {
                builder.add_triangle(center, ring + j + 1, ring + j);
            }
        }
    }
}

impl GenerateGeometry for Cylinder {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        if self.smooth {
            self.build_smooth_side(builder);
        } else {
            self.build_flat_side(builder);
        }
        self.build_cap(builder, false);
        self.build_cap(builder, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green() -> Vector3<f32> {
        Vector3::new(0.2, 0.8, 0.3)
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = Cylinder::new(1.0, 1.0, 2.0, 4, 1, true, green()).unwrap();
        let mesh = cylinder.generate_mesh();
        // 10 side vertices + 2 caps * (1 center + 5 ring)
        assert_eq!(mesh.vertex_count(), 22);
        // 24 side indices + 2 caps * 12
        assert_eq!(mesh.index_count(), 48);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_side_counts_follow_stacks_and_sectors() {
        let cylinder = Cylinder::new(0.5, 0.5, 2.0, 32, 4, true, green()).unwrap();
        let mesh = cylinder.generate_mesh();
        let side_vertices = 5 * 33;
        let cap_vertices = 2 * (1 + 33);
        assert_eq!(mesh.vertex_count(), side_vertices + cap_vertices);
        assert_eq!(mesh.index_count(), 6 * 4 * 32 + 2 * 3 * 32);
    }

    #[test]
    fn test_pure_cylinder_side_normals_are_horizontal_units() {
        let cylinder = Cylinder::new(1.0, 1.0, 2.0, 16, 3, true, green()).unwrap();
        let mesh = cylinder.generate_mesh();
        let side = 4 * 17;
        for vertex in &mesh.vertices()[..side] {
            let n = Vector3::from(vertex.normal);
            assert!((n.magnitude() - 1.0).abs() < 1e-6);
            assert_eq!(n.y, 0.0);
        }
    }

    #[test]
    fn test_frustum_normals_tilt_towards_narrow_end() {
        let frustum = Cylinder::new(1.0, 0.5, 1.0, 8, 1, true, green()).unwrap();
        let mesh = frustum.generate_mesh();
        for vertex in &mesh.vertices()[..18] {
            let n = Vector3::from(vertex.normal);
            let radial = Vector3::new(vertex.position[0], 0.0, vertex.position[2]);
            assert!((n.magnitude() - 1.0).abs() < 1e-5);
            assert!(n.y > 0.0);
            assert!(n.dot(radial) > 0.0);
            // slope (1.0 - 0.5) / 1.0 gives a normal of (cos, 0.5, -sin) normalized
            assert!((n.y - 0.5 / 1.25f32.sqrt()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cone_skips_apex_cap() {
        let cone = Cylinder::cone(1.0, 2.0, 6, green()).unwrap();
        assert!(cone.is_cone());
        let mesh = cone.generate_mesh();
        assert_eq!(mesh.vertex_count(), 2 * 7 + 1 + 7);
        assert_eq!(mesh.index_count(), 6 * 6 + 3 * 6);
    }

    #[test]
    fn test_zero_stacks_clamp_to_one() {
        let cylinder = Cylinder::new(1.0, 1.0, 1.0, 8, 0, true, green()).unwrap();
        assert_eq!(cylinder.stacks(), 1);
    }

    #[test]
    fn test_caps_face_outward() {
        let cylinder = Cylinder::new(1.0, 1.0, 2.0, 4, 1, true, green()).unwrap();
        let mesh = cylinder.generate_mesh();
        let bottom = &mesh.vertices()[10..15];
        let top = &mesh.vertices()[16..21];
        assert!(bottom.iter().all(|v| v.normal == [0.0, -1.0, 0.0] && v.position[1] == -1.0));
        assert!(top.iter().all(|v| v.normal == [0.0, 1.0, 0.0] && v.position[1] == 1.0));
        assert_eq!(mesh.vertices()[10].tex_coords, [0.5, 0.5]);
    }

    #[test]
    fn test_flat_shading_duplicates_side_vertices() {
        let cylinder = Cylinder::new(1.0, 1.0, 2.0, 6, 2, false, green()).unwrap();
        let mesh = cylinder.generate_mesh();
        let side_vertices = 4 * 6 * 2;
        assert_eq!(mesh.vertex_count(), side_vertices + 2 * 7);
        assert_eq!(mesh.index_count(), 6 * 6 * 2 + 2 * 3 * 6);

        for quad in mesh.vertices()[..side_vertices].chunks(4) {
            assert!(quad.iter().all(|v| v.normal == quad[0].normal));
            let n = Vector3::from(quad[0].normal);
            assert!((n.magnitude() - 1.0).abs() < 1e-5);
            assert!(n.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            Cylinder::new(0.0, 0.0, 1.0, 8, 1, true, green()),
            Err(ShapeError::DegenerateCylinder)
        ));
        assert!(matches!(
            Cylinder::new(-1.0, 1.0, 1.0, 8, 1, true, green()),
            Err(ShapeError::NegativeRadius { .. })
        ));
        assert!(matches!(
            Cylinder::new(1.0, 1.0, 1.0, 0, 1, true, green()),
            Err(ShapeError::TooFewSectors { .. })
        ));
        assert!(Cylinder::new(1.0, 1.0, 0.0, 8, 1, true, green()).is_err());
    }
}
