//! UV sphere

use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{Vector2, Vector3};

use super::{
    error::{ensure_positive, ensure_sectors},
    GenerateGeometry, MeshBuilder, ShapeError, ShapeKind,
};

/// Latitude/longitude sphere centered at the origin with its poles on Y.
///
/// `stacks + 1` rings are swept from the north pole (+Y) to the south
/// pole; each ring holds `sectors + 1` vertices whose first and last
/// coincide in position but differ in U, closing the texture seam.
/// Vertex count is `(sectors + 1) * (stacks + 1)` and triangle count is
/// `2 * sectors * (stacks - 1)`: the quads touching a pole collapse into a
/// single triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    radius: f32,
    sectors: u32,
    stacks: u32,
    color: Vector3<f32>,
}

impl Sphere {
    pub const MIN_STACKS: u32 = 2;

    pub fn new(
        radius: f32,
        sectors: u32,
        stacks: u32,
        color: Vector3<f32>,
    ) -> Result<Self, ShapeError> {
        let radius = ensure_positive(ShapeKind::Sphere, "radius", radius)?;
        let sectors = ensure_sectors(ShapeKind::Sphere, sectors)?;
        if stacks < Self::MIN_STACKS {
            return Err(ShapeError::TooFewStacks {
                shape: ShapeKind::Sphere,
                stacks,
                min: Self::MIN_STACKS,
            });
        }

        Ok(Self {
            radius,
            sectors,
            stacks,
            color,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn sectors(&self) -> u32 {
        self.sectors
    }

    pub fn stacks(&self) -> u32 {
        self.stacks
    }
}

impl GenerateGeometry for Sphere {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        let sector_step = 2.0 * PI / self.sectors as f32;
        let stack_step = PI / self.stacks as f32;
        let inv_radius = 1.0 / self.radius;
        let first = builder.vertex_count();

        for i in 0..=self.stacks {
            let stack_angle = FRAC_PI_2 - i as f32 * stack_step; // pi/2 to -pi/2
            let ring_radius = self.radius * stack_angle.cos();
            let y = self.radius * stack_angle.sin();

            for j in 0..=self.sectors {
                let sector_angle = j as f32 * sector_step; // 0 to 2pi

                // Counter-clockwise seen from above, so +X turns towards -Z.
                let position = Vector3::new(
                    ring_radius * sector_angle.cos(),
                    y,
                    -ring_radius * sector_angle.sin(),
                );
                let uv = Vector2::new(
                    j as f32 / self.sectors as f32,
                    1.0 - i as f32 / self.stacks as f32,
                );

                builder.add_vertex(position, self.color, uv, position * inv_radius);
            }
        }

        let ring = self.sectors + 1;
        for i in 0..self.stacks {
            let mut k1 = first + i * ring; // current ring
            let mut k2 = k1 + ring; // ring below

            for _ in 0..self.sectors {
                // The upper triangle degenerates at the north pole...
                if i != 0 {
                    builder.add_triangle(k1, k2, k1 + 1);
                }
                // ...and the lower one at the south pole.
                if i != self.stacks - 1 {
                    builder.add_triangle(k1 + 1, k2, k2 + 1);
                }
                k1 += 1;
                k2 += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn red() -> Vector3<f32> {
        Vector3::new(1.0, 0.0, 0.0)
    }

    #[test]
    fn test_sphere_generation() {
        let mesh = Sphere::new(1.0, 4, 2, red()).unwrap().generate_mesh();
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.triangle_count(), 8);
        let north = mesh.vertices()[0].position;
        assert!((north[1] - 1.0).abs() < 1e-6);
        assert!(north[0].abs() < 1e-6 && north[2].abs() < 1e-6);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_counts_follow_sectors_and_stacks() {
        let mesh = Sphere::new(0.8, 32, 16, red()).unwrap().generate_mesh();
        assert_eq!(mesh.vertex_count(), 33 * 17);
        assert_eq!(mesh.triangle_count(), 2 * 32 * 15);
    }

    #[test]
    fn test_normals_are_exact_radial_units() {
        let radius = 2.5;
        let mesh = Sphere::new(radius, 12, 7, red()).unwrap().generate_mesh();
        for vertex in mesh.vertices() {
            let p = Vector3::from(vertex.position);
            let n = Vector3::from(vertex.normal);
            assert!((n.magnitude() - 1.0).abs() < 1e-5);
            assert!((p / radius - n).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_poles_sit_on_y_axis() {
        let mesh = Sphere::new(1.0, 6, 4, red()).unwrap().generate_mesh();
        let south = mesh.vertices().last().unwrap();
        assert!((south.position[1] + 1.0).abs() < 1e-6);
        assert!(south.position[0].abs() < 1e-6);
    }

    #[test]
    fn test_seam_vertices_share_position_not_uv() {
        let mesh = Sphere::new(1.0, 8, 4, red()).unwrap().generate_mesh();
        let ring = 9;
        let equator_start = &mesh.vertices()[2 * ring];
        let equator_end = &mesh.vertices()[2 * ring + 8];
        for axis in 0..3 {
            assert!((equator_start.position[axis] - equator_end.position[axis]).abs() < 1e-6);
        }
        assert_eq!(equator_start.tex_coords[0], 0.0);
        assert_eq!(equator_end.tex_coords[0], 1.0);
    }

    #[test]
    fn test_rejects_degenerate_subdivision() {
        assert!(matches!(
            Sphere::new(1.0, 0, 8, red()),
            Err(ShapeError::TooFewSectors { sectors: 0, .. })
        ));
        assert!(matches!(
            Sphere::new(1.0, 8, 1, red()),
            Err(ShapeError::TooFewStacks { stacks: 1, .. })
        ));
        assert!(Sphere::new(0.0, 8, 8, red()).is_err());
    }
}
