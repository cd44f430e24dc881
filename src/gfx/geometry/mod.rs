//! # Procedural Geometry Generation
//!
//! This module generates the primitive meshes used by the renderer, so no
//! external model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Cube**: box with independent faces and flat normals
//! - **Plane**: single quad in the X-Z plane with tiled texture coordinates
//! - **Pyramid**: square base plus four flat-shaded, two-tone sides
//! - **Sphere**: UV sphere with configurable sectors and stacks
//! - **Cylinder**: cylinder, frustum or cone with optional caps
//! - **TrapezoidPrism**: eight-corner solid with a trapezoidal cross-section
//!
//! All generators use a right-handed, Y-up frame and wind every triangle
//! counter-clockwise as seen from outside.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use gallery::gfx::geometry::{GenerateGeometry, Sphere};
//!
//! let sphere = Sphere::new(1.0, 4, 2, Vector3::new(1.0, 0.0, 0.0)).unwrap();
//! let mesh = sphere.generate_mesh();
//! assert_eq!(mesh.vertex_count(), 15);
//! assert_eq!(mesh.triangle_count(), 8);
//! ```

pub mod builder;
pub mod cube;
pub mod cylinder;
pub mod error;
pub mod plane;
pub mod pyramid;
pub mod sphere;
pub mod trapezoid_prism;

use std::fmt;

use cgmath::{InnerSpace, Vector3};

pub use builder::{Mesh, MeshBuilder};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::ShapeError;
pub use plane::Plane;
pub use pyramid::Pyramid;
pub use sphere::Sphere;
pub use trapezoid_prism::TrapezoidPrism;

/// Identifies which generator produced a shape's mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Plane,
    Pyramid,
    Sphere,
    Cylinder,
    TrapezoidPrism,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Plane => "plane",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::TrapezoidPrism => "trapezoid prism",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Common contract of every primitive generator.
///
/// Implementors hold an immutable parameter set that was validated at
/// construction. `generate` only appends to the builder it is given; it
/// never fails.
pub trait GenerateGeometry {
    fn kind(&self) -> ShapeKind;

    /// Appends this primitive's vertices and triangles to `builder`.
    fn generate(&self, builder: &mut MeshBuilder);

    /// Whether the surface is open and must be drawn without back-face
    /// culling to be visible from both sides.
    fn requires_double_sided(&self) -> bool {
        false
    }

    /// Convenience wrapper producing a fresh mesh.
    fn generate_mesh(&self) -> Mesh {
        let mut builder = MeshBuilder::new();
        self.generate(&mut builder);
        builder.build()
    }
}

/// Closed set of primitives a [`Shape`](crate::gfx::scene::Shape) can own.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cube(Cube),
    Plane(Plane),
    Pyramid(Pyramid),
    Sphere(Sphere),
    Cylinder(Cylinder),
    TrapezoidPrism(TrapezoidPrism),
}

impl Primitive {
    fn generator(&self) -> &dyn GenerateGeometry {
        match self {
            Primitive::Cube(p) => p,
            Primitive::Plane(p) => p,
            Primitive::Pyramid(p) => p,
            Primitive::Sphere(p) => p,
            Primitive::Cylinder(p) => p,
            Primitive::TrapezoidPrism(p) => p,
        }
    }
}

impl GenerateGeometry for Primitive {
    fn kind(&self) -> ShapeKind {
        self.generator().kind()
    }

    fn generate(&self, builder: &mut MeshBuilder) {
        self.generator().generate(builder)
    }

    fn requires_double_sided(&self) -> bool {
        self.generator().requires_double_sided()
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    Primitive::$ty(value)
                }
            }
        )*
    };
}

impl_from_primitive!(Cube, Plane, Pyramid, Sphere, Cylinder, TrapezoidPrism);

/// Unit normal of the triangle `a b c` wound counter-clockwise.
///
/// Returns the zero vector for a degenerate triangle instead of NaNs.
pub fn face_normal(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> Vector3<f32> {
    let n = (b - a).cross(c - a);
    let len2 = n.magnitude2();
    if len2 > f32::EPSILON * f32::EPSILON {
        n / len2.sqrt()
    } else {
        Vector3::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_follows_winding() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let c = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(face_normal(a, b, c), Vector3::unit_z());
        assert_eq!(face_normal(a, c, b), -Vector3::unit_z());
    }

    #[test]
    fn test_face_normal_of_degenerate_triangle_is_zero() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(face_normal(a, a, a), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_primitive_dispatch() {
        let plane: Primitive = Plane::new(2.0, 3.0).unwrap().into();
        assert_eq!(plane.kind(), ShapeKind::Plane);
        assert!(plane.requires_double_sided());
        assert_eq!(plane.generate_mesh().vertex_count(), 4);

        let cube: Primitive = Cube::new(1.0, 1.0, 1.0, Vector3::new(1.0, 1.0, 1.0))
            .unwrap()
            .into();
        assert_eq!(cube.kind(), ShapeKind::Cube);
        assert!(!cube.requires_double_sided());
    }
}
