//! Properties every generated mesh must satisfy, checked across fixed and
//! randomized parameter sets.

use cgmath::{InnerSpace, Vector2, Vector3};
use gallery::gfx::geometry::{
    Cube, Cylinder, GenerateGeometry, Mesh, Plane, Primitive, Pyramid, Sphere, TrapezoidPrism,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn white() -> Vector3<f32> {
    Vector3::new(1.0, 1.0, 1.0)
}

fn sample_primitives() -> Vec<Primitive> {
    vec![
        Cube::new(1.0, 2.0, 0.5, white()).unwrap().into(),
        Plane::new(4.0, 2.0).unwrap().into(),
        Pyramid::default().into(),
        Sphere::new(1.0, 16, 8, white()).unwrap().into(),
        Cylinder::new(0.5, 0.5, 2.0, 12, 3, true, white()).unwrap().into(),
        Cylinder::new(0.8, 0.3, 1.0, 6, 2, false, white()).unwrap().into(),
        Cylinder::cone(0.5, 1.5, 24, white()).unwrap().into(),
        TrapezoidPrism::new(1.5, 0.6, 0.3, 0.8, white()).unwrap().into(),
    ]
}

fn position(mesh: &Mesh, index: u32) -> Vector3<f32> {
    Vector3::from(mesh.vertices()[index as usize].position)
}

fn normal(mesh: &Mesh, index: u32) -> Vector3<f32> {
    Vector3::from(mesh.vertices()[index as usize].normal)
}

fn assert_indices_form_triangles(mesh: &Mesh, label: &str) {
    assert_eq!(mesh.index_count() % 3, 0, "{label}: dangling indices");
    let count = mesh.vertex_count() as u32;
    assert!(
        mesh.indices().iter().all(|&i| i < count),
        "{label}: index out of range"
    );
    assert!(mesh.validate().is_ok(), "{label}: failed validation");
}

/// Every triangle with area must face the same way as its vertex normals.
fn assert_outward_winding(mesh: &Mesh, label: &str) {
    for [a, b, c] in mesh.triangles() {
        let (pa, pb, pc) = (position(mesh, a), position(mesh, b), position(mesh, c));
        let cross = (pb - pa).cross(pc - pa);
        if cross.magnitude() < 1e-6 {
            continue;
        }
        let summed = normal(mesh, a) + normal(mesh, b) + normal(mesh, c);
        assert!(
            cross.dot(summed) > 0.0,
            "{label}: triangle {a} {b} {c} is wound against its normals"
        );
    }
}

#[test]
fn test_every_primitive_yields_whole_triangles() {
    for primitive in sample_primitives() {
        let mesh = primitive.generate_mesh();
        let label = primitive.kind().to_string();
        assert!(!mesh.is_empty(), "{label}: empty mesh");
        assert_indices_form_triangles(&mesh, &label);
    }
}

#[test]
fn test_every_primitive_winds_counter_clockwise_from_outside() {
    for primitive in sample_primitives() {
        let mesh = primitive.generate_mesh();
        assert_outward_winding(&mesh, primitive.kind().name());
    }
}

#[test]
fn test_normals_are_unit_length() {
    for primitive in sample_primitives() {
        let mesh = primitive.generate_mesh();
        for vertex in mesh.vertices() {
            let length = Vector3::from(vertex.normal).magnitude();
            assert!(
                (length - 1.0).abs() < 1e-4,
                "{}: normal of length {length}",
                primitive.kind()
            );
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    for primitive in sample_primitives() {
        let first = primitive.generate_mesh();
        let second = primitive.generate_mesh();
        assert_eq!(first.vertex_bytes(), second.vertex_bytes());
        assert_eq!(first.index_bytes(), second.index_bytes());
    }
}

#[test]
fn test_sphere_counts_follow_subdivision() {
    for (sectors, stacks) in [(3, 2), (4, 2), (8, 3), (36, 18), (64, 32)] {
        let mesh = Sphere::new(1.0, sectors, stacks, white())
            .unwrap()
            .generate_mesh();
        let (sectors, stacks) = (sectors as usize, stacks as usize);
        assert_eq!(mesh.vertex_count(), (sectors + 1) * (stacks + 1));
        assert_eq!(mesh.triangle_count(), 2 * sectors * (stacks - 1));
    }
}

#[test]
fn test_straight_cylinder_side_normals_are_horizontal() {
    let sectors = 8;
    let stacks = 2;
    let mesh = Cylinder::new(1.0, 1.0, 2.0, sectors, stacks, true, white())
        .unwrap()
        .generate_mesh();

    let side_vertices = ((sectors + 1) * (stacks + 1)) as usize;
    for vertex in &mesh.vertices()[..side_vertices] {
        assert!(vertex.normal[1].abs() < 1e-6);
        let radial = Vector2::new(vertex.position[0], vertex.position[2]);
        let normal = Vector2::new(vertex.normal[0], vertex.normal[2]);
        assert!((radial - normal).magnitude() < 1e-5);
    }
}

#[test]
fn test_cube_faces_are_axis_aligned() {
    let mesh = Cube::uniform(2.0, white()).unwrap().generate_mesh();
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.index_count(), 36);

    for vertex in mesh.vertices() {
        let axis = vertex
            .normal
            .iter()
            .position(|component| component.abs() == 1.0)
            .expect("normal along one axis");
        assert_eq!(vertex.position[axis], vertex.normal[axis]);
    }

    // Six indices per face, all drawn from that face's own four vertices.
    for (face, indices) in mesh.indices().chunks(6).enumerate() {
        let first = face as u32 * 4;
        assert!(indices.iter().all(|&i| (first..first + 4).contains(&i)));
    }
}

#[test]
fn test_floor_plane_tiles_texture() {
    let mesh = Plane::new(25.0, 25.0)
        .unwrap()
        .with_tex_repeat(Vector2::new(10.0, 10.0))
        .generate_mesh();

    assert_eq!(mesh.triangle_count(), 2);
    let max_u = mesh
        .vertices()
        .iter()
        .map(|v| v.tex_coords[0])
        .fold(f32::MIN, f32::max);
    assert_eq!(max_u, 10.0);
    assert!(mesh
        .vertices()
        .iter()
        .all(|v| v.position[0].abs() == 12.5 && v.position[2].abs() == 12.5));
}

#[test]
fn test_random_parameters_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x9a11e7);

    for _ in 0..64 {
        let color = Vector3::new(
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
        );
        let primitives: Vec<Primitive> = vec![
            Cube::new(
                rng.random_range(0.05..5.0),
                rng.random_range(0.05..5.0),
                rng.random_range(0.05..5.0),
                color,
            )
            .unwrap()
            .into(),
            Sphere::new(
                rng.random_range(0.05..5.0),
                rng.random_range(3..48),
                rng.random_range(2..24),
                color,
            )
            .unwrap()
            .into(),
            Cylinder::new(
                rng.random_range(0.0..2.0),
                rng.random_range(0.05..2.0),
                rng.random_range(0.05..4.0),
                rng.random_range(3..40),
                rng.random_range(1..5),
                rng.random_bool(0.5),
                color,
            )
            .unwrap()
            .into(),
            Pyramid::new(color, white())
                .with_dimensions(rng.random_range(0.05..3.0), rng.random_range(0.05..3.0))
                .unwrap()
                .into(),
            TrapezoidPrism::new(
                rng.random_range(0.05..3.0),
                rng.random_range(0.05..3.0),
                rng.random_range(0.05..3.0),
                rng.random_range(0.05..3.0),
                color,
            )
            .unwrap()
            .into(),
        ];

        for primitive in primitives {
            let mesh = primitive.generate_mesh();
            let label = format!("{primitive:?}");
            assert_indices_form_triangles(&mesh, &label);
            assert_outward_winding(&mesh, &label);
        }
    }
}

#[test]
fn test_invalid_parameters_are_rejected() {
    assert!(Cube::new(0.0, 1.0, 1.0, white()).is_err());
    assert!(Plane::new(f32::NAN, 1.0).is_err());
    assert!(Sphere::new(-1.0, 8, 4, white()).is_err());
    assert!(Sphere::new(1.0, 2, 4, white()).is_err());
    assert!(Cylinder::new(0.0, 0.0, 1.0, 8, 1, true, white()).is_err());
    assert!(Pyramid::default().with_dimensions(1.0, 0.0).is_err());
    assert!(TrapezoidPrism::new(1.0, 1.0, -0.5, 1.0, white()).is_err());
}
