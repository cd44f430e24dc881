//! # Gallery Demo
//!
//! A small room with framed artwork on the walls, a sphere on a pedestal,
//! a sandstone pyramid, a cone and two benches. Textures are read from
//! `assets/` when present (`floor.jpg`, `wall.jpg`, `sandstone.jpg`,
//! `art1.png` .. `art3.png`); anything missing falls back to vertex colors.
//!
//! Controls: WASD to move, Space/Ctrl up and down, Shift to hurry,
//! left-drag to look around, Escape to quit.

use std::path::Path;

use gallery::prelude::*;

const ROOM_SIZE: f32 = 10.0;
const ROOM_HEIGHT: f32 = 3.0;
const EXHIBIT_SPHERE: &str = "exhibit sphere";

fn texture(renderer: &RenderEngine, name: &str) -> Option<std::rc::Rc<Texture>> {
    renderer.try_load_texture(Path::new("assets").join(name))
}

fn with_optional_texture(shape: Shape, texture: Option<std::rc::Rc<Texture>>) -> Shape {
    match texture {
        Some(texture) => shape.with_texture(texture),
        None => shape,
    }
}

fn build_room(scene: &mut Scene, renderer: &RenderEngine) -> Result<(), ShapeError> {
    let half = ROOM_SIZE / 2.0;
    let mid_height = ROOM_HEIGHT / 2.0;
    let wall_color = Vector3::new(0.85, 0.82, 0.76);

    let floor = Plane::new(ROOM_SIZE, ROOM_SIZE)?
        .with_color(Vector3::new(0.55, 0.45, 0.35))
        .with_tex_repeat(Vector2::new(5.0, 5.0));
    scene.add_shape(with_optional_texture(
        Shape::new(floor).with_name("floor"),
        texture(renderer, "floor.jpg"),
    ));

    let ceiling = Plane::new(ROOM_SIZE, ROOM_SIZE)?
        .with_color(Vector3::new(0.95, 0.95, 0.95))
        .with_y_offset(ROOM_HEIGHT);
    scene.add_shape(Shape::new(ceiling).with_name("ceiling"));

    let wall_texture = texture(renderer, "wall.jpg");
    // Planes face +Y; each wall is stood up to face into the room.
    let walls = [
        ("back wall", Vector3::new(0.0, mid_height, -half), Matrix4::from_angle_x(Deg(90.0))),
        ("front wall", Vector3::new(0.0, mid_height, half), Matrix4::from_angle_x(Deg(-90.0))),
        ("left wall", Vector3::new(-half, mid_height, 0.0), Matrix4::from_angle_z(Deg(-90.0))),
        ("right wall", Vector3::new(half, mid_height, 0.0), Matrix4::from_angle_z(Deg(90.0))),
    ];
    for (name, position, rotation) in walls {
        let (width, length) = if name.starts_with("back") || name.starts_with("front") {
            (ROOM_SIZE, ROOM_HEIGHT)
        } else {
            (ROOM_HEIGHT, ROOM_SIZE)
        };
        let wall = Plane::new(width, length)?
            .with_color(wall_color)
            .with_tex_repeat(Vector2::new(width / 2.0, length / 2.0));
        let shape = Shape::new(wall)
            .with_name(name)
            .with_transform(Matrix4::from_translation(position) * rotation);
        scene.add_shape(with_optional_texture(shape, wall_texture.clone()));
    }

    Ok(())
}

fn hang_artwork(scene: &mut Scene, renderer: &RenderEngine) -> Result<(), ShapeError> {
    let wall_z = -ROOM_SIZE / 2.0;
    let frame_color = Vector3::new(0.30, 0.20, 0.12);
    let palette = [
        Vector3::new(0.75, 0.30, 0.25),
        Vector3::new(0.25, 0.50, 0.70),
        Vector3::new(0.80, 0.70, 0.30),
    ];

    for (i, color) in palette.into_iter().enumerate() {
        let x = (i as f32 - 1.0) * 3.0;

        let frame = Cube::new(1.8, 1.4, 0.05, frame_color)?;
        let mut frame = Shape::new(frame).with_name(format!("frame {}", i + 1));
        frame.set_translation(Vector3::new(x, 1.6, wall_z + 0.025));
        scene.add_shape(frame);

        let canvas = Plane::new(1.6, 1.2)?.with_color(color);
        let canvas = Shape::new(canvas)
            .with_name(format!("artwork {}", i + 1))
            .with_transform(
                Matrix4::from_translation(Vector3::new(x, 1.6, wall_z + 0.06))
                    * Matrix4::from_angle_x(Deg(90.0)),
            );
        scene.add_shape(with_optional_texture(
            canvas,
            texture(renderer, &format!("art{}.png", i + 1)),
        ));
    }

    Ok(())
}

fn place_exhibits(scene: &mut Scene, renderer: &RenderEngine) -> Result<(), ShapeError> {
    let marble = Vector3::new(0.90, 0.90, 0.88);

    let mut pedestal = Shape::new(Cylinder::new(0.35, 0.4, 1.0, 48, 1, true, marble)?)
        .with_name("pedestal");
    pedestal.set_translation(Vector3::new(0.0, 0.5, -1.5));
    scene.add_shape(pedestal);

    let mut sphere = Shape::new(Sphere::new(0.3, 48, 24, Vector3::new(0.20, 0.35, 0.80))?)
        .with_name(EXHIBIT_SPHERE);
    sphere.set_translation(Vector3::new(0.0, 1.3, -1.5));
    scene.add_shape(sphere);

    let pyramid = Pyramid::default().with_dimensions(1.2, 1.0)?;
    let mut pyramid = with_optional_texture(
        Shape::new(pyramid).with_name("pyramid"),
        texture(renderer, "sandstone.jpg"),
    );
    pyramid.set_translation(Vector3::new(-3.0, 0.0, -1.5));
    scene.add_shape(pyramid);

    let mut cone = Shape::new(Cylinder::cone(0.5, 1.2, 32, Vector3::new(0.70, 0.25, 0.30))?)
        .with_name("cone");
    cone.set_translation(Vector3::new(3.0, 0.6, -1.5));
    scene.add_shape(cone);

    for (i, x) in [-2.0f32, 2.0].into_iter().enumerate() {
        let bench = TrapezoidPrism::new(1.6, 0.45, 0.35, 0.5, Vector3::new(0.45, 0.30, 0.20))?;
        let mut bench = Shape::new(bench).with_name(format!("bench {}", i + 1));
        bench.set_translation(Vector3::new(x, 0.0, 2.0));
        scene.add_shape(bench);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default()
        .with_title("Gallery")
        .with_camera_position([0.0, 1.7, 4.0])
        .with_camera_target([0.0, 1.4, -5.0])
        .with_light(LightConfig {
            position: [0.0, 2.7, 0.0],
            color: [1.0, 0.95, 0.85],
            intensity: 1.2,
            ..LightConfig::default()
        });

    GalleryApp::new(config)?
        .with_setup(|scene, renderer| {
            build_room(scene, renderer)?;
            hang_artwork(scene, renderer)?;
            place_exhibits(scene, renderer)?;
            Ok(())
        })
        .with_update(|scene, dt, elapsed| {
            scene.light.position[0] = 1.5 * (elapsed * 0.3).sin();
            if let Some(sphere) = scene.find_mut(EXHIBIT_SPHERE) {
                sphere.rotate_y(Deg(20.0 * dt));
            }
        })
        .run()
}
