//! # Shapes Demo
//!
//! Every primitive in a row on a checkered floor, spinning slowly while a
//! point light circles above them. The small cube marks the light.
//!
//! Controls: WASD to move, Space/Ctrl up and down, Shift to hurry,
//! left-drag to look around, Escape to quit.

use gallery::prelude::*;

const SPIN_DEGREES_PER_SECOND: f32 = 30.0;
const LIGHT_ORBIT_RADIUS: f32 = 3.5;
const LIGHT_HEIGHT: f32 = 3.0;
const LIGHT_MARKER: &str = "light marker";

/// Exhibits with the height that rests them on the floor.
fn exhibits() -> Result<Vec<(&'static str, Primitive, f32)>, ShapeError> {
    Ok(vec![
        ("cube", Cube::uniform(0.8, Vector3::new(0.80, 0.25, 0.20))?.into(), 0.4),
        ("pyramid", Pyramid::default().into(), 0.0),
        ("sphere", Sphere::new(0.5, 36, 18, Vector3::new(0.25, 0.45, 0.85))?.into(), 0.5),
        (
            "cylinder",
            Cylinder::new(0.4, 0.4, 1.0, 32, 1, true, Vector3::new(0.30, 0.75, 0.35))?.into(),
            0.5,
        ),
        ("cone", Cylinder::cone(0.45, 1.0, 32, Vector3::new(0.90, 0.65, 0.15))?.into(), 0.5),
        (
            "faceted frustum",
            Cylinder::new(0.5, 0.3, 0.9, 8, 2, false, Vector3::new(0.60, 0.35, 0.75))?.into(),
            0.45,
        ),
        (
            "bench",
            TrapezoidPrism::new(1.0, 0.5, 0.4, 0.7, Vector3::new(0.55, 0.40, 0.25))?.into(),
            0.0,
        ),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default()
        .with_title("Gallery: shapes")
        .with_camera_position([0.0, 2.5, 7.5])
        .with_camera_target([0.0, 0.5, 0.0]);

    GalleryApp::new(config)?
        .with_setup(|scene, renderer| {
            let floor_checker =
                renderer.checkerboard_texture(2, [220, 220, 220, 255], [70, 70, 80, 255], "Floor");
            let floor = Plane::new(14.0, 8.0)?.with_tex_repeat(Vector2::new(7.0, 4.0));
            scene.add_shape(Shape::new(floor).with_name("floor").with_texture(floor_checker));

            let stripes =
                renderer.checkerboard_texture(4, [255, 255, 255, 255], [150, 150, 150, 255], "Stripes");
            let exhibits = exhibits()?;
            let spacing = 1.8;
            let offset = (exhibits.len() - 1) as f32 * spacing / 2.0;

            for (i, (name, primitive, lift)) in exhibits.into_iter().enumerate() {
                let mut shape = Shape::new(primitive).with_name(name);
                shape.set_translation(Vector3::new(i as f32 * spacing - offset, lift, 0.0));
                if i % 2 == 1 {
                    shape.set_texture(stripes.clone());
                }
                scene.add_shape(shape);
            }

            let marker = Cube::uniform(0.15, Vector3::new(1.0, 1.0, 0.9))?;
            scene.add_shape(Shape::new(marker).with_name(LIGHT_MARKER));
            Ok(())
        })
        .with_update(|scene, dt, elapsed| {
            let angle = elapsed * 0.5;
            let light = Vector3::new(
                LIGHT_ORBIT_RADIUS * angle.cos(),
                LIGHT_HEIGHT,
                LIGHT_ORBIT_RADIUS * angle.sin(),
            );
            scene.light.position = light.into();

            for shape in scene.shapes_mut() {
                match shape.name() {
                    "floor" => {}
                    LIGHT_MARKER => shape.set_translation(light),
                    _ => shape.rotate_y(Deg(SPIN_DEGREES_PER_SECOND * dt)),
                }
            }
        })
        .run()
}
