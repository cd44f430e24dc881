//! # Gallery Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use gallery::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     GalleryApp::new(AppConfig::default())?
//!         .with_setup(|scene, _renderer| {
//!             let cube = Cube::uniform(1.0, Vector3::new(0.7, 0.2, 0.2))?;
//!             scene.add_shape(Shape::new(cube));
//!             Ok(())
//!         })
//!         .with_update(|scene, _dt, elapsed| {
//!             if let Some(cube) = scene.shape_mut(0) {
//!                 cube.set_transform_trs(Vector3::new(0.0, 0.5, 0.0), Deg(elapsed * 30.0), 1.0);
//!             }
//!         })
//!         .run()
//! }
//! ```

// Re-export core application types
pub use crate::app::GalleryApp;
pub use crate::config::AppConfig;

// Re-export geometry, scene and rendering types
pub use crate::gfx::geometry::{
    Cube, Cylinder, GenerateGeometry, Mesh, Plane, Primitive, Pyramid, ShapeError, ShapeKind,
    Sphere, TrapezoidPrism,
};
pub use crate::gfx::rendering::RenderEngine;
pub use crate::gfx::resources::{LightConfig, Texture};
pub use crate::gfx::scene::{Scene, Shape};

// Re-export common external dependencies
pub use cgmath::{Deg, Matrix4, Vector2, Vector3};
