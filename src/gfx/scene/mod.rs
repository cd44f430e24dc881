//! # Scene Management Module
//!
//! Shapes, the vertex record they upload, and the scene container that
//! owns them together with the camera and the point light.
//!
//! ## Key Components
//!
//! - [`Scene`] - ordered collection of shapes plus camera and light
//! - [`Shape`] - one generated mesh, its model transform and GPU buffers
//! - [`DrawShape`] - render-pass extension issuing a shape's draw
//! - [`Vertex`] - interleaved position, color, texture coordinate and normal
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::{Deg, Vector3};
//! use gallery::gfx::{geometry::Cube, scene::Shape};
//!
//! let mut crate_box = Shape::new(Cube::uniform(1.0, Vector3::new(0.6, 0.4, 0.2)).unwrap());
//! crate_box.set_translation(Vector3::new(0.0, 0.5, 0.0));
//! crate_box.rotate_y(Deg(30.0));
//! ```

pub mod scene;
pub mod shape;
pub mod vertex;

// Re-export main types
pub use scene::{Scene, SceneStatistics};
pub use shape::{DrawShape, ModelUniform, Shape};
pub use vertex::Vertex;
