//! # Graphics Module
//!
//! Everything between the geometry generators and the screen.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - procedural primitives and the mesh builder
//! - **Scene Management** ([`scene`]) - shapes, vertex layout and the scene container
//! - **Rendering Pipeline** ([`rendering`]) - surface, pipelines and frame submission
//! - **Resource Management** ([`resources`]) - textures and global uniforms
//! - **Camera System** ([`camera`]) - fly camera with keyboard and mouse controls
//!
//! ## Usage
//!
//! The graphics system is primarily used through the [`RenderEngine`] and [`Scene`] types:
//!
//! ```no_run
//! use gallery::gfx::{geometry::Sphere, scene::Shape};
//! use cgmath::Vector3;
//!
//! // The render engine is typically created automatically by GalleryApp
//! // let render_engine = RenderEngine::new(window, width, height, &config).await?;
//!
//! let ball = Shape::new(Sphere::new(0.5, 32, 16, Vector3::new(0.8, 0.1, 0.1)).unwrap());
//! // scene.add_shape(ball);
//! # drop(ball);
//! ```
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
