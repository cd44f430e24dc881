// src/lib.rs
//! Gallery
//!
//! Procedurally generated primitive meshes rendered with wgpu and winit.
//! Every shape (cube, plane, pyramid, sphere, cylinder/cone, trapezoid
//! prism) is tessellated on the CPU, validated, uploaded once and drawn
//! each frame with its own model transform and optional shared texture.

pub mod app;
pub mod config;
pub mod gfx;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::GalleryApp;
pub use config::AppConfig;
