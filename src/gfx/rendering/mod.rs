// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Surface and device setup, the shape pipelines and frame submission.

pub mod pipeline_state;
pub mod render_engine;

// Re-export main types
pub use pipeline_state::{PipelineSet, PipelineState, PipelineTracker};
pub use render_engine::RenderEngine;
