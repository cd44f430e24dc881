//! GPU resource management
//!
//! Textures, depth buffers and the global uniform bindings.

pub mod global_bindings;
pub mod texture;
pub mod texture_resource;

pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig};
pub use texture::Texture;
pub use texture_resource::TextureResource;
