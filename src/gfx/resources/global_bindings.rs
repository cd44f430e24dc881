//! Global uniform bindings for camera and scene data
//!
//! Manages the GPU uniform buffer and bind group for per-frame state that is
//! shared by every shape in a scene: camera matrices and the point light.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Bind group slot of the global uniforms.
pub const GLOBAL_BIND_GROUP: u32 = 0;

/// Global uniform buffer content structure
///
/// Contains all per-frame global data that needs to be accessible
/// to shaders. MUST match the GlobalUniform struct in `shader.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],  // Camera position (homogeneous coordinates)
    view_proj: [[f32; 4]; 4], // Camera view-projection matrix

    light_position: [f32; 4], // w unused
    light_color: [f32; 4],    // rgb, w = intensity
    light_params: [f32; 4],   // ambient, specular strength, shininess, unused
}
// Total: 16 + 64 + 16 + 16 + 16 = 128 bytes

impl GlobalUBOContent {
    pub fn new(camera: &CameraUniform, light: &LightConfig) -> Self {
        let [px, py, pz] = light.position;
        let [r, g, b] = light.color;
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_position: [px, py, pz, 1.0],
            light_color: [r, g, b, light.intensity],
            light_params: [light.ambient, light.specular, light.shininess, 0.0],
        }
    }
}

/// Point light configuration
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    /// Fraction of the light color applied regardless of orientation.
    pub ambient: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 4.0, 2.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            ambient: 0.15,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light data
///
/// Called once per frame before any shape is drawn.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &CameraUniform,
    light: &LightConfig,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, light));
}

/// Bind group layout and bind group for the global uniforms
///
/// Bound to slot 0 once per render pass.
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size_matches_shader_block() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 128);
    }

    #[test]
    fn test_light_packing() {
        let light = LightConfig {
            position: [1.0, 2.0, 3.0],
            color: [0.5, 0.25, 1.0],
            intensity: 2.0,
            ambient: 0.1,
            specular: 0.4,
            shininess: 16.0,
        };
        let content = GlobalUBOContent::new(&CameraUniform::default(), &light);
        assert_eq!(content.light_position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(content.light_color, [0.5, 0.25, 1.0, 2.0]);
        assert_eq!(content.light_params, [0.1, 0.4, 16.0, 0.0]);
    }
}
