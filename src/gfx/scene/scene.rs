use log::debug;

use crate::gfx::{
    camera::camera_utils::CameraManager, geometry::ShapeError, resources::LightConfig,
};

use super::shape::Shape;

/// Main scene containing shapes, camera and the point light
///
/// Shapes are drawn in insertion order.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub light: LightConfig,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager, light: LightConfig) -> Self {
        Self {
            camera_manager,
            light,
            shapes: Vec::new(),
        }
    }

    /// Adds a shape and returns its index
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    /// First shape with the given name
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.name() == name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Updates the camera for `dt` seconds of held input
    pub fn update(&mut self, dt: f32) {
        self.camera_manager.update(dt);
    }

    /// Uploads every shape that has not been uploaded yet
    ///
    /// Shapes added after the first call are picked up by the next one.
    pub fn init_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
    ) -> Result<(), ShapeError> {
        for shape in self.shapes.iter_mut().filter(|shape| !shape.is_initialized()) {
            shape.setup_mesh(device, model_layout)?;
        }
        Ok(())
    }

    /// Pushes every shape's model matrix to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for shape in &mut self.shapes {
            shape.update_transform(queue);
        }
    }

    /// Releases the GPU resources of every shape
    pub fn cleanup(&mut self) {
        for shape in &mut self.shapes {
            shape.cleanup();
        }
        debug!("Released GPU resources of {} shapes", self.shapes.len());
    }

    /// Gets statistics about the scene, generating pending geometry
    pub fn get_statistics(&mut self) -> SceneStatistics {
        let mut statistics = SceneStatistics {
            shape_count: self.shapes.len(),
            ..Default::default()
        };
        for shape in &mut self.shapes {
            let mesh = shape.mesh();
            statistics.total_vertices += mesh.vertex_count();
            statistics.total_triangles += mesh.triangle_count();
            if shape.has_texture() {
                statistics.textured_shapes += 1;
            }
        }
        statistics
    }
}

/// Scene statistics for logging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub shape_count: usize,
    pub textured_shapes: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}
