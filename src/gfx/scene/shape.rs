//! Shape lifecycle: generate, upload, draw, release
//!
//! A [`Shape`] owns one procedurally generated [`Mesh`], its model
//! transform and the GPU buffers the mesh was uploaded to. Textures are
//! shared, never owned.

use std::rc::Rc;

use cgmath::{Deg, Matrix, Matrix4, SquareMatrix, Vector3};
use log::debug;
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        geometry::{GenerateGeometry, Mesh, MeshBuilder, Primitive, ShapeError, ShapeKind},
        resources::texture::Texture,
        scene::vertex::Vertex,
    },
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Bind group slot of the per-shape model uniform.
pub const MODEL_BIND_GROUP: u32 = 1;

/// Per-shape uniform block. MUST match `ModelUniform` in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix, for transforming normals.
    pub normal: [[f32; 4]; 4],
    pub use_texture: u32,
    _padding: [u32; 3],
}

impl ModelUniform {
    pub fn new(model: Matrix4<f32>, use_texture: bool) -> Self {
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: model.into(),
            normal: normal.into(),
            use_texture: use_texture as u32,
            _padding: [0; 3],
        }
    }
}

// GPU resources held between setup_mesh and cleanup
struct ShapeGpuResources {
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    model_ubo: UniformBuffer<ModelUniform>,
    model_bind_group: wgpu::BindGroup,
}

impl ShapeGpuResources {
    fn release(self) {
        if let Some(buffer) = self.vertex_buffer {
            buffer.destroy();
        }
        if let Some(buffer) = self.index_buffer {
            buffer.destroy();
        }
        self.model_ubo.buffer().destroy();
    }
}

/// A renderable primitive.
///
/// Geometry is generated lazily on first access and uploaded at most once;
/// the model matrix can be changed freely between frames and is pushed to
/// the GPU by [`Shape::update_transform`].
pub struct Shape {
    name: String,
    primitive: Primitive,
    mesh: Mesh,
    generated: bool,
    pub model_matrix: Matrix4<f32>,
    texture: Option<Rc<Texture>>,
    gpu: Option<ShapeGpuResources>,
}

impl Shape {
    /// Create a shape with identity transform and no texture.
    pub fn new(primitive: impl Into<Primitive>) -> Self {
        let primitive = primitive.into();
        Self {
            name: primitive.kind().name().to_string(),
            primitive,
            mesh: Mesh::new(),
            generated: false,
            model_matrix: Matrix4::identity(),
            texture: None,
            gpu: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_texture(mut self, texture: Rc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.model_matrix = transform;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ShapeKind {
        self.primitive.kind()
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Open surfaces report `true` and are drawn without back-face culling.
    pub fn requires_double_sided(&self) -> bool {
        self.primitive.requires_double_sided()
    }

    /// Regenerate the CPU-side mesh from the primitive's parameters.
    ///
    /// Previous contents are discarded, so calling this twice yields the
    /// same buffers. Already uploaded GPU buffers are left untouched.
    pub fn generate_geometry(&mut self) {
        let mut builder = MeshBuilder::new();
        self.primitive.generate(&mut builder);
        self.mesh = builder.build();
        self.generated = true;

        debug!(
            "Generated {} '{}': {} vertices, {} triangles",
            self.kind(),
            self.name,
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );
    }

    fn ensure_generated(&mut self) {
        if !self.generated {
            self.generate_geometry();
        }
    }

    /// The CPU-side mesh, generating it first if needed.
    pub fn mesh(&mut self) -> &Mesh {
        self.ensure_generated();
        &self.mesh
    }

    pub fn vertices(&mut self) -> &[Vertex] {
        self.mesh().vertices()
    }

    pub fn indices(&mut self) -> &[u32] {
        self.mesh().indices()
    }

    pub fn vertex_count(&mut self) -> usize {
        self.mesh().vertex_count()
    }

    pub fn index_count(&mut self) -> usize {
        self.mesh().index_count()
    }

    /// Bind group layout shared by every shape's model uniform.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        })
    }

    /// Upload the mesh and create the model uniform.
    ///
    /// Generates geometry first if that has not happened yet and validates
    /// every index against the vertex count. A second call is a no-op.
    pub fn setup_mesh(
        &mut self,
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
    ) -> Result<(), ShapeError> {
        if self.gpu.is_some() {
            return Ok(());
        }

        self.ensure_generated();
        self.mesh.validate()?;

        let (vertex_buffer, index_buffer) = if self.mesh.is_empty() {
            (None, None)
        } else {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", self.name)),
                contents: self.mesh.vertex_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", self.name)),
                contents: self.mesh.index_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            });
            (Some(vertex_buffer), Some(index_buffer))
        };

        let model_ubo = UniformBuffer::new_with_data(device, &self.model_uniform());
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Model Bind Group", self.name)),
            layout: model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_ubo.binding_resource(),
            }],
        });

        debug!(
            "Uploaded {} '{}': {} vertex bytes, {} indices",
            self.kind(),
            self.name,
            self.mesh.vertex_bytes().len(),
            self.mesh.index_count()
        );

        self.gpu = Some(ShapeGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.mesh.index_count() as u32,
            model_ubo,
            model_bind_group,
        });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.gpu.is_some()
    }

    fn model_uniform(&self) -> ModelUniform {
        ModelUniform::new(self.model_matrix, self.texture.is_some())
    }

    /// Push the model matrix and texture flag to the GPU.
    ///
    /// Does nothing before [`Shape::setup_mesh`]; unchanged data is not
    /// re-uploaded.
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let content = self.model_uniform();
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.model_ubo.update_content(queue, content);
        }
    }

    /// Release GPU buffers. Safe to call repeatedly or before setup.
    pub fn cleanup(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.release();
            debug!("Released GPU resources of {} '{}'", self.kind(), self.name);
        }
    }

    // Texture association

    pub fn set_texture(&mut self, texture: Rc<Texture>) {
        self.texture = Some(texture);
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_deref()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    // Transform helpers

    /// Set translation
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.model_matrix = Matrix4::from_translation(translation);
    }

    /// Apply translation (multiplies with existing transform)
    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.model_matrix = self.model_matrix * Matrix4::from_translation(translation);
    }

    pub fn rotate_x(&mut self, angle: Deg<f32>) {
        self.model_matrix = self.model_matrix * Matrix4::from_angle_x(angle);
    }

    pub fn rotate_y(&mut self, angle: Deg<f32>) {
        self.model_matrix = self.model_matrix * Matrix4::from_angle_y(angle);
    }

    pub fn rotate_z(&mut self, angle: Deg<f32>) {
        self.model_matrix = self.model_matrix * Matrix4::from_angle_z(angle);
    }

    pub fn scale(&mut self, factor: f32) {
        self.model_matrix = self.model_matrix * Matrix4::from_scale(factor);
    }

    pub fn scale_xyz(&mut self, factor: Vector3<f32>) {
        self.model_matrix =
            self.model_matrix * Matrix4::from_nonuniform_scale(factor.x, factor.y, factor.z);
    }

    /// Translation, then rotation about Y, then uniform scale (T * R * S).
    pub fn set_transform_trs(&mut self, translation: Vector3<f32>, rotation_y: Deg<f32>, scale: f32) {
        self.model_matrix = Matrix4::from_translation(translation)
            * Matrix4::from_angle_y(rotation_y)
            * Matrix4::from_scale(scale);
    }

    pub fn reset_transform(&mut self) {
        self.model_matrix = Matrix4::identity();
    }
}

impl Drop for Shape {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Render-pass extension issuing one shape's indexed draw.
///
/// The caller binds the pipeline matching the shape's culling requirement
/// and the global bind group beforehand. Afterwards the model and texture
/// bind groups and both buffers belong to this shape. Shapes that were
/// never uploaded, or whose mesh is empty, draw nothing.
pub trait DrawShape<'a> {
    fn draw_shape(&mut self, shape: &'a Shape, fallback_texture: &'a Texture);
}

impl<'a, 'b> DrawShape<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_shape(&mut self, shape: &'b Shape, fallback_texture: &'b Texture) {
        let Some(gpu) = shape.gpu.as_ref() else {
            return;
        };
        let (Some(vertex_buffer), Some(index_buffer)) =
            (gpu.vertex_buffer.as_ref(), gpu.index_buffer.as_ref())
        else {
            return;
        };

        self.set_bind_group(MODEL_BIND_GROUP, &gpu.model_bind_group, &[]);
        shape.texture().unwrap_or(fallback_texture).bind(self);
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..gpu.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{Cube, Plane, Sphere};
    use cgmath::Vector4;

    fn assert_close(a: impl Into<[f32; 4]>, b: impl Into<[f32; 4]>) {
        let (a, b) = (a.into(), b.into());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    fn assert_matrix_close(a: Matrix4<f32>, b: Matrix4<f32>) {
        for column in 0..4 {
            assert_close(a[column], b[column]);
        }
    }

    fn cube() -> Shape {
        Shape::new(Cube::uniform(1.0, Vector3::new(0.5, 0.5, 0.5)).unwrap())
    }

    #[test]
    fn test_geometry_is_generated_lazily() {
        let mut shape = cube();
        assert!(!shape.generated);
        assert_eq!(shape.vertex_count(), 24);
        assert_eq!(shape.index_count(), 36);
        assert!(shape.generated);
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let mut shape = Shape::new(Sphere::new(1.0, 8, 6, Vector3::new(1.0, 0.0, 0.0)).unwrap());
        shape.generate_geometry();
        let first = shape.mesh().clone();
        shape.generate_geometry();
        assert_eq!(shape.mesh().vertex_bytes(), first.vertex_bytes());
        assert_eq!(shape.mesh().index_bytes(), first.index_bytes());
    }

    #[test]
    fn test_kind_and_default_name() {
        let shape = Shape::new(Plane::new(2.0, 3.0).unwrap());
        assert_eq!(shape.kind(), ShapeKind::Plane);
        assert_eq!(shape.name(), "plane");
        assert!(shape.requires_double_sided());

        let named = cube().with_name("pedestal");
        assert_eq!(named.name(), "pedestal");
        assert!(!named.requires_double_sided());
    }

    #[test]
    fn test_cleanup_without_setup_is_safe() {
        let mut shape = cube();
        assert!(!shape.is_initialized());
        shape.cleanup();
        shape.cleanup();
        assert!(!shape.is_initialized());
    }

    #[test]
    fn test_untextured_by_default() {
        let shape = cube();
        assert!(shape.texture().is_none());
        assert_eq!(shape.model_uniform().use_texture, 0);
    }

    #[test]
    fn test_transform_helpers_compose() {
        let mut shape = cube();
        shape.set_translation(Vector3::new(1.0, 2.0, 3.0));
        shape.scale(2.0);
        let corner = shape.model_matrix * Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_close(corner, Vector4::new(2.0, 3.0, 4.0, 1.0));

        shape.reset_transform();
        assert_eq!(shape.model_matrix, Matrix4::identity());

        shape.set_transform_trs(Vector3::new(0.0, 1.0, 0.0), Deg(90.0), 1.0);
        let x = shape.model_matrix * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_close(x, Vector4::new(0.0, 1.0, -1.0, 1.0));
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_the_rotation() {
        let rotation = Matrix4::from_angle_y(Deg(30.0)) * Matrix4::from_angle_x(Deg(45.0));
        let uniform = ModelUniform::new(rotation, true);
        let normal: Matrix4<f32> = uniform.normal.into();
        assert_matrix_close(normal, rotation);
        assert_eq!(uniform.use_texture, 1);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let scale = Matrix4::from_nonuniform_scale(2.0, 1.0, 4.0);
        let uniform = ModelUniform::new(scale, false);
        let normal: Matrix4<f32> = uniform.normal.into();
        assert_matrix_close(normal, Matrix4::from_nonuniform_scale(0.5, 1.0, 0.25));
    }

    #[test]
    fn test_singular_model_falls_back_to_identity_normals() {
        let uniform = ModelUniform::new(Matrix4::from_scale(0.0), false);
        let normal: Matrix4<f32> = uniform.normal.into();
        assert_eq!(normal, Matrix4::identity());
    }

    #[test]
    fn test_model_uniform_layout() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 144);
    }
}
