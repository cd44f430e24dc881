//! WGPU-based rendering engine
//!
//! Owns the surface, device and queue, the depth buffer, the shape
//! pipelines and the global uniforms, and records one render pass per frame.

use std::{iter, path::Path, rc::Rc, sync::Arc};

use anyhow::{anyhow, Context};
use log::{info, warn};
use wgpu::TextureFormat;

use crate::{
    config::AppConfig,
    gfx::{
        geometry::ShapeError,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GLOBAL_BIND_GROUP},
            texture::Texture,
            texture_resource::TextureResource,
        },
        scene::{
            scene::Scene,
            shape::{DrawShape, Shape},
        },
    },
};

use super::pipeline_state::{PipelineSet, PipelineState, PipelineTracker};

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    clear_color: wgpu::Color,

    pipelines: PipelineSet,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    model_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    fallback_texture: Texture,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `app_config` - Clear color and present mode
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        app_config: &AppConfig,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a graphics adapter")?;
        let adapter_info = adapter.get_info();
        info!(
            "Using adapter {} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no supported formats"))?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: app_config.present_mode(),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!(
            "Surface configured: {}x{} {:?} {:?}",
            config.width, config.height, format, config.present_mode
        );

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // Bind group 0: camera + light, 1: per-shape model, 2: per-texture
        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let model_layout = Shape::bind_group_layout(&device);
        let texture_layout = Texture::bind_group_layout(&device);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[
                global_bindings.bind_group_layout(),
                &model_layout,
                &texture_layout,
            ],
            push_constant_ranges: &[],
        });
        let pipelines = PipelineSet::new(&device, &pipeline_layout, &shader, format);

        let fallback_texture = Texture::solid(
            &device,
            &queue,
            &texture_layout,
            [255, 255, 255, 255],
            "Fallback Texture",
        );

        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            clear_color: app_config.wgpu_clear_color(),
            pipelines,
            global_ubo,
            global_bindings,
            model_layout,
            texture_layout,
            fallback_texture,
        })
    }

    /// Uploads pending shapes and pushes camera, light and model matrices.
    ///
    /// Call once per frame before [`RenderEngine::render_frame`].
    pub fn update(&mut self, scene: &mut Scene) -> Result<(), ShapeError> {
        scene.init_gpu_resources(&self.device, &self.model_layout)?;
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            &scene.camera_manager.camera.uniform,
            &scene.light,
        );
        scene.update_all_transforms(&self.queue);
        Ok(())
    }

    /// Draws every shape of the scene in order.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame(&mut self, scene: &Scene) -> anyhow::Result<()> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Surface {:?}, reconfiguring", error);
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring the surface texture, skipping frame");
                return Ok(());
            }
            Err(error) => return Err(error).context("failed to acquire surface texture"),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.format),
                ..Default::default()
            });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(GLOBAL_BIND_GROUP, self.global_bindings.bind_group(), &[]);

            let mut tracker = PipelineTracker::new();
            for shape in scene.shapes() {
                self.pipelines
                    .transition(&mut render_pass, &mut tracker, PipelineState::for_shape(shape));
                render_pass.draw_shape(shape, &self.fallback_texture);
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        info!("Resized surface to {}x{}", width, height);
    }

    // Texture creation, shared between shapes through `Rc`

    /// Loads an image file as a texture.
    pub fn load_texture(&self, path: impl AsRef<Path>) -> anyhow::Result<Rc<Texture>> {
        Texture::load(&self.device, &self.queue, &self.texture_layout, path).map(Rc::new)
    }

    /// Loads an image file, logging a warning and returning `None` on failure.
    ///
    /// Shapes without a texture render with their vertex colors.
    pub fn try_load_texture(&self, path: impl AsRef<Path>) -> Option<Rc<Texture>> {
        match self.load_texture(path) {
            Ok(texture) => Some(texture),
            Err(error) => {
                warn!("{:#}; drawing with vertex colors", error);
                None
            }
        }
    }

    pub fn checkerboard_texture(
        &self,
        cells: u32,
        light: [u8; 4],
        dark: [u8; 4],
        label: &str,
    ) -> Rc<Texture> {
        Rc::new(Texture::checkerboard(
            &self.device,
            &self.queue,
            &self.texture_layout,
            cells,
            light,
            dark,
            label,
        ))
    }

    pub fn solid_texture(&self, rgba: [u8; 4], label: &str) -> Rc<Texture> {
        Rc::new(Texture::solid(
            &self.device,
            &self.queue,
            &self.texture_layout,
            rgba,
            label,
        ))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }

    pub fn model_layout(&self) -> &wgpu::BindGroupLayout {
        &self.model_layout
    }

    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }
}
