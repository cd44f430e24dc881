//! Explicit pipeline state for shape draws
//!
//! Every shape declares which rasterizer state it needs. Within a render
//! pass a [`PipelineTracker`] remembers what is bound, and
//! [`PipelineSet::transition`] switches pipelines only when the next shape
//! needs a different state.

use log::trace;

use crate::gfx::{
    resources::texture_resource::TextureResource,
    scene::{shape::Shape, vertex::Vertex},
};

/// Rasterizer configuration a shape must be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Counter-clockwise front faces, back faces culled.
    CullBack,
    /// No culling; open surfaces stay visible from behind.
    DoubleSided,
}

impl PipelineState {
    pub fn for_shape(shape: &Shape) -> Self {
        if shape.requires_double_sided() {
            PipelineState::DoubleSided
        } else {
            PipelineState::CullBack
        }
    }

    pub fn cull_mode(self) -> Option<wgpu::Face> {
        match self {
            PipelineState::CullBack => Some(wgpu::Face::Back),
            PipelineState::DoubleSided => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PipelineState::CullBack => "Shape Pipeline (cull back)",
            PipelineState::DoubleSided => "Shape Pipeline (double sided)",
        }
    }
}

/// Pipeline state bound on the current render pass.
#[derive(Debug, Default)]
pub struct PipelineTracker {
    current: Option<PipelineState>,
    transitions: u32,
}

impl PipelineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state to bind if `required` is not already active.
    pub fn require(&mut self, required: PipelineState) -> Option<PipelineState> {
        if self.current == Some(required) {
            return None;
        }
        self.current = Some(required);
        self.transitions += 1;
        Some(required)
    }

    pub fn current(&self) -> Option<PipelineState> {
        self.current
    }

    /// Number of pipeline switches recorded so far
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

/// One render pipeline per [`PipelineState`], sharing shader and layout.
pub struct PipelineSet {
    cull_back: wgpu::RenderPipeline,
    double_sided: wgpu::RenderPipeline,
}

impl PipelineSet {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            cull_back: create_pipeline(device, layout, shader, color_format, PipelineState::CullBack),
            double_sided: create_pipeline(
                device,
                layout,
                shader,
                color_format,
                PipelineState::DoubleSided,
            ),
        }
    }

    pub fn get(&self, state: PipelineState) -> &wgpu::RenderPipeline {
        match state {
            PipelineState::CullBack => &self.cull_back,
            PipelineState::DoubleSided => &self.double_sided,
        }
    }

    /// Bind the pipeline for `required` unless it is already bound.
    ///
    /// Returns `true` when a switch was recorded.
    pub fn transition(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        tracker: &mut PipelineTracker,
        required: PipelineState,
    ) -> bool {
        match tracker.require(required) {
            Some(next) => {
                trace!("Pipeline transition to {:?}", next);
                render_pass.set_pipeline(self.get(next));
                true
            }
            None => false,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    state: PipelineState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(state.label()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: state.cull_mode(),
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
            unclipped_depth: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: TextureResource::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}
