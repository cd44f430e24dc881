//! Raw GPU textures
//!
//! [`TextureResource`] bundles a texture with its default view and a
//! sampler. It backs both the depth buffer and every color texture the
//! shape shader samples.

/// GPU texture resource containing texture, view, and sampler
#[derive(Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Depth buffer format shared by the render pass and every pipeline
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Color textures hold sRGB-encoded RGBA8 pixels
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates a depth texture matching the surface configuration
    ///
    /// A zero-sized surface (minimized window) still gets a 1x1 buffer.
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let texture = allocate(
            device,
            label,
            extent(config.width.max(1), config.height.max(1)),
            Self::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let sampler = sampler(
            device,
            label,
            wgpu::AddressMode::ClampToEdge,
            wgpu::FilterMode::Nearest,
        );
        Self::from_parts(texture, sampler)
    }

    /// Uploads RGBA8 pixels, first row at `v = 0`, as a repeating color texture.
    ///
    /// Repeat addressing lets texture coordinates above 1 tile the image
    /// across large surfaces. `filter_mode` picks sharp (`Nearest`) or
    /// smooth (`Linear`) magnification.
    pub fn create_color_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        (width, height): (u32, u32),
        label: &str,
        filter_mode: wgpu::FilterMode,
    ) -> Self {
        debug_assert!(
            data.len() >= (width * height * 4) as usize,
            "texture '{}' expects {}x{} RGBA pixels",
            label,
            width,
            height
        );

        let size = extent(width, height);
        let texture = allocate(
            device,
            label,
            size,
            Self::COLOR_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let sampler = sampler(device, label, wgpu::AddressMode::Repeat, filter_mode);
        Self::from_parts(texture, sampler)
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }

    fn from_parts(texture: wgpu::Texture, sampler: wgpu::Sampler) -> Self {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            sampler,
        }
    }
}

fn extent(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    size: wgpu::Extent3d,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    })
}

fn sampler(
    device: &wgpu::Device,
    label: &str,
    address_mode: wgpu::AddressMode,
    filter_mode: wgpu::FilterMode,
) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(&format!("{} Sampler", label)),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: filter_mode,
        min_filter: filter_mode,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}
