//! Sampled textures shared between shapes
//!
//! A [`Texture`] wraps a [`TextureResource`] together with the bind group
//! the shape shader samples from. Textures are created once, wrapped in an
//! `Rc` and handed to any number of shapes; a shape never owns one.

use std::path::Path;

use anyhow::Context;
use log::{debug, info};

use super::texture_resource::TextureResource;
use crate::wgpu_utils::binding_types;

/// Bind group slot the shape pipeline expects textures in.
pub const TEXTURE_BIND_GROUP: u32 = 2;

/// A color texture ready to be bound for drawing.
pub struct Texture {
    label: String,
    resource: TextureResource,
    bind_group: wgpu::BindGroup,
}

impl Texture {
    /// Layout of the texture bind group: the view at binding 0 and its
    /// sampler at binding 1, both visible to the fragment stage.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: binding_types::texture_2d(),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Upload raw RGBA8 pixels whose first row maps to `v = 0`.
    ///
    /// Sampled with nearest filtering so procedural patterns stay crisp.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let resource = TextureResource::create_color_texture(
            device,
            queue,
            data,
            (width, height),
            label,
            wgpu::FilterMode::Nearest,
        );
        Self::with_bind_group(device, layout, resource, label)
    }

    fn with_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        resource: TextureResource,
        label: &str,
    ) -> Self {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&resource.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&resource.sampler),
                },
            ],
        });

        let (width, height) = resource.dimensions();
        debug!("Uploaded texture '{}' ({}x{})", label, width, height);

        Self {
            label: label.to_string(),
            resource,
            bind_group,
        }
    }

    /// Upload a decoded image.
    ///
    /// Rows are flipped so that `v = 0` is the bottom of the picture, which
    /// is the layout every primitive's texture coordinates assume.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &image::DynamicImage,
        label: &str,
    ) -> Self {
        let rgba = image.flipv().to_rgba8();
        let resource = TextureResource::create_color_texture(
            device,
            queue,
            rgba.as_raw(),
            rgba.dimensions(),
            label,
            wgpu::FilterMode::Linear,
        );
        Self::with_bind_group(device, layout, resource, label)
    }

    /// Decode an image file (PNG or JPEG) and upload it.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?;
        info!("Loaded texture {}", path.display());
        Ok(Self::from_image(
            device,
            queue,
            layout,
            &image,
            &path.display().to_string(),
        ))
    }

    /// One-pixel texture of a single color
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        rgba: [u8; 4],
        label: &str,
    ) -> Self {
        Self::from_rgba(device, queue, layout, &rgba, 1, 1, label)
    }

    /// Two-color checkerboard with `cells` squares per side
    pub fn checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        cells: u32,
        light: [u8; 4],
        dark: [u8; 4],
        label: &str,
    ) -> Self {
        const CELL_PIXELS: u32 = 8;
        let size = cells.max(1) * CELL_PIXELS;
        let data = checkerboard_rgba(size, CELL_PIXELS, light, dark);
        Self::from_rgba(device, queue, layout, &data, size, size, label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> (u32, u32) {
        self.resource.dimensions()
    }

    pub fn resource(&self) -> &TextureResource {
        &self.resource
    }

    /// Bind this texture to the shape pipeline's texture slot.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(TEXTURE_BIND_GROUP, &self.bind_group, &[]);
    }
}

/// RGBA8 pixels of a square checkerboard, `size` pixels per side.
pub fn checkerboard_rgba(size: u32, cell: u32, light: [u8; 4], dark: [u8; 4]) -> Vec<u8> {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let texel = if (x / cell + y / cell) % 2 == 0 {
                light
            } else {
                dark
            };
            data.extend_from_slice(&texel);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn test_checkerboard_size_and_corners() {
        let data = checkerboard_rgba(4, 2, WHITE, BLACK);
        assert_eq!(data.len(), 4 * 4 * 4);
        let texel = |x: usize, y: usize| &data[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(texel(0, 0), &WHITE);
        assert_eq!(texel(1, 1), &WHITE);
        assert_eq!(texel(2, 0), &BLACK);
        assert_eq!(texel(0, 2), &BLACK);
        assert_eq!(texel(3, 3), &WHITE);
    }

    #[test]
    fn test_zero_cell_is_treated_as_one() {
        let data = checkerboard_rgba(2, 0, WHITE, BLACK);
        assert_eq!(&data[0..4], &WHITE);
        assert_eq!(&data[4..8], &BLACK);
    }
}
