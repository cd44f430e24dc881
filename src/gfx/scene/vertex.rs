//! # Vertex Data Structures
//!
//! This module defines the interleaved vertex record shared by every
//! procedural primitive. It provides the GPU-compatible layout used by the
//! shape pipeline.

/// Number of `f32` values in one [`Vertex`] record.
pub const VERTEX_FLOATS: usize = 11;

/// A 3D vertex with position, color, texture coordinate and normal.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations. One record is
/// 11 floats (44 bytes) wide, in this order:
///
/// | offset | attribute    | format      | location |
/// |-------:|--------------|-------------|---------:|
/// | 0      | `position`   | `Float32x3` | 0        |
/// | 12     | `color`      | `Float32x3` | 1        |
/// | 24     | `tex_coords` | `Float32x2` | 2        |
/// | 32     | `normal`     | `Float32x3` | 3        |
///
/// # Examples
///
/// ```no_run
/// use gallery::gfx::scene::vertex::Vertex;
///
/// let vertex = Vertex {
///     position: [0.0, 1.0, 0.0],
///     color: [1.0, 1.0, 1.0],
///     tex_coords: [0.5, 0.5],
///     normal: [0.0, 1.0, 0.0],
/// };
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// RGB color, each channel in [0, 1]
    pub color: [f32; 3],
    /// Texture coordinates [u, v]; values above 1 tile the texture
    pub tex_coords: [f32; 2],
    /// Unit normal pointing away from the solid's interior
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32x3,
    ];

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// Attributes follow the table in the type documentation, with an
    /// array stride of `size_of::<Vertex>()` (44 bytes).
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_eleven_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), VERTEX_FLOATS * 4);
        assert_eq!(Vertex::desc().array_stride, 44);
    }

    #[test]
    fn test_attribute_offsets() {
        let layout = Vertex::desc();
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 32]);
        let locations: Vec<u32> = layout
            .attributes
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }
}
