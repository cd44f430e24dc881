//! # Vertex Buffer Builder
//!
//! Accumulates interleaved vertex records and triangle indices while a
//! generator runs, then hands them over as an immutable [`Mesh`].

use cgmath::{Vector2, Vector3};

use super::ShapeError;
use crate::gfx::scene::vertex::{Vertex, VERTEX_FLOATS};

/// A vertex buffer plus an index buffer describing a triangulated surface.
///
/// Indices reference vertices by position, three per triangle, wound
/// counter-clockwise when seen from the side the normals point to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The vertex buffer as raw interleaved floats, 11 per vertex
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Checks that the index buffer describes whole triangles and that
    /// every index names an existing vertex.
    ///
    /// An empty mesh is valid; it simply draws nothing.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.indices.len() % 3 != 0 {
            return Err(ShapeError::IncompleteTriangle {
                len: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len() as u32;
        match self.indices.iter().find(|&&index| index >= vertex_count) {
            Some(&index) => Err(ShapeError::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}

/// Growable interleaved vertex buffer with a separate index buffer.
///
/// `add_vertex` performs no validation: callers pass unit normals and
/// in-range indices. Range checks happen once, in [`Mesh::validate`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Appends one full vertex record and returns its index.
    pub fn add_vertex(
        &mut self,
        position: Vector3<f32>,
        color: Vector3<f32>,
        tex_coords: Vector2<f32>,
        normal: Vector3<f32>,
    ) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.into(),
            color: color.into(),
            tex_coords: tex_coords.into(),
            normal: normal.into(),
        });
        index
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Adds the two triangles `a b c` and `a c d` of a quad whose corners
    /// are listed counter-clockwise.
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Bulk append of triangle triples.
    pub fn extend_indices(&mut self, indices: &[u32]) {
        self.indices.extend_from_slice(indices);
    }

    /// Current vertex count: buffer length divided by the record width.
    pub fn vertex_count(&self) -> u32 {
        (bytemuck::cast_slice::<Vertex, f32>(&self.vertices).len() / VERTEX_FLOATS) as u32
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Drop everything accumulated so far, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn build(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}
