//! Validation errors for primitive parameters and generated meshes

use super::ShapeKind;

/// Reasons a primitive or a mesh is rejected.
///
/// Parameter errors come from the generators' constructors; the index
/// errors come from [`Mesh::validate`](super::Mesh::validate), which runs
/// before any upload to the GPU.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("{shape} needs at least {min} sectors, got {sectors}")]
    TooFewSectors {
        shape: ShapeKind,
        sectors: u32,
        min: u32,
    },

    #[error("{shape} needs at least {min} stacks, got {stacks}")]
    TooFewStacks {
        shape: ShapeKind,
        stacks: u32,
        min: u32,
    },

    #[error("{shape} {name} must be a positive finite number, got {value}")]
    NonPositiveDimension {
        shape: ShapeKind,
        name: &'static str,
        value: f32,
    },

    #[error("{shape} {name} must be a non-negative finite number, got {value}")]
    NegativeRadius {
        shape: ShapeKind,
        name: &'static str,
        value: f32,
    },

    #[error("cylinder base radius and top radius are both zero")]
    DegenerateCylinder,

    #[error("index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },

    #[error("index count {len} is not a multiple of 3")]
    IncompleteTriangle { len: usize },
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(
    shape: ShapeKind,
    name: &'static str,
    value: f32,
) -> Result<f32, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NonPositiveDimension { shape, name, value })
    }
}

/// Checks that a radius is finite and not negative. Zero is allowed.
pub(crate) fn ensure_radius(
    shape: ShapeKind,
    name: &'static str,
    value: f32,
) -> Result<f32, ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NegativeRadius { shape, name, value })
    }
}

/// Checks the angular subdivision of a surface of revolution.
pub(crate) fn ensure_sectors(shape: ShapeKind, sectors: u32) -> Result<u32, ShapeError> {
    const MIN_SECTORS: u32 = 3;
    if sectors < MIN_SECTORS {
        Err(ShapeError::TooFewSectors {
            shape,
            sectors,
            min: MIN_SECTORS,
        })
    } else {
        Ok(sectors)
    }
}
