//! Error types for scene validation.

use thiserror::Error;

/// Result type alias for fallible scene operations.
pub type CollideResult<T> = Result<T, CollideError>;

/// Errors reported while validating a triangle scene.
///
/// The intersection predicate and the split tree assume their inputs have
/// already been filtered; feeding them unfiltered data is a programmer error
/// and trips a debug assertion instead of returning one of these. Use
/// [`crate::validate::validate_scene`] up front when the input comes from an
/// untrusted source.
#[derive(Debug, Error)]
pub enum CollideError {
    /// Triangle with collinear or duplicated vertices.
    #[error("triangle {index} is degenerate (collinear or duplicated vertices)")]
    DegenerateTriangle { index: usize },

    /// Vertex coordinate that is NaN or infinite.
    #[error("invalid coordinate in triangle {index}: {coordinate} is {value}")]
    NonFiniteCoordinate {
        index: usize,
        coordinate: &'static str,
        value: f64,
    },
}
