//! Scene precondition checks.
//!
//! The intersection predicate requires finite coordinates and non-degenerate
//! triangles; violations are programmer errors there. These helpers are the
//! filtering step a pipeline runs before handing a scene to
//! [`crate::find_intersecting_triangles`].

use tracing::warn;

use crate::error::{CollideError, CollideResult};
use crate::types::{Triangle, TriangleIdx};

/// Check that every triangle in the scene satisfies the predicate's
/// preconditions, reporting the first violation.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use tri_collide::{DEFAULT_EPSILON, Triangle, validate_scene};
///
/// let collinear = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 1.0),
///     Point3::new(2.0, 2.0, 2.0),
/// );
/// assert!(validate_scene(&[collinear], DEFAULT_EPSILON).is_err());
/// ```
pub fn validate_scene(scene: &[Triangle], epsilon: f64) -> CollideResult<()> {
    for (index, tri) in scene.iter().enumerate() {
        for v in tri.vertices() {
            for (coordinate, value) in [("x", v.x), ("y", v.y), ("z", v.z)] {
                if !value.is_finite() {
                    return Err(CollideError::NonFiniteCoordinate {
                        index,
                        coordinate,
                        value,
                    });
                }
            }
        }
        if tri.is_degenerate(epsilon) {
            return Err(CollideError::DegenerateTriangle { index });
        }
    }
    Ok(())
}

/// Indices of all degenerate triangles in the scene, for callers that drop
/// offenders instead of rejecting the input.
pub fn degenerate_triangles(scene: &[Triangle], epsilon: f64) -> Vec<TriangleIdx> {
    let degenerate: Vec<TriangleIdx> = scene
        .iter()
        .enumerate()
        .filter(|(_, tri)| tri.is_degenerate(epsilon))
        .map(|(index, _)| index as TriangleIdx)
        .collect();
    if !degenerate.is_empty() {
        warn!(count = degenerate.len(), "scene contains degenerate triangles");
    }
    degenerate
}
