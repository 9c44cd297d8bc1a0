//! Triangle-triangle intersection predicate.
//!
//! The decision runs in fixed stages:
//!
//! 1. Cull when either triangle lies strictly on one side of the other's
//!    supporting plane.
//! 2. Non-coplanar pair: intersect the two supporting planes and reduce to a
//!    1-D overlap test of the parameter ranges where each triangle's edges
//!    cross the other's plane.
//! 3. Coplanar pair: project both triangles along the dominant component of
//!    the shared normal and solve in 2D (edge crossings, then containment).
//!
//! Touching configurations are resolved by the tolerance policy: collinear
//! edge overlap counts as intersection, a lone vertex resting on another
//! edge's supporting line does not. Both triangles must be non-degenerate;
//! filtering is the caller's job (see [`crate::validate`]).

use tracing::trace;

use crate::geometry::{
    AaPlane, Axis, DEFAULT_EPSILON, Edge2D, Line, Plane, Range, Triangle2D, orientation,
    triangle_behind, triangle_in_front,
};
use crate::types::Triangle;

/// Whether two triangles intersect, using [`DEFAULT_EPSILON`].
///
/// Shared boundary counts: triangles touching along a collinear edge overlap
/// are reported as intersecting, and every non-degenerate triangle intersects
/// itself.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use tri_collide::{Triangle, intersects};
///
/// let floor = Triangle::new(
///     Point3::new(-1.0, -1.0, 0.0),
///     Point3::new(1.0, -1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let wall = Triangle::new(
///     Point3::new(-1.0, 0.0, -1.0),
///     Point3::new(1.0, 0.0, -1.0),
///     Point3::new(0.0, 0.0, 1.0),
/// );
/// assert!(intersects(&floor, &wall));
/// assert!(intersects(&floor, &floor));
/// ```
#[inline]
pub fn intersects(tri1: &Triangle, tri2: &Triangle) -> bool {
    triangles_intersect(tri1, tri2, DEFAULT_EPSILON)
}

/// Whether two triangles intersect, with an explicit tolerance.
///
/// `epsilon` governs every near-zero decision: the side cull, the parallel
/// planes test, the slab rule for edges, and the 2D orientation signs.
pub fn triangles_intersect(tri1: &Triangle, tri2: &Triangle, epsilon: f64) -> bool {
    debug_assert!(
        !tri1.is_degenerate(epsilon) && !tri2.is_degenerate(epsilon),
        "degenerate triangle passed to the intersection predicate"
    );
    trace!(?tri1, ?tri2, "checking triangle pair");

    let pln1 = Plane::from_triangle(tri1);
    let pln2 = Plane::from_triangle(tri2);
    if triangle_in_front(&pln1, tri2, epsilon)
        || triangle_behind(&pln1, tri2, epsilon)
        || triangle_in_front(&pln2, tri1, epsilon)
        || triangle_behind(&pln2, tri1, epsilon)
    {
        trace!("fully front or back, not intersecting");
        return false;
    }

    if let Some(line) = pln1.intersection(&pln2, epsilon) {
        // Non-coplanar pair: both ranges live on the same line, so their
        // parameters are commensurable.
        trace!(?line, "non-coplanar, testing ranges on the plane crossing line");
        let rng1 = crossing_range(tri1, &line, &pln2, epsilon);
        let rng2 = crossing_range(tri2, &line, &pln1, epsilon);
        trace!(?rng1, ?rng2, "crossing ranges");
        return rng1.intersects(&rng2);
    }

    // Coplanar pair: project along the dominant normal component to keep the
    // projected area from collapsing, then solve in 2D.
    let axis = Axis::dominant(pln1.normal());
    let projection = AaPlane::new(0.0, axis);
    let prj1 = projection.project_triangle(tri1);
    let prj2 = projection.project_triangle(tri2);
    trace!(?axis, ?prj1, ?prj2, "coplanar, testing 2D projections");
    triangles_overlap_2d(&prj1, &prj2, epsilon)
}

/// Range of line parameters at which the triangle's edges cross `plane`.
///
/// Edges that lie inside the plane's tolerance slab or entirely on one side
/// contribute nothing; if no edge contributes the result is [`Range::EMPTY`],
/// which intersects nothing.
fn crossing_range(tri: &Triangle, line: &Line, plane: &Plane, epsilon: f64) -> Range {
    let mut range = Range::EMPTY;
    for edge in tri.edges() {
        if let Some(t) = line.edge_intersection(&edge, plane, epsilon) {
            trace!(?edge, t, "edge crosses the opposite plane");
            range.expand(t);
        }
    }
    range
}

/// 2D segment intersection.
///
/// Collinear segments (all four orientations within `epsilon` of zero)
/// overlap iff both their x and y projections overlap as closed intervals.
/// Otherwise the segments must properly cross: the endpoint orientations are
/// strictly opposite on both sides, which deliberately rejects an endpoint
/// resting on the other segment's supporting line.
fn edges_cross(edge1: &Edge2D, edge2: &Edge2D, epsilon: f64) -> bool {
    let orient11 = orientation(edge2.0, edge1);
    let orient12 = orientation(edge2.1, edge1);
    let orient21 = orientation(edge1.0, edge2);
    let orient22 = orientation(edge1.1, edge2);

    if orient11.abs() < epsilon
        && orient12.abs() < epsilon
        && orient21.abs() < epsilon
        && orient22.abs() < epsilon
    {
        let x1 = Range::from_endpoints(edge1.0.x, edge1.1.x);
        let x2 = Range::from_endpoints(edge2.0.x, edge2.1.x);
        let y1 = Range::from_endpoints(edge1.0.y, edge1.1.y);
        let y2 = Range::from_endpoints(edge2.0.y, edge2.1.y);
        return x1.intersects(&x2) && y1.intersects(&y2);
    }

    ((orient11 >= epsilon && orient12 <= -epsilon)
        || (orient11 <= -epsilon && orient12 >= epsilon))
        && ((orient21 >= epsilon && orient22 <= -epsilon)
            || (orient21 <= -epsilon && orient22 >= epsilon))
}

/// 2D triangle overlap: any pair of edges crosses, or one triangle contains
/// the other.
fn triangles_overlap_2d(tri1: &Triangle2D, tri2: &Triangle2D, epsilon: f64) -> bool {
    for edge1 in tri1.edges() {
        for edge2 in tri2.edges() {
            if edges_cross(&edge1, &edge2, epsilon) {
                trace!(?edge1, ?edge2, "projected edges cross");
                return true;
            }
        }
    }
    tri1.contains_triangle(tri2) || tri2.contains_triangle(tri1)
}
