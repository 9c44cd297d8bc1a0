//! Geometric primitives for the intersection predicate and the split tree.
//!
//! Everything here is a plain value type over `f64` coordinates. Near-zero
//! decisions take an explicit tolerance `epsilon`: sign tests compare against
//! `±epsilon`, squared-length tests against `epsilon²`. [`DEFAULT_EPSILON`]
//! is the conventional single-precision machine epsilon; callers working at
//! unusual scales should pick their own (see
//! [`crate::tree::CollisionParams`]).

use nalgebra::{Point2, Point3, Unit, UnitQuaternion, Vector3};

use crate::types::Triangle;

/// Default tolerance for near-zero sign and length tests.
pub const DEFAULT_EPSILON: f64 = f32::EPSILON as f64;

/// An oriented segment in 3D as (start, end).
pub type Edge = (Point3<f64>, Point3<f64>);

/// An oriented segment in 2D as (start, end).
pub type Edge2D = (Point2<f64>, Point2<f64>);

/// A closed 1-D interval.
///
/// The accumulating constructors can produce the empty interval
/// (`min = +∞, max = -∞`), which intersects nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// The empty interval. Extending it with a value yields a point interval.
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Create an interval from ordered endpoints.
    #[inline]
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Create an interval from endpoints in either order.
    #[inline]
    pub fn from_endpoints(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Grow the interval to cover `value`.
    #[inline]
    pub fn expand(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Closed-interval overlap test; endpoint contact counts.
    #[inline]
    pub fn intersects(&self, other: &Range) -> bool {
        !(other.max < self.min || other.min > self.max)
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The axis of the component with the largest absolute value.
    ///
    /// Ties resolve by strict-greater comparisons falling through to `Z`:
    /// an all-equal vector selects `Z`. Deterministic so that projections
    /// and split choices are reproducible.
    pub fn dominant(v: Vector3<f64>) -> Self {
        if v.x.abs() > v.y.abs() {
            if v.x.abs() > v.z.abs() {
                Axis::X
            } else {
                Axis::Z
            }
        } else if v.y.abs() > v.z.abs() {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// The coordinate of `point` along this axis.
    #[inline]
    pub fn component(self, point: Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

/// Capability shared by the two plane kinds: a signed, unnormalized distance
/// from a point.
///
/// The sign tells the side; the magnitude is proportional to the true
/// distance only for unit normals, so distances from different planes are
/// not comparable. Point classifiers come for free, and the triangle-wise
/// variants ([`triangle_in_front`], [`triangle_behind`],
/// [`triangle_coplanar`]) lift them vertex-wise over any implementor.
pub trait SignedDistance {
    /// Signed, unnormalized distance from `point` to the surface.
    fn signed_distance(&self, point: Point3<f64>) -> f64;

    /// Strictly on the positive side: distance `> epsilon`.
    #[inline]
    fn is_front(&self, point: Point3<f64>, epsilon: f64) -> bool {
        self.signed_distance(point) > epsilon
    }

    /// Strictly on the negative side: distance `< -epsilon`.
    #[inline]
    fn is_back(&self, point: Point3<f64>, epsilon: f64) -> bool {
        self.signed_distance(point) < -epsilon
    }

    /// Inside the tolerance slab: `|distance| ≤ epsilon`.
    #[inline]
    fn is_coplanar(&self, point: Point3<f64>, epsilon: f64) -> bool {
        self.signed_distance(point).abs() <= epsilon
    }
}

/// All three vertices strictly in front of the plane.
pub fn triangle_in_front<P: SignedDistance>(plane: &P, tri: &Triangle, epsilon: f64) -> bool {
    tri.vertices().into_iter().all(|v| plane.is_front(v, epsilon))
}

/// All three vertices strictly behind the plane.
pub fn triangle_behind<P: SignedDistance>(plane: &P, tri: &Triangle, epsilon: f64) -> bool {
    tri.vertices().into_iter().all(|v| plane.is_back(v, epsilon))
}

/// All three vertices inside the plane's tolerance slab.
pub fn triangle_coplanar<P: SignedDistance>(plane: &P, tri: &Triangle, epsilon: f64) -> bool {
    tri.vertices()
        .into_iter()
        .all(|v| plane.is_coplanar(v, epsilon))
}

/// A line as base point plus direction.
///
/// The direction need not be unit length, so projections are commensurable
/// only across queries on the same line instance.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub point: Point3<f64>,
    pub dir: Vector3<f64>,
}

impl Line {
    /// Create a line. The direction must not be near zero.
    #[inline]
    pub fn new(point: Point3<f64>, dir: Vector3<f64>) -> Self {
        debug_assert!(dir.norm_squared() >= DEFAULT_EPSILON * DEFAULT_EPSILON);
        Self { point, dir }
    }

    /// Signed parameter of `point` along the line: `(point - base) · dir`.
    #[inline]
    pub fn projection(&self, point: Point3<f64>) -> f64 {
        (point - self.point).dot(&self.dir)
    }

    /// Line parameter at which `edge` crosses `plane`.
    ///
    /// Returns `None` when both endpoints sit inside the plane's tolerance
    /// slab, or when both lie strictly on the same side. Otherwise the
    /// parameter is the projection onto this line of the segment's
    /// plane-crossing point:
    ///
    /// ```text
    /// t = (proj(a)·dist(b) - proj(b)·dist(a)) / (dist(b) - dist(a))
    /// ```
    pub fn edge_intersection(&self, edge: &Edge, plane: &Plane, epsilon: f64) -> Option<f64> {
        let (a, b) = *edge;
        let dist_a = plane.signed_distance(a);
        let dist_b = plane.signed_distance(b);

        if dist_a.abs() < epsilon && dist_b.abs() < epsilon {
            return None;
        }
        if (dist_a > epsilon && dist_b > epsilon) || (dist_a < -epsilon && dist_b < -epsilon) {
            return None;
        }
        let proj_a = self.projection(a);
        let proj_b = self.projection(b);
        Some((proj_a * dist_b - proj_b * dist_a) / (dist_b - dist_a))
    }

    /// Rotate `point` around the line by `angle` radians.
    pub fn rotate_point(&self, point: Point3<f64>, angle: f64) -> Point3<f64> {
        let rotation = UnitQuaternion::from_axis_angle(&Unit::new_normalize(self.dir), angle);
        self.point + rotation * (point - self.point)
    }
}

/// A plane as base point plus (unnormalized) normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    point: Point3<f64>,
    normal: Vector3<f64>,
}

impl Plane {
    /// Create a plane. The normal must not be near zero.
    #[inline]
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        debug_assert!(normal.norm_squared() > DEFAULT_EPSILON * DEFAULT_EPSILON);
        Self { point, normal }
    }

    /// The supporting plane of a non-degenerate triangle.
    #[inline]
    pub fn from_triangle(tri: &Triangle) -> Self {
        debug_assert!(!tri.is_degenerate(DEFAULT_EPSILON));
        Self::new(tri.v0, tri.normal_unnormalized())
    }

    #[inline]
    pub fn point(&self) -> Point3<f64> {
        self.point
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// The line where two planes meet, or `None` for (near-)parallel planes.
    ///
    /// The direction is `n₁ × n₂`; planes count as parallel when its squared
    /// length falls below `epsilon²`.
    pub fn intersection(&self, other: &Plane, epsilon: f64) -> Option<Line> {
        let dir = self.normal.cross(&other.normal);
        let det = dir.norm_squared();
        if det < epsilon * epsilon {
            return None;
        }
        let point = (dir.cross(&self.normal) * other.point.coords.dot(&other.normal)
            - dir.cross(&other.normal) * self.point.coords.dot(&self.normal))
            / det;
        Some(Line::new(Point3::from(point), dir))
    }
}

impl SignedDistance for Plane {
    #[inline]
    fn signed_distance(&self, point: Point3<f64>) -> f64 {
        (point - self.point).dot(&self.normal)
    }
}

/// An axis-aligned plane: an offset along one coordinate axis.
///
/// Doubles as the projector onto the 2D plane perpendicular to its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AaPlane {
    pub offset: f64,
    pub axis: Axis,
}

impl AaPlane {
    #[inline]
    pub fn new(offset: f64, axis: Axis) -> Self {
        Self { offset, axis }
    }

    /// Drop this plane's axis from `point`.
    ///
    /// `X` keeps (y, z), `Y` keeps (x, z), `Z` keeps (x, y).
    #[inline]
    pub fn project_point(&self, point: Point3<f64>) -> Point2<f64> {
        match self.axis {
            Axis::X => Point2::new(point.y, point.z),
            Axis::Y => Point2::new(point.x, point.z),
            Axis::Z => Point2::new(point.x, point.y),
        }
    }

    /// Project all three vertices.
    pub fn project_triangle(&self, tri: &Triangle) -> Triangle2D {
        Triangle2D::new(
            self.project_point(tri.v0),
            self.project_point(tri.v1),
            self.project_point(tri.v2),
        )
    }
}

impl SignedDistance for AaPlane {
    #[inline]
    fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.axis.component(point) - self.offset
    }
}

/// A triangle in the projection plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2D {
    pub v0: Point2<f64>,
    pub v1: Point2<f64>,
    pub v2: Point2<f64>,
}

impl Triangle2D {
    #[inline]
    pub fn new(v0: Point2<f64>, v1: Point2<f64>, v2: Point2<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// The three edges as (start, end) pairs, in winding order.
    #[inline]
    pub fn edges(&self) -> [Edge2D; 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Whether `point` lies inside the triangle; boundary points count.
    ///
    /// True iff the three edge orientations share a sign (all `≥ 0` or all
    /// `≤ 0`), which makes the test winding-independent.
    pub fn contains_point(&self, point: Point2<f64>) -> bool {
        let d1 = orientation(point, &(self.v0, self.v1));
        let d2 = orientation(point, &(self.v1, self.v2));
        let d3 = orientation(point, &(self.v2, self.v0));
        (d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0) || (d1 <= 0.0 && d2 <= 0.0 && d3 <= 0.0)
    }

    /// Whether all three vertices of `other` lie inside this triangle.
    pub fn contains_triangle(&self, other: &Triangle2D) -> bool {
        self.contains_point(other.v0)
            && self.contains_point(other.v1)
            && self.contains_point(other.v2)
    }
}

/// Twice the signed area of the triangle (p, a, b) for `edge = (a, b)`.
///
/// Zero means collinear; the sign tells which side of the edge's supporting
/// line `p` falls on.
#[inline]
pub(crate) fn orientation(p: Point2<f64>, edge: &Edge2D) -> f64 {
    let (a, b) = *edge;
    (b.x - p.x) * (b.y - a.y) - (b.x - a.x) * (b.y - p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = DEFAULT_EPSILON;

    #[test]
    fn test_range_overlap() {
        let a = Range::new(0.0, 2.0);
        assert!(a.intersects(&Range::new(1.0, 3.0)));
        assert!(a.intersects(&Range::new(-1.0, 0.5)));
        assert!(a.intersects(&Range::new(0.5, 1.5)));
        assert!(!a.intersects(&Range::new(2.5, 3.0)));
        assert!(!a.intersects(&Range::new(-2.0, -0.5)));
    }

    #[test]
    fn test_range_endpoint_contact_counts() {
        let a = Range::new(0.0, 2.0);
        assert!(a.intersects(&Range::new(2.0, 4.0)));
        assert!(a.intersects(&Range::new(-1.0, 0.0)));
    }

    #[test]
    fn test_empty_range_intersects_nothing() {
        assert!(!Range::EMPTY.intersects(&Range::new(-1e12, 1e12)));
        assert!(!Range::new(-1e12, 1e12).intersects(&Range::EMPTY));
        assert!(!Range::EMPTY.intersects(&Range::EMPTY));

        let mut r = Range::EMPTY;
        r.expand(3.0);
        assert_eq!(r, Range::new(3.0, 3.0));
        assert!(r.intersects(&Range::new(3.0, 5.0)));
    }

    #[test]
    fn test_from_endpoints_orders() {
        let r = Range::from_endpoints(4.0, 1.0);
        assert_eq!((r.min(), r.max()), (1.0, 4.0));
        assert_eq!(Range::from_endpoints(1.0, 4.0), Range::new(1.0, 4.0));
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(Axis::dominant(Vector3::new(3.0, -1.0, 2.0)), Axis::X);
        assert_eq!(Axis::dominant(Vector3::new(-1.0, 4.0, 2.0)), Axis::Y);
        assert_eq!(Axis::dominant(Vector3::new(1.0, 2.0, -5.0)), Axis::Z);
        // Ties fall through to later axes, z last.
        assert_eq!(Axis::dominant(Vector3::new(1.0, 1.0, 1.0)), Axis::Z);
        assert_eq!(Axis::dominant(Vector3::new(2.0, 2.0, 1.0)), Axis::Y);
        assert_eq!(Axis::dominant(Vector3::new(2.0, 1.0, 2.0)), Axis::Z);
    }

    #[test]
    fn test_line_projection_is_monotone_along_dir() {
        let line = Line::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 2.0, 0.0));
        let p0 = line.projection(Point3::new(1.0, 1.0, 1.0));
        let p1 = line.projection(Point3::new(5.0, 2.0, -3.0));
        let p2 = line.projection(Point3::new(0.0, 3.0, 0.0));
        assert_relative_eq!(p0, 0.0);
        assert!(p0 < p1 && p1 < p2);
    }

    #[test]
    fn test_edge_intersection_crossing() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let line = Line::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        // Edge pierces z = 0 at (2, 0, 0).
        let edge = (Point3::new(2.0, 0.0, -1.0), Point3::new(2.0, 0.0, 1.0));
        let t = line.edge_intersection(&edge, &plane, EPS).unwrap();
        assert_relative_eq!(t, 2.0);
    }

    #[test]
    fn test_edge_intersection_same_side_is_none() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let line = Line::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        let above = (Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 2.0));
        let below = (Point3::new(0.0, 0.0, -2.0), Point3::new(1.0, 0.0, -1.0));
        assert!(line.edge_intersection(&above, &plane, EPS).is_none());
        assert!(line.edge_intersection(&below, &plane, EPS).is_none());
    }

    #[test]
    fn test_edge_intersection_slab_edge_is_none() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let line = Line::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        // Both endpoints within the tolerance slab of z = 0.
        let edge = (Point3::new(0.0, 0.0, EPS / 2.0), Point3::new(1.0, 0.0, -EPS / 2.0));
        assert!(line.edge_intersection(&edge, &plane, EPS).is_none());
    }

    #[test]
    fn test_edge_touching_from_one_side_has_parameter() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let line = Line::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        // One endpoint in the slab, the other strictly above.
        let edge = (Point3::new(3.0, 0.0, 0.0), Point3::new(4.0, 0.0, 2.0));
        let t = line.edge_intersection(&edge, &plane, EPS).unwrap();
        assert_relative_eq!(t, 3.0);
    }

    #[test]
    fn test_plane_intersection_line() {
        let xy = Plane::new(Point3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 1.0));
        let xz = Plane::new(Point3::new(0.0, 3.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let line = xy.intersection(&xz, EPS).unwrap();
        // The line must lie in both planes.
        assert_relative_eq!(xy.signed_distance(line.point), 0.0, epsilon = 1e-12);
        assert_relative_eq!(xz.signed_distance(line.point), 0.0, epsilon = 1e-12);
        let along = line.point + line.dir;
        assert_relative_eq!(xy.signed_distance(along), 0.0, epsilon = 1e-12);
        assert_relative_eq!(xz.signed_distance(along), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_planes_do_not_intersect() {
        let a = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let b = Plane::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -2.0));
        assert!(a.intersection(&b, EPS).is_none());
    }

    #[test]
    fn test_rotate_point_about_axis() {
        let z_axis = Line::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0));
        let rotated = z_axis.rotate_point(Point3::new(1.0, 0.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(rotated, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        // Rotating about a line through the point itself is the identity.
        let diag = Line::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0));
        let fixed = diag.rotate_point(Point3::new(2.0, 2.0, 2.0), 1.234);
        assert_relative_eq!(fixed, Point3::new(2.0, 2.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_plane_side_classifiers() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 2.0));
        assert!(plane.is_front(Point3::new(5.0, 5.0, 2.0), EPS));
        assert!(plane.is_back(Point3::new(-5.0, 0.0, 0.0), EPS));
        assert!(plane.is_coplanar(Point3::new(9.0, -9.0, 1.0), EPS));
        // Slab points are neither front nor back.
        let boundary = Point3::new(0.0, 0.0, 1.0 + EPS / 4.0);
        assert!(!plane.is_front(boundary, EPS));
        assert!(!plane.is_back(boundary, EPS));
    }

    #[test]
    fn test_aa_plane_distance_and_projection() {
        let plane = AaPlane::new(2.0, Axis::Y);
        assert_relative_eq!(plane.signed_distance(Point3::new(7.0, 5.0, -1.0)), 3.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(7.0, -5.0, -1.0)), -7.0);

        let p = Point3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(AaPlane::new(0.0, Axis::X).project_point(p), Point2::new(2.0, 3.0));
        assert_relative_eq!(AaPlane::new(0.0, Axis::Y).project_point(p), Point2::new(1.0, 3.0));
        assert_relative_eq!(AaPlane::new(0.0, Axis::Z).project_point(p), Point2::new(1.0, 2.0));
    }

    #[test]
    fn test_triangle_classifiers() {
        let plane = AaPlane::new(0.0, Axis::Z);
        let above = Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 3.0),
        );
        let below = above.translated(Vector3::new(0.0, 0.0, -10.0));
        let straddling = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 3.0),
        );
        let flat = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(triangle_in_front(&plane, &above, EPS));
        assert!(triangle_behind(&plane, &below, EPS));
        assert!(!triangle_in_front(&plane, &straddling, EPS));
        assert!(!triangle_behind(&plane, &straddling, EPS));
        assert!(triangle_coplanar(&plane, &flat, EPS));
        assert!(!triangle_coplanar(&plane, &straddling, EPS));
    }

    #[test]
    fn test_contains_point_boundary_counts() {
        let tri = Triangle2D::new(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        );
        assert!(tri.contains_point(Point2::new(0.5, 0.5)));
        assert!(tri.contains_point(Point2::new(1.0, 1.0))); // on the hypotenuse
        assert!(tri.contains_point(Point2::new(0.0, 0.0))); // vertex
        assert!(!tri.contains_point(Point2::new(1.5, 1.5)));
        assert!(!tri.contains_point(Point2::new(-0.1, 0.5)));
    }

    #[test]
    fn test_contains_triangle() {
        let outer = Triangle2D::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
        );
        let inner = Triangle2D::new(
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 2.0),
        );
        assert!(outer.contains_triangle(&inner));
        assert!(!inner.contains_triangle(&outer));
    }

    #[test]
    fn test_orientation_sign_flips_with_side() {
        let edge = (Point2::new(0.0, 0.0), Point2::new(2.0, 0.0));
        assert!(orientation(Point2::new(1.0, 1.0), &edge) > 0.0);
        assert!(orientation(Point2::new(1.0, -1.0), &edge) < 0.0);
        assert_relative_eq!(orientation(Point2::new(5.0, 0.0), &edge), 0.0);
    }
}
