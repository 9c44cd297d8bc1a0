//! Core scene data types.

use nalgebra::{Point3, Vector3};

/// Index of a triangle within a scene slice.
pub type TriangleIdx = u32;

/// A triangle with concrete vertex positions.
///
/// Vertex order is the caller's; the unnormalized normal follows the
/// right-hand rule over `(v1 - v0) × (v2 - v0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// The three vertices in order.
    #[inline]
    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// The three edges as (start, end) pairs, in winding order.
    #[inline]
    pub fn edges(&self) -> [(Point3<f64>, Point3<f64>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Compute the (unnormalized) face normal via cross product.
    #[inline]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    /// Returns `None` for degenerate triangles (zero area).
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Whether the triangle is too thin to define a plane: `‖n‖² ≤ ε²`.
    ///
    /// Degenerate triangles must be filtered out before intersection testing;
    /// see [`crate::validate::validate_scene`].
    #[inline]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.normal_unnormalized().norm_squared() <= epsilon * epsilon
    }

    /// Axis-aligned bounding box as (min corner, max corner).
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        let min = Point3::new(
            self.v0.x.min(self.v1.x).min(self.v2.x),
            self.v0.y.min(self.v1.y).min(self.v2.y),
            self.v0.z.min(self.v1.z).min(self.v2.z),
        );
        let max = Point3::new(
            self.v0.x.max(self.v1.x).max(self.v2.x),
            self.v0.y.max(self.v1.y).max(self.v2.y),
            self.v0.z.max(self.v1.z).max(self.v2.z),
        );
        (min, max)
    }

    /// Copy of the triangle translated by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            v0: self.v0 + offset,
            v1: self.v1 + offset,
            v2: self.v2 + offset,
        }
    }
}
