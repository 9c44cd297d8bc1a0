//! Recursive axis-aligned split tree over triangle indices.
//!
//! Each node picks the axis of maximum bounding-box extent, splits at the
//! box midpoint, and sends triangles strictly in front or behind the split
//! plane to child subtrees. Triangles crossing the split plane (or inside
//! its tolerance slab) stay in the node's straddle list. Candidate pairs are
//! then straddle-vs-straddle and straddle-vs-either-child-subset; triangles
//! strictly separated by some split plane are never paired, which is sound
//! because the slab between "strictly front" and "strictly behind" is wider
//! than the tolerance. The reported set is identical to the brute-force
//! all-pairs scan.

use std::collections::BTreeSet;

use hashbrown::HashSet;
use nalgebra::Point3;
use tracing::{debug, info, trace};

use crate::geometry::{AaPlane, Axis, DEFAULT_EPSILON, triangle_behind, triangle_in_front};
use crate::intersect::triangles_intersect;
use crate::types::{Triangle, TriangleIdx};

/// The set of triangle indices participating in at least one intersection.
///
/// Ordered so iteration is deterministic.
pub type Collisions = BTreeSet<TriangleIdx>;

/// Tuning knobs for a collision scan.
#[derive(Debug, Clone, Copy)]
pub struct CollisionParams {
    /// Tolerance for every near-zero decision, in the scene's units.
    ///
    /// The default suits coordinates of magnitude around one; scenes spanning
    /// very large or very small scales should scale it accordingly, since a
    /// single absolute tolerance cannot fit mixed scales.
    pub epsilon: f64,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl CollisionParams {
    /// Params with a custom tolerance.
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

/// A node of the split tree over a subset of scene indices.
///
/// Children are exclusively owned; the tree is torn down in post-order when
/// the root is dropped. Every index of the subset lands in exactly one
/// straddle list across the whole tree.
#[derive(Debug)]
pub struct TreeNode {
    /// Triangles crossing this node's split plane.
    straddle: Vec<TriangleIdx>,
    /// Full subsets handed to each child, kept for straddle pairing.
    front_tris: Vec<TriangleIdx>,
    back_tris: Vec<TriangleIdx>,
    front: Option<Box<TreeNode>>,
    back: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Build the subtree for the triangle subset `tris`.
    ///
    /// Recursion stops when a child subset is empty, or when a split fails
    /// to separate anything from the subset; the node then keeps the whole
    /// subset in its straddle list and pair testing falls back to all-pairs
    /// at this level.
    pub fn build(tris: &[TriangleIdx], scene: &[Triangle], epsilon: f64) -> Self {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &idx in tris {
            for v in scene[idx as usize].vertices() {
                min.x = min.x.min(v.x);
                min.y = min.y.min(v.y);
                min.z = min.z.min(v.z);
                max.x = max.x.max(v.x);
                max.y = max.y.max(v.y);
                max.z = max.z.max(v.z);
            }
        }
        // TODO: try a median split; the box midpoint degrades on skewed
        // clusters.
        let axis = Axis::dominant(max - min);
        let split = AaPlane::new((axis.component(min) + axis.component(max)) * 0.5, axis);
        trace!(?axis, offset = split.offset, subset = tris.len(), "splitting subset");

        let mut straddle = Vec::new();
        let mut front_tris = Vec::new();
        let mut back_tris = Vec::new();
        for &idx in tris {
            let tri = &scene[idx as usize];
            if triangle_in_front(&split, tri, epsilon) {
                front_tris.push(idx);
            } else if triangle_behind(&split, tri, epsilon) {
                back_tris.push(idx);
            } else {
                straddle.push(idx);
            }
        }

        // A split that moves the whole subset into one child would recurse
        // forever; terminate the node as a leaf instead.
        if front_tris.len() == tris.len() || back_tris.len() == tris.len() {
            debug!(subset = tris.len(), "split separated nothing, keeping leaf");
            return Self {
                straddle: tris.to_vec(),
                front_tris: Vec::new(),
                back_tris: Vec::new(),
                front: None,
                back: None,
            };
        }

        let front = (!front_tris.is_empty())
            .then(|| Box::new(Self::build(&front_tris, scene, epsilon)));
        let back = (!back_tris.is_empty())
            .then(|| Box::new(Self::build(&back_tris, scene, epsilon)));
        Self {
            straddle,
            front_tris,
            back_tris,
            front,
            back,
        }
    }

    /// Collect the indices of all triangles in this subtree that intersect
    /// another triangle of the scene.
    pub fn test_collisions(&self, scene: &[Triangle], epsilon: f64) -> Collisions {
        self.scan(scene, epsilon).into_iter().collect()
    }

    fn scan(&self, scene: &[Triangle], epsilon: f64) -> HashSet<TriangleIdx> {
        let mut res = HashSet::new();
        for (i, &idx1) in self.straddle.iter().enumerate() {
            for &idx2 in &self.straddle[i + 1..] {
                test_pair(&mut res, scene, epsilon, idx1, idx2);
            }
            // A straddler may reach across the split plane, so it is paired
            // with every triangle of both child subsets.
            for &idx2 in &self.front_tris {
                test_pair(&mut res, scene, epsilon, idx1, idx2);
            }
            for &idx2 in &self.back_tris {
                test_pair(&mut res, scene, epsilon, idx1, idx2);
            }
        }
        if let Some(front) = &self.front {
            res.extend(front.scan(scene, epsilon));
        }
        if let Some(back) = &self.back {
            res.extend(back.scan(scene, epsilon));
        }
        res
    }
}

/// Test one candidate pair and record both indices on intersection.
///
/// Pairs whose members are both already recorded are skipped; the output is
/// membership, not a pair listing, so the extra confirmation adds nothing.
fn test_pair(
    res: &mut HashSet<TriangleIdx>,
    scene: &[Triangle],
    epsilon: f64,
    idx1: TriangleIdx,
    idx2: TriangleIdx,
) {
    if res.contains(&idx1) && res.contains(&idx2) {
        return;
    }
    trace!(idx1, idx2, "testing candidate pair");
    if triangles_intersect(&scene[idx1 as usize], &scene[idx2 as usize], epsilon) {
        res.insert(idx1);
        res.insert(idx2);
    }
}

/// Report every triangle that intersects at least one other triangle in the
/// scene, using [`CollisionParams::default`].
///
/// Triangle identity is the position in `scene`; the result holds each
/// participating index once. The scene is only borrowed, and the same input
/// always yields the same set.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use tri_collide::{Triangle, find_intersecting_triangles};
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
/// let far = Triangle::new(
///     Point3::new(10.0, 10.0, 10.0),
///     Point3::new(11.0, 10.0, 10.0),
///     Point3::new(10.0, 11.0, 10.0),
/// );
///
/// let colliding = find_intersecting_triangles(&[floor, wall, far]);
/// assert_eq!(colliding.into_iter().collect::<Vec<_>>(), vec![0, 1]);
/// ```
pub fn find_intersecting_triangles(scene: &[Triangle]) -> Collisions {
    find_intersecting_triangles_with_params(scene, &CollisionParams::default())
}

/// [`find_intersecting_triangles`] with explicit parameters.
pub fn find_intersecting_triangles_with_params(
    scene: &[Triangle],
    params: &CollisionParams,
) -> Collisions {
    if scene.is_empty() {
        return Collisions::new();
    }
    debug!(triangles = scene.len(), "building split tree");
    let indices: Vec<TriangleIdx> = (0..scene.len() as TriangleIdx).collect();
    let root = TreeNode::build(&indices, scene, params.epsilon);
    let colliding = root.test_collisions(scene, params.epsilon);
    info!(
        triangles = scene.len(),
        colliding = colliding.len(),
        "collision scan complete"
    );
    colliding
}
