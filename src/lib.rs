//! Triangle-triangle intersection testing and collision reporting for 3D
//! triangle scenes.
//!
//! Given an ordered sequence of triangles, the crate reports every triangle
//! that intersects at least one other triangle in the set. Two pieces do the
//! heavy lifting:
//!
//! - a tolerance-aware triangle-triangle predicate ([`intersects`]) that
//!   handles coplanar, edge-touching, and near-degenerate configurations,
//! - a recursive axis-aligned split tree ([`tree::TreeNode`]) that prunes the
//!   all-pairs scan down to candidate pairs while reporting exactly the same
//!   set as the brute-force reference.
//!
//! # Quick start
//!
//! ```
//! use nalgebra::Point3;
//! use tri_collide::{Triangle, find_intersecting_triangles, intersects};
//!
//! let floor = Triangle::new(
//!     Point3::new(-1.0, -1.0, 0.0),
//!     Point3::new(1.0, -1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! );
//! let wall = Triangle::new(
//!     Point3::new(-1.0, 0.0, -1.0),
//!     Point3::new(1.0, 0.0, -1.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! );
//! let far = Triangle::new(
//!     Point3::new(10.0, 10.0, 10.0),
//!     Point3::new(11.0, 10.0, 10.0),
//!     Point3::new(10.0, 11.0, 10.0),
//! );
//!
//! assert!(intersects(&floor, &wall));
//!
//! let colliding = find_intersecting_triangles(&[floor, wall, far]);
//! assert_eq!(colliding.into_iter().collect::<Vec<_>>(), vec![0, 1]);
//! ```
//!
//! # Tolerance
//!
//! A single tolerance `epsilon` governs every near-zero comparison: sign
//! tests use `±epsilon`, squared-length tests use `epsilon²`, and a point
//! within `epsilon` of a plane counts as on it. The default
//! ([`DEFAULT_EPSILON`]) is the single-precision machine epsilon, which suits
//! coordinates of magnitude around one. A single absolute tolerance cannot
//! serve scenes spanning many orders of magnitude, so the scan takes it as a
//! knob ([`CollisionParams`]); results for inputs well clear of the
//! tolerance boundary are exact, while configurations inside the boundary
//! get a deterministic answer that depends on `epsilon`.
//!
//! # Preconditions
//!
//! Triangles must be non-degenerate (no collinear or duplicated vertices)
//! and coordinates finite. The predicate treats violations as programmer
//! errors via debug assertions; run [`validate_scene`] (or drop offenders
//! with [`validate::degenerate_triangles`]) when the input comes from
//! outside.
//!
//! # Diagnostics
//!
//! The crate logs through [`tracing`]: a summary per scan at `info`, split
//! decisions at `debug`, per-pair and per-edge detail at `trace`. With no
//! subscriber installed nothing is emitted, and the subscriber never affects
//! the returned set.

mod error;
mod types;

pub mod geometry;
pub mod intersect;
pub mod tree;
pub mod validate;

pub use error::{CollideError, CollideResult};
pub use geometry::{
    AaPlane, Axis, DEFAULT_EPSILON, Edge, Edge2D, Line, Plane, Range, SignedDistance, Triangle2D,
};
pub use intersect::{intersects, triangles_intersect};
pub use tree::{
    CollisionParams, Collisions, TreeNode, find_intersecting_triangles,
    find_intersecting_triangles_with_params,
};
pub use types::{Triangle, TriangleIdx};
pub use validate::validate_scene;
