//! This crate contains the geometric building blocks of three-viewpoint reconstruction.
//!
//! ## Rigid alignment
//!
//! Two point sets that differ only by a rotation and a translation are aligned with
//! [`RigidAligner`], the SVD solution of the orthogonal Procrustes problem. The azimuths of two
//! viewpoints, once scaled by their depths, are exactly such a pair of point sets.
//!
//! ## Ray intersection
//!
//! Each viewpoint center and azimuth define a ray. With noise free data, the rays of the
//! same physical point meet in that point. [`RayIntersector`] finds the point closest to all of
//! them in the least-squares sense.
//!
//! - `X` the intersection
//! - `c` a ray origin
//! - `d` a ray direction
//!
//! ```text
//!           X
//!          /|\
//!         / | \
//!        d  d  d
//!       /   |   \
//!      c    c    c
//! ```
//!
//! ## Baseline registration
//!
//! Two reconstructions sharing two viewpoint centers are brought into one frame with a
//! [`Similarity`] found by [`BaselineRegistrar`].

mod alignment;
mod intersection;
mod similarity;

pub use alignment::*;
pub use intersection::*;
pub use similarity::*;
