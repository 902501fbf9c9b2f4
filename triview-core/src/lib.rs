//! # Triview Core
//!
//! This library provides the shared types used to estimate the relative pose of three viewpoints
//! and the scene they all observe. Every crate in this workspace depends on it.
//!
//! The only inputs to the estimation are direction vectors, called azimuths. Each viewpoint
//! observes the same set of physical points and reports, for every point, the direction in which
//! it sees that point in its own local frame. Nothing is known about calibration or scale. The
//! `i`-th azimuth of each of the three sequences refers to the same physical point; this aligned
//! form is captured by [`Correspondences`].
//!
//! ## Reconstruction frame
//!
//! The reconstruction is expressed in the frame of viewpoint 1. Its center `c1` sits at the origin
//! and the other centers are recovered by chaining the pairwise transforms (see
//! [`PairwiseTransforms::centers`]):
//!
//! - `c2 = c1 + T12`
//! - `c3 = c2 + R12 * T23`
//!
//! Each scene point is then the least-squares intersection of the three rays leaving the centers
//! along the azimuths rotated into the common frame.
//!
//! - `X` the scene point
//! - `a1`, `a2`, `a3` the azimuths of `X` seen from each viewpoint
//! - `c1`, `c2`, `c3` the viewpoint centers
//!
//! ```text
//!                       X
//!                     / | \
//!                 a1 /  |  \ a3
//!                   /   |a2 \
//!                  /    |    \
//!                c1     |     c3
//!                  \    |    /
//!                   \   |   /
//!                    \  |  /
//!                      c2
//! ```
//!
//! Independently estimated reconstructions share no common frame or scale. When two of them share a
//! baseline (the segment between two viewpoint centers), they can be fused into one frame with a
//! similarity transform. The accumulated result is still a [`Model`].

mod correspondences;
mod depths;
mod error;
mod model;
mod settings;
mod so3;
mod transforms;

pub use correspondences::*;
pub use depths::*;
pub use error::*;
pub use model::*;
pub use nalgebra;
pub use settings::*;
pub use so3::*;
pub use transforms::*;
