//! Relative pose and scene estimation for three viewpoints that only report directions.
//!
//! Each viewpoint sees the same set of physical points and reports, in its own frame, the
//! direction (azimuth) in which it sees each one. No calibration and no scale are known.
//! [`PoseEstimator`] alternates between aligning the depth-scaled azimuths of each viewpoint
//! pair and re-estimating the depths from the intersections of the viewpoint rays. What comes out
//! is a [`Model`]: the triangulated scene and the three viewpoint centers in the frame of the first
//! viewpoint.
//!
//! Models estimated independently for overlapping viewpoint triples can be brought into one frame
//! with [`Fusion`], provided each following model starts with the last two viewpoints of the model
//! before it.
//!
//! The free functions [`estimate_pose`], [`fuse`] and [`fuse_chain`] run these with the default
//! tolerances.

mod estimator;
mod fusion;
mod pairwise;
mod ray_length;
mod scene;

pub use estimator::*;
pub use fusion::*;
pub use pairwise::*;
pub use ray_length::*;
pub use scene::*;

use triview_core::{nalgebra::Vector3, Correspondences, Model, Result};

/// Estimates the scene and viewpoint centers from three aligned azimuth sequences.
///
/// The sequences must have the same non-zero length and `iterations` must be at least `1`.
pub fn estimate_pose(
    points_1: &[Vector3<f64>],
    points_2: &[Vector3<f64>],
    points_3: &[Vector3<f64>],
    iterations: usize,
) -> Result<Model> {
    let correspondences = Correspondences::new(points_1, points_2, points_3)?;
    PoseEstimator::new()
        .estimate(&correspondences, iterations)
        .map(|estimate| estimate.model)
}

/// Fuses `model_b` onto `model_a`. See [`Fusion::fuse`].
pub fn fuse(model_a: &Model, model_b: &Model) -> Result<Model> {
    Fusion::default().fuse(model_a, model_b)
}

/// Fuses `models` in order into one model. See [`Fusion::fuse_chain`].
pub fn fuse_chain(models: &[Model]) -> Result<Model> {
    Fusion::default().fuse_chain(models)
}
