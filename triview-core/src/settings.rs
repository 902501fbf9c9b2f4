#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// What to do when two fused baselines point in opposite directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum AntiparallelPolicy {
    /// Fail the fusion with [`crate::Error::AntiparallelBaseline`].
    #[default]
    Reject,
    /// Use a half turn about an axis perpendicular to the baseline.
    HalfTurn,
}

/// The numeric tolerances of pose estimation and fusion.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    /// The epsilon used in the SVD of the correlation matrices
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_svd_epsilon"))]
    pub svd_epsilon: f64,
    /// The maximum iterations of the SVD of the correlation matrices
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_svd_max_iterations")
    )]
    pub svd_max_iterations: usize,
    /// Singular values below the largest one times this are treated as zero when checking that a
    /// correlation matrix has enough rank to determine a rotation
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_rank_tolerance"))]
    pub rank_tolerance: f64,
    /// The epsilon used in the symmetric eigen solver of the ray intersection
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_eigen_epsilon"))]
    pub eigen_epsilon: f64,
    /// The maximum iterations of the symmetric eigen solver of the ray intersection
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_eigen_max_iterations")
    )]
    pub eigen_max_iterations: usize,
    /// The ray intersection is singular if its smallest eigenvalue is below the largest one times this
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_conditioning_tolerance")
    )]
    pub conditioning_tolerance: f64,
    /// Baselines are antiparallel when one plus the cosine between them is below this
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_antiparallel_tolerance")
    )]
    pub antiparallel_tolerance: f64,
    /// How antiparallel baselines are fused
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub antiparallel_policy: AntiparallelPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            svd_epsilon: default_svd_epsilon(),
            svd_max_iterations: default_svd_max_iterations(),
            rank_tolerance: default_rank_tolerance(),
            eigen_epsilon: default_eigen_epsilon(),
            eigen_max_iterations: default_eigen_max_iterations(),
            conditioning_tolerance: default_conditioning_tolerance(),
            antiparallel_tolerance: default_antiparallel_tolerance(),
            antiparallel_policy: AntiparallelPolicy::default(),
        }
    }
}

fn default_svd_epsilon() -> f64 {
    1e-12
}

fn default_svd_max_iterations() -> usize {
    1000
}

fn default_rank_tolerance() -> f64 {
    1e-9
}

fn default_eigen_epsilon() -> f64 {
    1e-12
}

fn default_eigen_max_iterations() -> usize {
    1000
}

fn default_conditioning_tolerance() -> f64 {
    1e-10
}

fn default_antiparallel_tolerance() -> f64 {
    1e-9
}
