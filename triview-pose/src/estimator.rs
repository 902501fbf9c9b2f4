use crate::{PairwiseTransformEstimator, RayLengthEstimator, SceneBuilder};
use triview_core::{
    Correspondences, Depths, Error, Model, PairwiseTransforms, Result, Settings,
};
use triview_geom::{RayIntersector, RigidAligner};

/// The state carried from one iteration of the estimation loop to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseState {
    pub transforms: PairwiseTransforms,
    pub depths: Depths,
}

/// The outcome of [`PoseEstimator::estimate`].
#[derive(Clone, Debug, PartialEq)]
pub struct PoseEstimate {
    /// The triangulated scene and the viewpoint centers.
    pub model: Model,
    /// The pairwise transforms of the last iteration, which produced the model.
    pub transforms: PairwiseTransforms,
    /// The depths computed by the last iteration.
    pub depths: Depths,
}

/// Jointly estimates the relative pose of three viewpoints and the scene they observe.
///
/// Starting from every depth set to `1.0`, the estimator alternates two steps for a fixed number
/// of iterations:
///
/// 1. the viewpoint pairs are aligned given the current depths ([`PairwiseTransformEstimator`])
/// 2. the depths are recomputed from the intersections of the rays ([`RayLengthEstimator`])
///
/// There is no convergence test. Once the iterations run out, the transforms of the last
/// iteration are used to triangulate the scene ([`SceneBuilder`]).
///
/// The scale of the result is arbitrary and the frame is that of viewpoint 1, whose center is the
/// origin.
///
/// ```
/// use triview_core::{nalgebra::{Point3, Vector3}, Correspondences};
/// use triview_pose::PoseEstimator;
///
/// let scene = [
///     Point3::new(0.0, 0.0, 4.0),
///     Point3::new(1.0, -1.0, 5.0),
///     Point3::new(-2.0, 0.5, 6.0),
///     Point3::new(0.5, 2.0, 3.0),
/// ];
/// let centers = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
/// let azimuths: Vec<Vec<Vector3<f64>>> = centers
///     .iter()
///     .map(|c| scene.iter().map(|x| (x - c).normalize()).collect())
///     .collect();
/// let correspondences = Correspondences::new(&azimuths[0], &azimuths[1], &azimuths[2]).unwrap();
/// let estimate = PoseEstimator::new().estimate(&correspondences, 10).unwrap();
/// assert_eq!(estimate.model.scene.len(), 4);
/// assert_eq!(estimate.model.centers.len(), 3);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct PoseEstimator {
    pub pairwise: PairwiseTransformEstimator,
    pub ray_length: RayLengthEstimator,
    pub scene: SceneBuilder,
}

impl PoseEstimator {
    /// Creates a `PoseEstimator` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Configures the aligner and the intersector from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let aligner = RigidAligner::new()
            .epsilon(settings.svd_epsilon)
            .max_iterations(settings.svd_max_iterations)
            .rank_tolerance(settings.rank_tolerance);
        let intersector = RayIntersector::new()
            .epsilon(settings.eigen_epsilon)
            .max_iterations(settings.eigen_max_iterations)
            .conditioning(settings.conditioning_tolerance);
        Self {
            pairwise: PairwiseTransformEstimator::new(aligner),
            ray_length: RayLengthEstimator::new(intersector),
            scene: SceneBuilder::new(intersector),
        }
    }

    /// Runs one iteration of the loop from the given depths.
    pub fn step(
        &self,
        correspondences: &Correspondences<'_>,
        depths: &Depths,
    ) -> Result<PoseState> {
        let transforms = self.pairwise.estimate(correspondences, depths)?;
        let depths = self.ray_length.estimate(correspondences, &transforms)?;
        Ok(PoseState { transforms, depths })
    }

    /// Runs exactly `iterations` iterations and triangulates the scene.
    ///
    /// Fails with [`Error::InvalidIterationCount`] if `iterations` is zero. Any failure in an
    /// iteration aborts the whole estimation.
    pub fn estimate(
        &self,
        correspondences: &Correspondences<'_>,
        iterations: usize,
    ) -> Result<PoseEstimate> {
        if iterations == 0 {
            return Err(Error::InvalidIterationCount(iterations));
        }

        let mut state = self.step(correspondences, &Depths::ones(correspondences.len()))?;
        log_iteration(1, &state);
        for iteration in 2..=iterations {
            state = self.step(correspondences, &state.depths)?;
            log_iteration(iteration, &state);
        }
        log::info!(
            "terminating pose estimation of {} correspondences after {} iterations",
            correspondences.len(),
            iterations
        );

        let model = self.scene.build(correspondences, &state.transforms)?;
        let PoseState { transforms, depths } = state;
        Ok(PoseEstimate {
            model,
            transforms,
            depths,
        })
    }
}

fn log_iteration(iteration: usize, state: &PoseState) {
    if let Some([first, second, third]) = state.depths.means() {
        log::debug!(
            "iteration {}: mean depths {} {} {}, baseline {}",
            iteration,
            first,
            second,
            third,
            state.transforms.one_two.translation.vector.norm()
        );
    }
}
