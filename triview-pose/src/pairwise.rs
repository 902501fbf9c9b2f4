use itertools::izip;
use triview_core::{
    nalgebra::IsometryMatrix3, Correspondences, Depths, Error, PairwiseTransforms, Result,
    ViewpointPair,
};
use triview_geom::RigidAligner;

/// Aligns every ordered viewpoint pair given the current depths.
///
/// The azimuths of each viewpoint are scaled by their depths, giving one point set per viewpoint,
/// and each pair of point sets is handed to the [`RigidAligner`]. This is a pure function of the
/// correspondences and the depths.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct PairwiseTransformEstimator {
    pub aligner: RigidAligner,
}

impl PairwiseTransformEstimator {
    pub fn new(aligner: RigidAligner) -> Self {
        Self { aligner }
    }

    /// Fails with [`Error::ShapeMismatch`] if there is not one depth per correspondence and with
    /// [`Error::DegenerateAlignment`] naming the first pair that cannot be aligned.
    pub fn estimate(
        &self,
        correspondences: &Correspondences<'_>,
        depths: &Depths,
    ) -> Result<PairwiseTransforms> {
        depths.check_len(correspondences.len())?;
        let mut isometries = [IsometryMatrix3::identity(); 3];
        for (isometry, pair) in isometries.iter_mut().zip(ViewpointPair::ALL) {
            let (source, target) = pair.viewpoints();
            let points = izip!(
                correspondences.viewpoint(source),
                depths.viewpoint(source),
                correspondences.viewpoint(target),
                depths.viewpoint(target),
            )
            .map(|(&a, &da, &b, &db)| (a * da, b * db));
            *isometry = self
                .aligner
                .align(points)
                .ok_or(Error::DegenerateAlignment { pair })?;
        }
        Ok(PairwiseTransforms::from_pairs(isometries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use triview_core::nalgebra::{Point3, Vector3};

    #[test]
    fn shifted_viewpoints_align_by_translation() {
        let scene = [
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(1.0, -1.0, 5.0),
            Point3::new(-2.0, 0.5, 6.0),
            Point3::new(0.5, 2.0, 3.0),
        ];
        let centers = [
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let azimuths: Vec<Vec<Vector3<f64>>> = centers
            .iter()
            .map(|c| scene.iter().map(|x| (x - c).normalize()).collect())
            .collect();
        let depths: Depths = scene
            .iter()
            .map(|x| [0, 1, 2].map(|k| (x - centers[k]).norm()))
            .collect();
        let correspondences =
            Correspondences::new(&azimuths[0], &azimuths[1], &azimuths[2]).unwrap();
        let transforms = PairwiseTransformEstimator::default()
            .estimate(&correspondences, &depths)
            .unwrap();
        for (pair, isometry) in transforms.iter() {
            let (source, target) = pair.viewpoints();
            assert_relative_eq!(
                isometry.translation.vector,
                centers[source] - centers[target],
                epsilon = 1e-9
            );
            assert_relative_eq!(
                *isometry.rotation.matrix(),
                triview_core::nalgebra::Matrix3::identity(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn collinear_points_name_the_pair() {
        let line: Vec<Vector3<f64>> = (1..4).map(|i| Vector3::new(0.0, 0.0, i as f64)).collect();
        let correspondences = Correspondences::new(&line, &line, &line).unwrap();
        assert_eq!(
            PairwiseTransformEstimator::default().estimate(&correspondences, &Depths::ones(3)),
            Err(Error::DegenerateAlignment {
                pair: ViewpointPair::OneTwo
            })
        );
    }

    #[test]
    fn depths_must_match() {
        let azimuths = [Vector3::x(), Vector3::y(), Vector3::z()];
        let correspondences = Correspondences::new(&azimuths, &azimuths, &azimuths).unwrap();
        assert_eq!(
            PairwiseTransformEstimator::default().estimate(&correspondences, &Depths::ones(2)),
            Err(Error::ShapeMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
