use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use triview_core::{
    nalgebra::{Matrix3, Point3, Rotation3, Vector3},
    Correspondences, Depths, Error,
};
use triview_pose::{estimate_pose, PoseEstimator};

const SAMPLE_POINTS: usize = 16;
const ITERATIONS: usize = 25;
const EPSILON_APPROX: f64 = 1e-8;

const ROT_MAGNITUDE: f64 = 0.1;
const POINT_BOX_SIZE: f64 = 2.0;
const POINT_DISTANCE: f64 = 6.0;
const CENTER_BOX_SIZE: f64 = 1.0;

/// A scene of points in front of three viewpoints and the azimuths each viewpoint sees.
struct Rig {
    scene: Vec<Point3<f64>>,
    centers: [Point3<f64>; 3],
    azimuths: [Vec<Vector3<f64>>; 3],
}

impl Rig {
    fn random(rng: &mut impl Rng, orientations: [Rotation3<f64>; 3]) -> Self {
        let scene: Vec<Point3<f64>> = (0..SAMPLE_POINTS)
            .map(|_| {
                let mut p = Point3::from(random_vector(rng, POINT_BOX_SIZE));
                p.z += POINT_DISTANCE;
                p
            })
            .collect();
        let centers = [0, 1, 2].map(|_| Point3::from(random_vector(rng, CENTER_BOX_SIZE)));
        let azimuths: [Vec<Vector3<f64>>; 3] = [0, 1, 2].map(|k| {
            scene
                .iter()
                .map(|x| orientations[k] * (x - centers[k]).normalize())
                .collect()
        });
        Self {
            scene,
            centers,
            azimuths,
        }
    }

    fn correspondences(&self) -> Correspondences<'_> {
        Correspondences::new(&self.azimuths[0], &self.azimuths[1], &self.azimuths[2]).unwrap()
    }

    fn true_depths(&self) -> Depths {
        self.scene
            .iter()
            .map(|x| [0, 1, 2].map(|k| (x - self.centers[k]).norm()))
            .collect()
    }
}

fn random_vector(rng: &mut impl Rng, size: f64) -> Vector3<f64> {
    Vector3::from_fn(|_, _| rng.gen_range(-0.5 * size..0.5 * size))
}

fn random_rotation(rng: &mut impl Rng) -> Rotation3<f64> {
    Rotation3::new(random_vector(rng, 2.0) * std::f64::consts::PI * ROT_MAGNITUDE)
}

fn assert_proper_rotation(r: &Matrix3<f64>) {
    assert!((r.transpose() * r - Matrix3::identity()).norm() < EPSILON_APPROX);
    assert_relative_eq!(r.determinant(), 1.0, epsilon = EPSILON_APPROX);
}

#[test]
fn estimation_is_deterministic() {
    let mut rng = Pcg64::seed_from_u64(0);
    let orientations = [0, 1, 2].map(|_| random_rotation(&mut rng));
    let rig = Rig::random(&mut rng, orientations);
    let first = PoseEstimator::new()
        .estimate(&rig.correspondences(), ITERATIONS)
        .unwrap();
    let second = PoseEstimator::new()
        .estimate(&rig.correspondences(), ITERATIONS)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn estimated_rotations_are_proper() {
    let _ = pretty_env_logger::try_init_timed();
    let mut rng = Pcg64::seed_from_u64(1);
    for _ in 0..10 {
        let orientations = [0, 1, 2].map(|_| random_rotation(&mut rng));
        let rig = Rig::random(&mut rng, orientations);
        let estimate = PoseEstimator::new()
            .estimate(&rig.correspondences(), ITERATIONS)
            .unwrap();
        for (_, isometry) in estimate.transforms.iter() {
            assert_proper_rotation(isometry.rotation.matrix());
        }
        assert_eq!(estimate.model.scene.len(), SAMPLE_POINTS);
        assert_eq!(estimate.model.centers.len(), 3);
        assert_eq!(estimate.model.centers[0], Point3::origin());
        assert!(estimate
            .model
            .scene
            .iter()
            .all(|p| p.iter().all(|n| n.is_finite())));
        assert_eq!(estimate.depths.len(), SAMPLE_POINTS);
        assert!(estimate
            .depths
            .iter()
            .all(|ds| ds.iter().all(|&d| d.is_finite() && d >= 0.0)));
    }
}

#[test]
fn true_depths_are_a_fixed_point() {
    let mut rng = Pcg64::seed_from_u64(2);
    let rig = Rig::random(&mut rng, [Rotation3::identity(); 3]);
    let correspondences = rig.correspondences();
    let depths = rig.true_depths();

    let estimator = PoseEstimator::new();
    let state = estimator.step(&correspondences, &depths).unwrap();
    for (_, isometry) in state.transforms.iter() {
        assert_relative_eq!(
            *isometry.rotation.matrix(),
            Matrix3::identity(),
            epsilon = EPSILON_APPROX
        );
    }
    for k in 0..3 {
        for (&estimated, &expected) in state.depths.viewpoint(k).iter().zip(depths.viewpoint(k)) {
            assert_relative_eq!(estimated, expected, epsilon = EPSILON_APPROX);
        }
    }

    // The reconstruction is the true one mirrored through the first center.
    let model = estimator.scene.build(&correspondences, &state.transforms).unwrap();
    let c1 = rig.centers[0];
    for (center, truth) in model.centers.iter().zip(&rig.centers) {
        assert_relative_eq!(center.coords, c1 - truth, epsilon = EPSILON_APPROX);
    }
    for (point, truth) in model.scene.iter().zip(&rig.scene) {
        assert_relative_eq!(point.coords, c1 - truth, epsilon = EPSILON_APPROX);
    }
}

#[test]
fn single_correspondence_is_pure_translation() {
    let centers = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let point = Point3::new(2.0, 2.0, 5.0);
    let [a1, a2, a3] = centers.map(|c| vec![(point - c).normalize()]);

    for iterations in [1, 5] {
        let model = estimate_pose(&a1, &a2, &a3, iterations).unwrap();
        // The alignment of a single pair has no rotation, so the centers are azimuth differences
        // and the rays meet opposite the first azimuth with unit depth.
        assert_eq!(model.scene.len(), 1);
        assert_relative_eq!(model.scene[0].coords, -a1[0], epsilon = EPSILON_APPROX);
        assert_relative_eq!(model.centers[1].coords, a2[0] - a1[0], epsilon = EPSILON_APPROX);
        assert_relative_eq!(model.centers[2].coords, a3[0] - a1[0], epsilon = EPSILON_APPROX);
    }
}

#[test]
fn mismatched_lengths_fail_fast() {
    let azimuths = |n: usize| -> Vec<Vector3<f64>> {
        (0..n)
            .map(|i| Vector3::new(i as f64, 1.0, 2.0).normalize())
            .collect()
    };
    assert_eq!(
        estimate_pose(&azimuths(3), &azimuths(3), &azimuths(4), 10),
        Err(Error::ShapeMismatch {
            expected: 3,
            found: 4
        })
    );
}

#[test]
fn invalid_inputs() {
    let azimuths = [Vector3::x(), Vector3::y(), Vector3::z()];
    assert_eq!(
        estimate_pose(&azimuths, &azimuths, &azimuths, 0),
        Err(Error::InvalidIterationCount(0))
    );
    assert_eq!(estimate_pose(&[], &[], &[], 10), Err(Error::NoCorrespondences));
}
