use crate::ViewpointPair;
use core::ops::Index;
use nalgebra::{IsometryMatrix3, Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The rigid transforms aligning each ordered viewpoint pair.
///
/// Each transform maps depth-scaled azimuths of its source viewpoint onto those of its target
/// viewpoint, so `one_two` takes viewpoint 1 onto viewpoint 2 and so on around the cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PairwiseTransforms {
    pub one_two: IsometryMatrix3<f64>,
    pub two_three: IsometryMatrix3<f64>,
    pub three_one: IsometryMatrix3<f64>,
}

impl PairwiseTransforms {
    /// Builds the transforms from an array in [`ViewpointPair::ALL`] order.
    pub fn from_pairs([one_two, two_three, three_one]: [IsometryMatrix3<f64>; 3]) -> Self {
        Self {
            one_two,
            two_three,
            three_one,
        }
    }

    /// All three transforms set to identity.
    pub fn identity() -> Self {
        Self::from_pairs([IsometryMatrix3::identity(); 3])
    }

    /// The viewpoint centers in the frame of viewpoint 1.
    ///
    /// Viewpoint 1 is the origin. The others are reached by walking the chain:
    ///
    /// - `c2 = c1 + T12`
    /// - `c3 = c2 + R12 * T23`
    ///
    /// `T31` takes no part; the chain fixes the frame of the reconstruction.
    pub fn centers(&self) -> ViewpointCenters {
        let first = Point3::origin();
        let second = first + self.one_two.translation.vector;
        let third = second + self.one_two.rotation * self.two_three.translation.vector;
        ViewpointCenters {
            first,
            second,
            third,
        }
    }

    /// Rotates the azimuths of one correspondence into the common frame of the centers.
    ///
    /// The first azimuth is left alone. The third is taken back through `R31`. The second has to
    /// go through viewpoint 3 first, so it is taken back through `R23` and then `R31`.
    pub fn to_common_frame(&self, [first, second, third]: [Vector3<f64>; 3]) -> [Vector3<f64>; 3] {
        let r23 = &self.two_three.rotation;
        let r31 = &self.three_one.rotation;
        [
            first,
            r31.inverse_transform_vector(&r23.inverse_transform_vector(&second)),
            r31.inverse_transform_vector(&third),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewpointPair, &IsometryMatrix3<f64>)> + '_ {
        ViewpointPair::ALL.into_iter().map(move |pair| (pair, &self[pair]))
    }
}

impl Index<ViewpointPair> for PairwiseTransforms {
    type Output = IsometryMatrix3<f64>;

    fn index(&self, pair: ViewpointPair) -> &Self::Output {
        match pair {
            ViewpointPair::OneTwo => &self.one_two,
            ViewpointPair::TwoThree => &self.two_three,
            ViewpointPair::ThreeOne => &self.three_one,
        }
    }
}

/// The three viewpoint centers of one reconstruction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ViewpointCenters {
    pub first: Point3<f64>,
    pub second: Point3<f64>,
    pub third: Point3<f64>,
}

impl ViewpointCenters {
    pub fn to_array(self) -> [Point3<f64>; 3] {
        [self.first, self.second, self.third]
    }
}

impl From<ViewpointCenters> for Vec<Point3<f64>> {
    fn from(centers: ViewpointCenters) -> Self {
        centers.to_array().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Translation3};

    fn isometry(translation: Vector3<f64>, axisangle: Vector3<f64>) -> IsometryMatrix3<f64> {
        IsometryMatrix3::from_parts(
            Translation3::from(translation),
            Rotation3::new(axisangle),
        )
    }

    #[test]
    fn centers_follow_chain() {
        let transforms = PairwiseTransforms::from_pairs([
            isometry(
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, core::f64::consts::FRAC_PI_2),
            ),
            isometry(Vector3::new(2.0, 0.0, 0.0), Vector3::zeros()),
            isometry(Vector3::new(9.0, 9.0, 9.0), Vector3::new(0.3, 0.0, 0.0)),
        ]);
        let centers = transforms.centers();
        assert_eq!(centers.first, Point3::origin());
        assert_relative_eq!(centers.second, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(centers.third, Point3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn common_frame_undoes_rotations() {
        let r23 = Rotation3::new(Vector3::new(0.1, -0.4, 0.2));
        let r31 = Rotation3::new(Vector3::new(-0.3, 0.2, 0.5));
        let transforms = PairwiseTransforms::from_pairs([
            IsometryMatrix3::identity(),
            IsometryMatrix3::from_parts(Translation3::identity(), r23),
            IsometryMatrix3::from_parts(Translation3::identity(), r31),
        ]);
        let direction = Vector3::new(0.0, 0.6, 0.8);
        let [a, b, c] =
            transforms.to_common_frame([direction, r23 * (r31 * direction), r31 * direction]);
        assert_eq!(a, direction);
        assert_relative_eq!(b, direction, epsilon = 1e-12);
        assert_relative_eq!(c, direction, epsilon = 1e-12);
    }

    #[test]
    fn index_matches_fields() {
        let transforms = PairwiseTransforms::from_pairs([
            isometry(Vector3::x(), Vector3::zeros()),
            isometry(Vector3::y(), Vector3::zeros()),
            isometry(Vector3::z(), Vector3::zeros()),
        ]);
        let translations: Vec<Vector3<f64>> = transforms
            .iter()
            .map(|(_, iso)| iso.translation.vector)
            .collect();
        assert_eq!(translations, [Vector3::x(), Vector3::y(), Vector3::z()]);
        assert_eq!(
            transforms[ViewpointPair::TwoThree].translation.vector,
            Vector3::y()
        );
    }
}
