use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A vector viewed through its skew-symmetric cross-product matrix.
///
/// `Skew3(v).hat() * x == v.cross(&x)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Skew3(pub Vector3<f64>);

impl Skew3 {
    /// This converts a matrix in skew-symmetric form into a Skew3.
    ///
    /// Warning: Does no check to ensure matrix is actually skew-symmetric.
    pub fn vee(mat: Matrix3<f64>) -> Self {
        Self(Vector3::new(mat.m32, mat.m13, mat.m21))
    }

    /// This converts the Skew3 into its skew-symmetric matrix form.
    pub fn hat(self) -> Matrix3<f64> {
        self.0.cross_matrix()
    }

    /// This converts the Skew3 into its squared skew-symmetric matrix form efficiently.
    #[rustfmt::skip]
    pub fn hat2(self) -> Matrix3<f64> {
        let w = self.0;
        let w11 = w.x * w.x;
        let w12 = w.x * w.y;
        let w13 = w.x * w.z;
        let w22 = w.y * w.y;
        let w23 = w.y * w.z;
        let w33 = w.z * w.z;
        Matrix3::new(
            -w22 - w33,     w12,           w13,
             w12,          -w11 - w33,     w23,
             w13,           w23,          -w11 - w22,
        )
    }
}

/// The smallest rotation taking the direction `from` onto the direction `to`.
///
/// Uses Rodrigues' formula written with the cross product `v = from x to` and the dot product
/// `c = from . to` of the two unit vectors:
///
/// `R = I + hat(v) + hat(v)^2 / (1 + c)`
///
/// Returns `None` when `1 + c <= tolerance`, where the two directions are (nearly) opposite and
/// every half turn about a perpendicular axis is an equally valid answer.
///
/// ```
/// use triview_core::{align_directions, nalgebra::{Unit, Vector3}};
///
/// let from = Unit::new_normalize(Vector3::new(1.0, 1.0, 0.0));
/// let to = Unit::new_normalize(Vector3::new(0.0, 0.0, 2.0));
/// let rotation = align_directions(from, to, 1e-9).unwrap();
/// assert!((rotation * from.into_inner() - to.into_inner()).norm() < 1e-12);
/// ```
pub fn align_directions(
    from: Unit<Vector3<f64>>,
    to: Unit<Vector3<f64>>,
    tolerance: f64,
) -> Option<Rotation3<f64>> {
    let c = from.dot(&to);
    if 1.0 + c <= tolerance {
        return None;
    }
    let v = Skew3(from.cross(&to));
    let matrix = Matrix3::identity() + v.hat() + v.hat2() / (1.0 + c);
    Some(Rotation3::from_matrix_unchecked(matrix))
}

/// A half turn about some axis perpendicular to `direction`, which maps it onto its opposite.
///
/// The axis is found by crossing `direction` with the coordinate axis it is least aligned with.
pub fn half_turn_perpendicular(direction: Unit<Vector3<f64>>) -> Rotation3<f64> {
    let least_aligned = direction.iamin();
    let axis = Unit::new_normalize(direction.cross(&Vector3::ith(least_aligned, 1.0)));
    let matrix = 2.0 * axis.into_inner() * axis.transpose() - Matrix3::identity();
    Rotation3::from_matrix_unchecked(matrix)
}
