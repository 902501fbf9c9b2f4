use float_ord::FloatOrd;
use triview_core::nalgebra::{
    zero, IsometryMatrix3, Matrix3, Rotation3, Translation3, Vector3,
};

/// Finds the rigid transform that best maps one point set onto another.
///
/// This is the weighted Procrustes (Kabsch) method. Both sets are centered on their centroids and
/// the cross-correlation `H = sum (s - s̄)(t - t̄)^T` is decomposed as `U S V^T`. The rotation is
/// `V diag(1, 1, sign(det(V U^T))) U^T`, where the sign flip is applied to the direction of the
/// smallest singular value, so a reflection is never returned. The translation is
/// `t̄ - R s̄`.
///
/// Weighting is done by the caller, who scales each point by its weight before handing it over.
///
/// If the correlation is exactly zero, which is always the case for a single pair, there is no
/// rotational information at all. The identity rotation is returned with the translation
/// `t̄ - s̄`.
///
/// ```
/// use triview_core::nalgebra::{Rotation3, Vector3};
/// use triview_geom::RigidAligner;
///
/// let rotation = Rotation3::new(Vector3::new(0.2, -0.1, 0.4));
/// let translation = Vector3::new(1.0, 2.0, 3.0);
/// let source = [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(1.0, 1.0, 0.0)];
/// let pairs = source.iter().map(|&s| (s, rotation * s + translation));
/// let isometry = RigidAligner::new().align(pairs).unwrap();
/// assert!((isometry.rotation.matrix() - rotation.matrix()).norm() < 1e-9);
/// assert!((isometry.translation.vector - translation).norm() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct RigidAligner {
    epsilon: f64,
    max_iterations: usize,
    rank_tolerance: f64,
}

impl RigidAligner {
    /// Creates a `RigidAligner` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the epsilon used in the SVD solver.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Set the maximum number of iterations for the SVD solver.
    ///
    /// Default is `1000`.
    #[must_use]
    pub fn max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Set the relative size below which a singular value of the correlation counts as zero.
    ///
    /// A rotation is only determined when at most one singular value is zero.
    ///
    /// Default is `1e-9`.
    #[must_use]
    pub fn rank_tolerance(self, rank_tolerance: f64) -> Self {
        Self {
            rank_tolerance,
            ..self
        }
    }

    /// Aligns `(source, target)` pairs, returning the isometry taking sources onto targets.
    ///
    /// Returns `None` if there are no pairs, if the correlation does not determine a unique
    /// rotation (all centered points on one line), or if the SVD fails.
    pub fn align(
        &self,
        pairs: impl Iterator<Item = (Vector3<f64>, Vector3<f64>)> + Clone,
    ) -> Option<IsometryMatrix3<f64>> {
        let count = pairs.clone().count();
        if count == 0 {
            return None;
        }
        let n = count as f64;
        let (source_sum, target_sum) = pairs.clone().fold(
            (Vector3::<f64>::zeros(), Vector3::<f64>::zeros()),
            |(ss, ts), (s, t)| (ss + s, ts + t),
        );
        let source_centroid = source_sum / n;
        let target_centroid = target_sum / n;

        let correlation: Matrix3<f64> = pairs
            .map(|(s, t)| (s - source_centroid) * (t - target_centroid).transpose())
            .sum();

        let rotation = if correlation == zero::<Matrix3<f64>>() {
            Rotation3::identity()
        } else {
            self.rotation(correlation)?
        };

        let translation = target_centroid - rotation * source_centroid;
        Some(IsometryMatrix3::from_parts(
            Translation3::from(translation),
            rotation,
        ))
        .filter(|isometry| {
            isometry.rotation.matrix().iter().all(|n| n.is_finite())
                && isometry.translation.vector.iter().all(|n| n.is_finite())
        })
    }

    fn rotation(&self, correlation: Matrix3<f64>) -> Option<Rotation3<f64>> {
        let svd = correlation.try_svd(true, true, self.epsilon, self.max_iterations)?;
        let u = svd.u?;
        let mut v = svd.v_t?.transpose();

        let mut singular_values = [
            svd.singular_values[0],
            svd.singular_values[1],
            svd.singular_values[2],
        ];
        singular_values.sort_unstable_by_key(|&n| FloatOrd(n));
        if singular_values[1] <= singular_values[2] * self.rank_tolerance {
            return None;
        }

        // Flip the least significant direction if the raw solution is a reflection.
        if (v * u.transpose()).determinant() < 0.0 {
            let (smallest, _) = svd
                .singular_values
                .iter()
                .enumerate()
                .min_by_key(|&(_, &n)| FloatOrd(n))?;
            v.column_mut(smallest).neg_mut();
        }

        Some(Rotation3::from_matrix_unchecked(v * u.transpose()))
    }
}

impl Default for RigidAligner {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            max_iterations: 1000,
            rank_tolerance: 1e-9,
        }
    }
}
