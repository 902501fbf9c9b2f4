use triview_core::{
    align_directions, half_turn_perpendicular,
    nalgebra::{Point3, Rotation3, Unit, Vector3},
    AntiparallelPolicy, Error, Result,
};

/// A uniform scale followed by a rotation and a translation.
///
/// `x -> translation + scale * rotation * x`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Similarity {
    pub scale: f64,
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
}

impl Similarity {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            rotation: Rotation3::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.translation + self.scale * (self.rotation * point.coords))
    }
}

/// Registers one baseline onto another with a [`Similarity`].
///
/// Given the target baseline `(a, b)` and the source baseline `(a', b')`:
///
/// - the scale is `|b - a| / |b' - a'|`
/// - the rotation is the smallest one taking the direction of `b' - a'` onto that of `b - a`
/// - the translation is `a - a'`
///
/// The translation is not rotated or scaled, so `a'` lands on `a` only when `a'` is the
/// origin of its frame. That is always the case for the first center of an estimated model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BaselineRegistrar {
    antiparallel_tolerance: f64,
    policy: AntiparallelPolicy,
}

impl BaselineRegistrar {
    /// Creates a `BaselineRegistrar` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set how close to `-1` the cosine between the baselines may get before they are considered
    /// antiparallel.
    ///
    /// Default is `1e-9`.
    #[must_use]
    pub fn antiparallel_tolerance(self, antiparallel_tolerance: f64) -> Self {
        Self {
            antiparallel_tolerance,
            ..self
        }
    }

    /// Set what happens with antiparallel baselines.
    ///
    /// Default is [`AntiparallelPolicy::Reject`].
    #[must_use]
    pub fn policy(self, policy: AntiparallelPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Finds the similarity mapping the `source` baseline onto the `target` baseline.
    ///
    /// Fails with [`Error::DegenerateBaseline`] if either baseline has no length and with
    /// [`Error::AntiparallelBaseline`] if the baselines are opposite and the policy rejects them.
    pub fn register(
        &self,
        target: [Point3<f64>; 2],
        source: [Point3<f64>; 2],
    ) -> Result<Similarity> {
        let [a, b] = target;
        let [a_src, b_src] = source;
        let target_span = b - a;
        let source_span = b_src - a_src;

        let scale = target_span.norm() / source_span.norm();
        if !scale.is_finite() || scale == 0.0 {
            return Err(Error::DegenerateBaseline);
        }
        let target_dir = Unit::try_new(target_span, 0.0).ok_or(Error::DegenerateBaseline)?;
        let source_dir = Unit::try_new(source_span, 0.0).ok_or(Error::DegenerateBaseline)?;

        let rotation = match align_directions(source_dir, target_dir, self.antiparallel_tolerance)
        {
            Some(rotation) => rotation,
            None => match self.policy {
                AntiparallelPolicy::Reject => return Err(Error::AntiparallelBaseline),
                AntiparallelPolicy::HalfTurn => half_turn_perpendicular(target_dir),
            },
        };

        Ok(Similarity {
            scale,
            rotation,
            translation: a - a_src,
        })
    }
}

impl Default for BaselineRegistrar {
    fn default() -> Self {
        Self {
            antiparallel_tolerance: 1e-9,
            policy: AntiparallelPolicy::Reject,
        }
    }
}
