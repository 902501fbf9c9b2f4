use float_ord::FloatOrd;
use triview_core::nalgebra::{zero, Matrix3, Point3, Vector3};

/// A half line leaving `origin` along `direction`.
///
/// The direction does not need to be normalized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// The orthogonal projection of `point` onto the line of this ray.
    pub fn project(&self, point: Point3<f64>) -> Point3<f64> {
        let d = self.direction;
        self.origin + d * ((point - self.origin).dot(&d) / d.dot(&d))
    }

    /// How far from the origin the projection of `point` lies.
    ///
    /// This is unsigned, so a point behind the origin yields the same value as its mirror image in
    /// front of it.
    pub fn distance_along(&self, point: Point3<f64>) -> f64 {
        (self.project(point) - self.origin).norm()
    }

    /// The perpendicular distance from `point` to the line of this ray.
    pub fn distance_to(&self, point: Point3<f64>) -> f64 {
        (point - self.project(point)).norm()
    }
}

/// Finds the point closest to a set of lines in the least-squares sense.
///
/// Each line contributes the projector onto the orthogonal complement of its direction,
/// `V = I - d d^T` (with `d` normalized). The point minimizing the summed squared perpendicular
/// distances solves `(sum V) x = sum V p` where `p` is the line origin.
///
/// `sum V` is decomposed with a symmetric eigen solver. If its smallest eigenvalue is not
/// sufficiently larger than zero relative to the largest one, the lines are (nearly) parallel
/// and there is no unique point, so no point is returned instead of some arbitrary one.
///
/// ```
/// use triview_core::nalgebra::{Point3, Vector3};
/// use triview_geom::{Ray, RayIntersector};
///
/// let point = Point3::new(0.5, -1.0, 4.0);
/// let origins = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)];
/// let rays = origins.iter().map(|&o| Ray::new(o, point - o));
/// let intersection = RayIntersector::new().intersect(rays).unwrap();
/// assert!((intersection - point).norm() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct RayIntersector {
    epsilon: f64,
    max_iterations: usize,
    conditioning: f64,
}

impl RayIntersector {
    /// Creates a `RayIntersector` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the epsilon used in the symmetric eigen solver.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Set the maximum number of iterations for the symmetric eigen solver.
    ///
    /// Default is `1000`.
    #[must_use]
    pub fn max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Set the smallest allowed ratio between the smallest and largest eigenvalue of the
    /// normal equations.
    ///
    /// Default is `1e-10`.
    #[must_use]
    pub fn conditioning(self, conditioning: f64) -> Self {
        Self {
            conditioning,
            ..self
        }
    }

    /// Intersects the rays.
    ///
    /// Returns `None` when a ray has a zero direction, when the rays do not pin down a single
    /// point (fewer than two non-parallel rays), or when the result is not finite.
    pub fn intersect(&self, rays: impl Iterator<Item = Ray>) -> Option<Point3<f64>> {
        let mut a: Matrix3<f64> = zero();
        let mut b: Vector3<f64> = zero();
        for ray in rays {
            let d = ray.direction.try_normalize(0.0)?;
            let v = Matrix3::identity() - d * d.transpose();
            b += v * ray.origin.coords;
            a += v;
        }

        let se = a.try_symmetric_eigen(self.epsilon, self.max_iterations)?;
        let smallest = se.eigenvalues.iter().copied().min_by_key(|&n| FloatOrd(n))?;
        let largest = se.eigenvalues.iter().copied().max_by_key(|&n| FloatOrd(n))?;
        if smallest <= largest * self.conditioning {
            return None;
        }

        let inverse = se.eigenvectors
            * Matrix3::from_diagonal(&se.eigenvalues.map(|n| n.recip()))
            * se.eigenvectors.transpose();
        Some(Point3::from(inverse * b)).filter(|point| point.iter().all(|n| n.is_finite()))
    }
}

impl Default for RayIntersector {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            max_iterations: 1000,
            conditioning: 1e-10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projection_onto_ray() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 2.0));
        let point = Point3::new(4.0, 0.0, 3.0);
        assert_relative_eq!(ray.project(point), Point3::new(1.0, 0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(ray.distance_along(point), 3.0, epsilon = 1e-12);
        assert_relative_eq!(ray.distance_to(point), 3.0, epsilon = 1e-12);
        // Behind the origin, the distance is still positive.
        let behind = Point3::new(1.0, 0.0, -2.0);
        assert_relative_eq!(ray.distance_along(behind), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_rays_are_singular() {
        let d = Vector3::new(0.0, 1.0, 1.0);
        let rays = [
            Ray::new(Point3::origin(), d),
            Ray::new(Point3::new(1.0, 0.0, 0.0), d * 3.0),
            Ray::new(Point3::new(0.0, 5.0, 0.0), -d),
        ];
        assert!(RayIntersector::new().intersect(rays.into_iter()).is_none());
    }

    #[test]
    fn single_ray_is_singular() {
        let ray = Ray::new(Point3::origin(), Vector3::x());
        assert!(RayIntersector::new()
            .intersect(core::iter::once(ray))
            .is_none());
    }

    #[test]
    fn zero_direction_is_rejected() {
        let rays = [
            Ray::new(Point3::origin(), Vector3::x()),
            Ray::new(Point3::origin(), Vector3::y()),
            Ray::new(Point3::origin(), Vector3::zeros()),
        ];
        assert!(RayIntersector::new().intersect(rays.into_iter()).is_none());
    }

    #[test]
    fn skew_lines_meet_in_the_middle() {
        // Two skew lines whose closest points are (0, 0, -1) and (0, 0, 1).
        let rays = [
            Ray::new(Point3::new(0.0, 0.0, -1.0), Vector3::x()),
            Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::y()),
        ];
        let point = RayIntersector::new().intersect(rays.into_iter()).unwrap();
        assert_relative_eq!(point, Point3::origin(), epsilon = 1e-12);
    }
}
