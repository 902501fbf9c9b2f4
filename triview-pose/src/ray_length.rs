use triview_core::{
    nalgebra::Vector3, Correspondences, Depths, Error, PairwiseTransforms, Result,
    ViewpointCenters,
};
use triview_geom::{Ray, RayIntersector};

/// Re-estimates the depth of every correspondence along each viewpoint ray.
///
/// The three rays of a correspondence leave the viewpoint centers along its azimuths rotated into
/// the common frame. Their intersection is projected back onto each ray and the distance of that
/// projection from the ray origin is the new depth. Depths are distances, so they are never
/// negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct RayLengthEstimator {
    pub intersector: RayIntersector,
}

impl RayLengthEstimator {
    pub fn new(intersector: RayIntersector) -> Self {
        Self { intersector }
    }

    /// Fails with [`Error::SingularIntersection`] naming the first correspondence whose rays do not
    /// meet in a unique point.
    pub fn estimate(
        &self,
        correspondences: &Correspondences<'_>,
        transforms: &PairwiseTransforms,
    ) -> Result<Depths> {
        let centers = transforms.centers();
        correspondences
            .iter()
            .enumerate()
            .map(|(index, azimuths)| {
                let rays = correspondence_rays(&centers, transforms, azimuths);
                let point = self
                    .intersector
                    .intersect(rays.into_iter())
                    .ok_or(Error::SingularIntersection { index })?;
                Ok(rays.map(|ray| ray.distance_along(point)))
            })
            .collect()
    }
}

/// The three rays of one correspondence in the common frame.
pub(crate) fn correspondence_rays(
    centers: &ViewpointCenters,
    transforms: &PairwiseTransforms,
    azimuths: [Vector3<f64>; 3],
) -> [Ray; 3] {
    let [first, second, third] = transforms.to_common_frame(azimuths);
    [
        Ray::new(centers.first, first),
        Ray::new(centers.second, second),
        Ray::new(centers.third, third),
    ]
}
