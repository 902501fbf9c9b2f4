use crate::ray_length::correspondence_rays;
use triview_core::{Correspondences, Error, Model, PairwiseTransforms, Result};
use triview_geom::RayIntersector;

/// Triangulates the final scene from the pairwise transforms alone.
///
/// Every correspondence is intersected once more with the same rays the depth update uses. The
/// depths themselves play no part.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct SceneBuilder {
    pub intersector: RayIntersector,
}

impl SceneBuilder {
    pub fn new(intersector: RayIntersector) -> Self {
        Self { intersector }
    }

    pub fn build(
        &self,
        correspondences: &Correspondences<'_>,
        transforms: &PairwiseTransforms,
    ) -> Result<Model> {
        let centers = transforms.centers();
        let scene = correspondences
            .iter()
            .enumerate()
            .map(|(index, azimuths)| {
                let rays = correspondence_rays(&centers, transforms, azimuths);
                self.intersector
                    .intersect(rays.into_iter())
                    .ok_or(Error::SingularIntersection { index })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Model::new(scene, centers))
    }
}
