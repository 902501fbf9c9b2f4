use triview_core::{Error, Model, Result, Settings};
use triview_geom::BaselineRegistrar;

/// Stitches independently estimated models into one frame.
///
/// Fusing `b` onto `a` requires the last two centers of `a` and the first two centers of `b` to be
/// the same two physical viewpoints. Nothing checks this; it is up to the caller to order the
/// models so that it holds. The similarity registering the shared baseline of `b` onto that of `a`
/// maps every scene point of `b` and the third center of `b` into the frame of `a`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Fusion {
    pub registrar: BaselineRegistrar,
}

impl Fusion {
    pub fn new(registrar: BaselineRegistrar) -> Self {
        Self { registrar }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            BaselineRegistrar::new()
                .antiparallel_tolerance(settings.antiparallel_tolerance)
                .policy(settings.antiparallel_policy),
        )
    }

    /// Fuses `b` onto `a`.
    ///
    /// The result holds all of the scene points of `a` followed by the mapped scene points of `b`,
    /// with no deduplication. Its centers are those of `a` plus the mapped third center of `b`.
    pub fn fuse(&self, a: &Model, b: &Model) -> Result<Model> {
        let target = a.trailing_baseline().ok_or(Error::InsufficientCenters {
            needed: 2,
            found: a.centers.len(),
        })?;
        let (source, extra) = match b.centers.as_slice() {
            [first, second, third, ..] => ([*first, *second], *third),
            _ => {
                return Err(Error::InsufficientCenters {
                    needed: 3,
                    found: b.centers.len(),
                })
            }
        };

        let similarity = self.registrar.register(target, source)?;
        log::trace!(
            "fusing {} points with scale {} rotation {} translation {}",
            b.scene.len(),
            similarity.scale,
            similarity.rotation.scaled_axis(),
            similarity.translation
        );

        let scene = a
            .scene
            .iter()
            .copied()
            .chain(b.scene.iter().map(|point| similarity.transform_point(point)))
            .collect();
        let mut centers = a.centers.clone();
        centers.push(similarity.transform_point(&extra));
        Ok(Model { scene, centers })
    }

    /// Left folds [`Fusion::fuse`] over `models`.
    ///
    /// A single model is returned as is. An error while fusing `models[i]` is reported as
    /// [`Error::FusionStep`] with `step` set to `i`.
    pub fn fuse_chain(&self, models: &[Model]) -> Result<Model> {
        let (first, rest) = models.split_first().ok_or(Error::EmptyChain)?;
        let fused = rest
            .iter()
            .enumerate()
            .try_fold(first.clone(), |fused, (ix, model)| {
                self.fuse(&fused, model).map_err(|e| Error::FusionStep {
                    step: ix + 1,
                    source: Box::new(e),
                })
            })?;
        log::info!(
            "fused {} models into {} points and {} centers",
            models.len(),
            fused.scene.len(),
            fused.centers.len()
        );
        Ok(fused)
    }
}
