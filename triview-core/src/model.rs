use crate::ViewpointCenters;
use nalgebra::Point3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A reconstruction: scene points plus the viewpoint centers they were seen from.
///
/// A freshly estimated model has one scene point per correspondence and exactly three centers.
/// Fused models keep growing, gaining the scene points of every fused model and one center per
/// fusion step. Models are never mutated by the algorithms that consume them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Model {
    pub scene: Vec<Point3<f64>>,
    pub centers: Vec<Point3<f64>>,
}

impl Model {
    pub fn new(scene: Vec<Point3<f64>>, centers: ViewpointCenters) -> Self {
        Self {
            scene,
            centers: centers.into(),
        }
    }

    /// The last two centers, which a following model has to share to be fused onto this one.
    pub fn trailing_baseline(&self) -> Option<[Point3<f64>; 2]> {
        match self.centers.as_slice() {
            [.., a, b] => Some([*a, *b]),
            _ => None,
        }
    }

    /// The first two centers, shared with the model this one is fused onto.
    pub fn leading_baseline(&self) -> Option<[Point3<f64>; 2]> {
        match self.centers.as_slice() {
            [a, b, ..] => Some([*a, *b]),
            _ => None,
        }
    }
}
