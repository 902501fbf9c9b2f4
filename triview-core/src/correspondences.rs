use crate::{Error, Result};
use nalgebra::Vector3;

/// Three aligned azimuth sequences, one per viewpoint.
///
/// The `i`-th entry of each sequence is the direction in which the corresponding viewpoint sees
/// the same physical point, expressed in that viewpoint's local frame. Azimuths are expected to
/// be unit length, though nothing here enforces it.
///
/// Construction guarantees the three sequences have the same non-zero length, so every consumer
/// can index them together.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Correspondences<'a> {
    first: &'a [Vector3<f64>],
    second: &'a [Vector3<f64>],
    third: &'a [Vector3<f64>],
}

impl<'a> Correspondences<'a> {
    /// Wraps three azimuth sequences after checking that they line up.
    ///
    /// The first sequence sets the expected length. Returns [`Error::NoCorrespondences`] when it is
    /// empty and [`Error::ShapeMismatch`] when either of the others differs from it.
    pub fn new(
        first: &'a [Vector3<f64>],
        second: &'a [Vector3<f64>],
        third: &'a [Vector3<f64>],
    ) -> Result<Self> {
        let expected = first.len();
        if let Some(found) = [second.len(), third.len()]
            .into_iter()
            .find(|&len| len != expected)
        {
            return Err(Error::ShapeMismatch { expected, found });
        }
        if expected == 0 {
            return Err(Error::NoCorrespondences);
        }
        Ok(Self {
            first,
            second,
            third,
        })
    }

    /// The number of correspondences, which is never zero.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Always `false`, kept so the type reads like a collection.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The azimuth sequence of viewpoint `0`, `1` or `2`.
    ///
    /// # Panics
    ///
    /// Panics if `viewpoint > 2`.
    pub fn viewpoint(&self, viewpoint: usize) -> &'a [Vector3<f64>] {
        match viewpoint {
            0 => self.first,
            1 => self.second,
            2 => self.third,
            _ => panic!("there are only three viewpoints, got index {}", viewpoint),
        }
    }

    /// The three azimuths of one correspondence.
    pub fn get(&self, index: usize) -> Option<[Vector3<f64>; 3]> {
        Some([
            *self.first.get(index)?,
            *self.second.get(index)?,
            *self.third.get(index)?,
        ])
    }

    /// Iterates over the azimuth triples in correspondence order.
    pub fn iter(&self) -> impl Iterator<Item = [Vector3<f64>; 3]> + Clone + 'a {
        self.first
            .iter()
            .zip(self.second)
            .zip(self.third)
            .map(|((&a, &b), &c)| [a, b, c])
    }
}
