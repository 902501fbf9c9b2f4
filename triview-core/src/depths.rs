use crate::{Error, Result};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The current depth estimate of every correspondence along each of the three viewpoint rays.
///
/// Depths scale the azimuths before they are aligned. A fresh record is produced by every
/// iteration of the estimation loop; nothing mutates an existing one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Depths {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub third: Vec<f64>,
}

impl Depths {
    /// Every depth set to `1.0`, the starting point of the estimation loop.
    pub fn ones(len: usize) -> Self {
        Self {
            first: vec![1.0; len],
            second: vec![1.0; len],
            third: vec![1.0; len],
        }
    }

    /// Builds depths from three sequences, which must be the same length.
    pub fn from_sequences(first: Vec<f64>, second: Vec<f64>, third: Vec<f64>) -> Result<Self> {
        let expected = first.len();
        if let Some(found) = [second.len(), third.len()]
            .into_iter()
            .find(|&len| len != expected)
        {
            return Err(Error::ShapeMismatch { expected, found });
        }
        Ok(Self {
            first,
            second,
            third,
        })
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// The depth sequence of viewpoint `0`, `1` or `2`.
    ///
    /// # Panics
    ///
    /// Panics if `viewpoint > 2`.
    pub fn viewpoint(&self, viewpoint: usize) -> &[f64] {
        match viewpoint {
            0 => &self.first,
            1 => &self.second,
            2 => &self.third,
            _ => panic!("there are only three viewpoints, got index {}", viewpoint),
        }
    }

    /// Iterates over the depth triples in correspondence order.
    pub fn iter(&self) -> impl Iterator<Item = [f64; 3]> + Clone + '_ {
        self.first
            .iter()
            .zip(&self.second)
            .zip(&self.third)
            .map(|((&a, &b), &c)| [a, b, c])
    }

    /// Checks that there is one depth triple per correspondence.
    pub fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                found: self.len(),
            });
        }
        Ok(())
    }

    /// Mean depth along each viewpoint, or `None` if there are no depths.
    pub fn means(&self) -> Option<[f64; 3]> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let mean = |s: &[f64]| s.iter().sum::<f64>() / n;
        Some([mean(&self.first), mean(&self.second), mean(&self.third)])
    }
}

impl FromIterator<[f64; 3]> for Depths {
    fn from_iter<I: IntoIterator<Item = [f64; 3]>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let capacity = iter.size_hint().0;
        let mut depths = Self {
            first: Vec::with_capacity(capacity),
            second: Vec::with_capacity(capacity),
            third: Vec::with_capacity(capacity),
        };
        for [a, b, c] in iter {
            depths.first.push(a);
            depths.second.push(b);
            depths.third.push(c);
        }
        depths
    }
}
