use core::fmt;
use thiserror::Error;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// One of the three ordered viewpoint pairs that are aligned against each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ViewpointPair {
    /// Viewpoint 1 aligned onto viewpoint 2.
    OneTwo,
    /// Viewpoint 2 aligned onto viewpoint 3.
    TwoThree,
    /// Viewpoint 3 aligned onto viewpoint 1.
    ThreeOne,
}

impl ViewpointPair {
    /// All pairs in the order they are estimated.
    pub const ALL: [ViewpointPair; 3] = [Self::OneTwo, Self::TwoThree, Self::ThreeOne];

    /// The zero-based `(source, target)` viewpoint indices of this pair.
    pub fn viewpoints(self) -> (usize, usize) {
        match self {
            Self::OneTwo => (0, 1),
            Self::TwoThree => (1, 2),
            Self::ThreeOne => (2, 0),
        }
    }
}

impl fmt::Display for ViewpointPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (source, target) = self.viewpoints();
        write!(f, "{}->{}", source + 1, target + 1)
    }
}

/// Every way an estimation or fusion call can fail.
///
/// Failures are never recovered internally. Any of these aborts the whole call and no partial
/// result is returned.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("sequence length mismatch: expected {expected} entries, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("at least one correspondence is required")]
    NoCorrespondences,
    #[error("iteration count must be at least 1, got {0}")]
    InvalidIterationCount(usize),
    #[error("rank deficient correlation while aligning viewpoints {pair}")]
    DegenerateAlignment { pair: ViewpointPair },
    #[error("rays of correspondence {index} do not have a unique intersection")]
    SingularIntersection { index: usize },
    #[error("fused baselines point in opposite directions")]
    AntiparallelBaseline,
    #[error("fused baseline has zero length")]
    DegenerateBaseline,
    #[error("model has {found} viewpoint centers but fusion needs at least {needed}")]
    InsufficientCenters { needed: usize, found: usize },
    #[error("cannot fuse an empty list of models")]
    EmptyChain,
    #[error("fusing model {step} failed")]
    FusionStep {
        step: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
