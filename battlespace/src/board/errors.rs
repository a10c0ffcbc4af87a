//! Errors used when constructing [`Bounds`][crate::board::Bounds].

use thiserror::Error;

use crate::board::Axis;

/// Error returned when a bounding box has a minimum greater than its maximum.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("invalid bounds along {axis}: min {min} is greater than max {max}")]
pub struct InvalidBoundsError {
    /// First axis found with inverted limits.
    axis: Axis,
    /// The requested minimum along `axis`.
    min: i64,
    /// The requested maximum along `axis`.
    max: i64,
}

impl InvalidBoundsError {
    pub(super) fn new(axis: Axis, min: i64, max: i64) -> Self {
        Self { axis, min, max }
    }

    /// The axis whose limits were inverted.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The requested minimum along [`axis`](Self::axis).
    pub fn min(&self) -> i64 {
        self.min
    }

    /// The requested maximum along [`axis`](Self::axis).
    pub fn max(&self) -> i64 {
        self.max
    }
}
