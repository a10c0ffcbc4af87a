use std::fmt;

use crate::board::Axis;

/// The coordinates of a single cell in the battle space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coordinate {
    /// Position along the `x` axis.
    pub x: i64,
    /// Position along the `y` axis.
    pub y: i64,
    /// Position along the `z` axis.
    pub z: i64,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x`, `y`, and `z`.
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Get the component of this coordinate along the given axis.
    pub fn get(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl From<(i64, i64, i64)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y, z)` triple.
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Coordinate> for (i64, i64, i64) {
    /// Convert the [`Coordinate`] into an `(x, y, z)` triple.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y, coord.z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
