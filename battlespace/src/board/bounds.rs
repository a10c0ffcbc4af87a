//! Implements the inclusive bounding box of a game.
use std::{fmt, ops::RangeInclusive};

#[cfg(feature = "rng_gen")]
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

use crate::board::{Coordinate, InvalidBoundsError};

/// One of the three axes of the battle space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in the order bounds are validated.
    pub const ALL: &'static [Axis] = &[Axis::X, Axis::Y, Axis::Z];

    /// Lower case name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Inclusive 3-D box that every vessel and every shot of a game must fall inside. Fixed
/// when the game is created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Bounds {
    /// Lowest valid value along each axis.
    min: Coordinate,
    /// Highest valid value along each axis.
    max: Coordinate,
}

impl Bounds {
    /// Create [`Bounds`] spanning from `min` to `max` inclusive. Returns an error naming
    /// the first axis (in `x`, `y`, `z` order) where the minimum exceeds the maximum.
    pub fn new(min: Coordinate, max: Coordinate) -> Result<Self, InvalidBoundsError> {
        for &axis in Axis::ALL {
            let (lo, hi) = (min.get(axis), max.get(axis));
            if lo > hi {
                return Err(InvalidBoundsError::new(axis, lo, hi));
            }
        }
        Ok(Self { min, max })
    }

    /// Create [`Bounds`] from the six per-axis limits, in the order callers usually
    /// receive them.
    pub fn from_limits(
        min_x: i64,
        max_x: i64,
        min_y: i64,
        max_y: i64,
        min_z: i64,
        max_z: i64,
    ) -> Result<Self, InvalidBoundsError> {
        Self::new(
            Coordinate::new(min_x, min_y, min_z),
            Coordinate::new(max_x, max_y, max_z),
        )
    }

    /// The corner with the lowest value on every axis.
    pub fn min(&self) -> &Coordinate {
        &self.min
    }

    /// The corner with the highest value on every axis.
    pub fn max(&self) -> &Coordinate {
        &self.max
    }

    /// Get the inclusive range of valid values along the given axis.
    pub fn range(&self, axis: Axis) -> RangeInclusive<i64> {
        self.min.get(axis)..=self.max.get(axis)
    }

    /// Valid values along `x`.
    pub fn x(&self) -> RangeInclusive<i64> {
        self.range(Axis::X)
    }

    /// Valid values along `y`.
    pub fn y(&self) -> RangeInclusive<i64> {
        self.range(Axis::Y)
    }

    /// Valid values along `z`.
    pub fn z(&self) -> RangeInclusive<i64> {
        self.range(Axis::Z)
    }

    /// Check if the given [`Coordinate`] lies inside these bounds on all three axes.
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.range(axis).contains(&coord.get(axis)))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x {}..={}, y {}..={}, z {}..={}",
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z
        )
    }
}

#[cfg(feature = "rng_gen")]
impl Distribution<Coordinate> for Bounds {
    /// Pick a uniformly random coordinate inside these bounds.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        Coordinate::new(
            Uniform::new_inclusive(self.min.x, self.max.x).sample(rng),
            Uniform::new_inclusive(self.min.y, self.max.y).sample(rng),
            Uniform::new_inclusive(self.min.z, self.max.z).sample(rng),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Bounds {
        Bounds::from_limits(0, 10, 0, 10, 0, 10).unwrap()
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let bounds = cube();
        assert!(bounds.contains(&Coordinate::new(0, 0, 0)));
        assert!(bounds.contains(&Coordinate::new(10, 10, 10)));
        assert!(bounds.contains(&Coordinate::new(0, 10, 5)));
    }

    #[test]
    fn contains_rejects_one_step_outside_each_axis() {
        let bounds = cube();
        assert!(!bounds.contains(&Coordinate::new(-1, 5, 5)));
        assert!(!bounds.contains(&Coordinate::new(11, 5, 5)));
        assert!(!bounds.contains(&Coordinate::new(5, -1, 5)));
        assert!(!bounds.contains(&Coordinate::new(5, 11, 5)));
        assert!(!bounds.contains(&Coordinate::new(5, 5, -1)));
        assert!(!bounds.contains(&Coordinate::new(5, 5, 11)));
    }

    #[test]
    fn single_cell_bounds() {
        let bounds = Bounds::from_limits(-3, -3, 7, 7, 0, 0).unwrap();
        assert!(bounds.contains(&Coordinate::new(-3, 7, 0)));
        assert!(!bounds.contains(&Coordinate::new(-2, 7, 0)));
    }

    #[test]
    fn inverted_limits_report_first_bad_axis() {
        let err = Bounds::from_limits(0, 1, 5, 4, 9, 2).unwrap_err();
        assert_eq!(err.axis(), Axis::Y);
        assert_eq!((err.min(), err.max()), (5, 4));

        let err = Bounds::from_limits(0, 1, 0, 1, 3, 2).unwrap_err();
        assert_eq!(err.axis(), Axis::Z);
    }

    #[test]
    fn ranges_follow_limits() {
        let bounds = Bounds::from_limits(-2, 2, 1, 3, 4, 8).unwrap();
        assert_eq!(bounds.x(), -2..=2);
        assert_eq!(bounds.y(), 1..=3);
        assert_eq!(bounds.z(), 4..=8);
        assert_eq!(bounds.to_string(), "x -2..=2, y 1..=3, z 4..=8");
    }

    #[cfg(feature = "rng_gen")]
    #[test]
    fn sampled_coordinates_are_in_bounds() {
        let bounds = Bounds::from_limits(-1, 1, 0, 0, 5, 6).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            assert!(bounds.contains(&bounds.sample(&mut rng)));
        }
    }
}
