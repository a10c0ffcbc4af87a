//! Types that make up the battle space: coordinates, the bounding box that every
//! placement and shot must fall inside, and the occupancy grid shared by all players of
//! a game.

pub(crate) use self::grid::Grid;
pub use self::{
    bounds::{Axis, Bounds},
    coordinate::Coordinate,
    errors::InvalidBoundsError,
};

mod bounds;
mod coordinate;
mod errors;
mod grid;
