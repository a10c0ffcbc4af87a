//! Defines the sparse occupancy grid shared by all players in a game.

use std::{borrow::Borrow, collections::HashMap};

use crate::{
    board::{Bounds, Coordinate},
    ships::VesselId,
};

/// A single occupied cell in the grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct GridCell {
    /// Name of the player who owns the vessel in this cell.
    pub(crate) owner: String,

    /// The ID of the vessel that occupies this cell.
    pub(crate) vessel: VesselId,
}

/// Occupancy index for a game. Only occupied cells are stored, so the memory used is
/// proportional to the number of vessels rather than the volume of the bounds.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    /// Bounds of the battle space.
    pub(crate) bounds: Bounds,
    /// Occupied cells, keyed by coordinate.
    cells: HashMap<Coordinate, GridCell>,
}

impl Grid {
    pub(crate) fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: HashMap::new(),
        }
    }

    /// Get a reference to the cell at the given [`Coordinate`], if it is occupied.
    pub(crate) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&GridCell> {
        self.cells.get(coord.borrow())
    }

    /// Returns true if any vessel occupies the given [`Coordinate`].
    pub(crate) fn is_occupied<B: Borrow<Coordinate>>(&self, coord: B) -> bool {
        self.cells.contains_key(coord.borrow())
    }

    /// Record that the given vessel occupies `coord`. The caller must already have
    /// checked that the coordinate is in bounds and unoccupied.
    pub(crate) fn occupy(&mut self, coord: Coordinate, owner: &str, vessel: VesselId) {
        debug_assert!(self.bounds.contains(&coord));
        let previous = self.cells.insert(
            coord,
            GridCell {
                owner: owner.to_owned(),
                vessel,
            },
        );
        debug_assert!(previous.is_none(), "{} was already occupied", coord);
    }
}
