//! Owned copies of game state for callers outside the game's lock.

use crate::{
    board::{Bounds, Coordinate},
    game::{GameId, GamePhase},
    player::Player,
    ships::{Vessel, VesselId},
};

/// A point-in-time copy of a whole game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSnapshot {
    /// ID of the game.
    pub id: GameId,
    /// Bounds of the battle space.
    pub bounds: Bounds,
    /// Phase at the time of the snapshot.
    pub phase: GamePhase,
    /// Winner, once the game is finished.
    pub winner: Option<String>,
    /// Players in join order, each with their vessels in placement order.
    pub players: Vec<Player>,
}

impl GameSnapshot {
    /// Get the player with the given name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name() == name)
    }

    /// Iterate every vessel in the game.
    pub fn vessels(&self) -> impl Iterator<Item = &Vessel> {
        self.players.iter().flat_map(|player| player.vessels())
    }

    /// Get the vessel with the given ID.
    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels().find(|vessel| vessel.id() == id)
    }

    /// Get the vessel at the given coordinate.
    pub fn vessel_at(&self, coord: &Coordinate) -> Option<&Vessel> {
        self.vessels().find(|vessel| vessel.occupies(coord))
    }
}
