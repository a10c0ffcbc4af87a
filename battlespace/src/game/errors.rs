//! Errors returned by the operations of a [`Game`][crate::game::Game].

use thiserror::Error;

use crate::{board::Coordinate, ships::VesselId};

/// Reason why a player could not join a game.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotJoinReason {
    /// A player with the same name already joined.
    #[error("a player with that name already joined")]
    DuplicatePlayer,
    /// The game already holds the maximum number of players.
    #[error("the game is full")]
    GameFull,
}

/// Error returned when trying to join a game.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("player {player:?} could not join: {reason}")]
pub struct JoinError {
    reason: CannotJoinReason,
    player: String,
}

impl JoinError {
    pub(super) fn new(reason: CannotJoinReason, player: String) -> Self {
        Self { reason, player }
    }

    /// Get the reason joining was refused.
    pub fn reason(&self) -> CannotJoinReason {
        self.reason
    }

    /// The name that was refused.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Extract the refused name from this error.
    pub fn into_player(self) -> String {
        self.player
    }
}

/// Reason why a vessel could not be placed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The game is already over.
    #[error("the game is already finished")]
    GameFinished,
    /// The named player has not joined the game.
    #[error("the player has not joined the game")]
    UnknownPlayer,
    /// The coordinate is outside the game's bounds.
    #[error("the coordinate is out of bounds")]
    OutOfBounds,
    /// Another vessel already sits at the coordinate.
    #[error("the cell is already occupied")]
    CellOccupied,
    /// The vessel type is unknown or not accepted by this game.
    #[error("the vessel type is not allowed in this game")]
    InvalidVesselType,
}

/// Error caused when attempting to place a vessel.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("could not place {vessel_type} for {player:?} at {coord}: {reason}")]
pub struct PlaceError {
    reason: CannotPlaceReason,
    player: String,
    vessel_type: String,
    coord: Coordinate,
}

impl PlaceError {
    pub(super) fn new(
        reason: CannotPlaceReason,
        player: &str,
        vessel_type: &str,
        coord: Coordinate,
    ) -> Self {
        Self {
            reason,
            player: player.to_owned(),
            vessel_type: vessel_type.to_owned(),
            coord,
        }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Name of the player who tried to place the vessel.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// The vessel type as it was requested. May not name a real vessel type.
    pub fn vessel_type(&self) -> &str {
        &self.vessel_type
    }

    /// Coordinate where placement was attempted.
    pub fn coord(&self) -> &Coordinate {
        &self.coord
    }
}

/// Reason why a shot could not be fired.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The shooter has not joined the game.
    #[error("the shooter has not joined the game")]
    UnknownPlayer,
    /// The game is still waiting for players or is already finished.
    #[error("the game is not in progress")]
    GameNotInProgress,
    /// The coordinate is outside the game's bounds.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,
    /// The vessel at the coordinate is not the vessel that was named.
    #[error("the vessel at the target does not match the requested vessel")]
    InvalidTarget,
    /// The vessel at the coordinate belongs to the shooter.
    #[error("players may not shoot their own vessels")]
    SelfTargeting,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{shooter:?} could not shoot vessel {vessel} at {coord}: {reason}")]
pub struct ShotError {
    reason: CannotShootReason,
    shooter: String,
    vessel: VesselId,
    coord: Coordinate,
}

impl ShotError {
    pub(super) fn new(
        reason: CannotShootReason,
        shooter: &str,
        vessel: VesselId,
        coord: Coordinate,
    ) -> Self {
        Self {
            reason,
            shooter: shooter.to_owned(),
            vessel,
            coord,
        }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Name of the player who fired.
    pub fn shooter(&self) -> &str {
        &self.shooter
    }

    /// The vessel the shot was aimed at.
    pub fn vessel(&self) -> VesselId {
        self.vessel
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> &Coordinate {
        &self.coord
    }
}

/// Error returned when a player name is not part of a game.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("player {player:?} has not joined the game")]
pub struct UnknownPlayerError {
    player: String,
}

impl UnknownPlayerError {
    pub(super) fn new(player: &str) -> Self {
        Self {
            player: player.to_owned(),
        }
    }

    /// The name that was looked up.
    pub fn player(&self) -> &str {
        &self.player
    }
}
