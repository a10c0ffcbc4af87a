//! Crate-level error type and the flat list of failure kinds.
use std::fmt;

use thiserror::Error;

use crate::{
    board::InvalidBoundsError,
    game::{
        CannotJoinReason, CannotPlaceReason, CannotShootReason, GameId, JoinError, PlaceError,
        ShotError, UnknownPlayerError,
    },
};

/// Result alias used by the [`GameRegistry`][crate::GameRegistry].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure the engine can report.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum Error {
    /// The requested bounds were inverted on some axis.
    #[error(transparent)]
    InvalidBounds(#[from] InvalidBoundsError),

    /// No game has the requested ID.
    #[error("game {0} not found")]
    GameNotFound(GameId),

    /// A join was refused.
    #[error(transparent)]
    Join(#[from] JoinError),

    /// A vessel placement was refused.
    #[error(transparent)]
    Place(#[from] PlaceError),

    /// A shot was refused.
    #[error(transparent)]
    Shot(#[from] ShotError),

    /// A status query named a player who never joined.
    #[error(transparent)]
    UnknownPlayer(#[from] UnknownPlayerError),
}

impl Error {
    /// Get the kind of failure, independent of which operation reported it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidBounds(_) => ErrorKind::InvalidBounds,
            Error::GameNotFound(_) => ErrorKind::GameNotFound,
            Error::Join(err) => err.reason().into(),
            Error::Place(err) => err.reason().into(),
            Error::Shot(err) => err.reason().into(),
            Error::UnknownPlayer(_) => ErrorKind::UnknownPlayer,
        }
    }
}

/// Flat list of every failure kind, for callers that translate failures into their own
/// responses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidBounds,
    GameNotFound,
    DuplicatePlayer,
    GameFull,
    GameFinished,
    UnknownPlayer,
    OutOfBounds,
    CellOccupied,
    InvalidVesselType,
    GameNotInProgress,
    InvalidTarget,
    SelfTargeting,
}

impl ErrorKind {
    /// Name of the failure kind.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::InvalidBounds => "InvalidBounds",
            ErrorKind::GameNotFound => "GameNotFound",
            ErrorKind::DuplicatePlayer => "DuplicatePlayer",
            ErrorKind::GameFull => "GameFull",
            ErrorKind::GameFinished => "GameFinished",
            ErrorKind::UnknownPlayer => "UnknownPlayer",
            ErrorKind::OutOfBounds => "OutOfBounds",
            ErrorKind::CellOccupied => "CellOccupied",
            ErrorKind::InvalidVesselType => "InvalidVesselType",
            ErrorKind::GameNotInProgress => "GameNotInProgress",
            ErrorKind::InvalidTarget => "InvalidTarget",
            ErrorKind::SelfTargeting => "SelfTargeting",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<CannotJoinReason> for ErrorKind {
    fn from(reason: CannotJoinReason) -> Self {
        match reason {
            CannotJoinReason::DuplicatePlayer => ErrorKind::DuplicatePlayer,
            CannotJoinReason::GameFull => ErrorKind::GameFull,
        }
    }
}

impl From<CannotPlaceReason> for ErrorKind {
    fn from(reason: CannotPlaceReason) -> Self {
        match reason {
            CannotPlaceReason::GameFinished => ErrorKind::GameFinished,
            CannotPlaceReason::UnknownPlayer => ErrorKind::UnknownPlayer,
            CannotPlaceReason::OutOfBounds => ErrorKind::OutOfBounds,
            CannotPlaceReason::CellOccupied => ErrorKind::CellOccupied,
            CannotPlaceReason::InvalidVesselType => ErrorKind::InvalidVesselType,
        }
    }
}

impl From<CannotShootReason> for ErrorKind {
    fn from(reason: CannotShootReason) -> Self {
        match reason {
            CannotShootReason::UnknownPlayer => ErrorKind::UnknownPlayer,
            CannotShootReason::GameNotInProgress => ErrorKind::GameNotInProgress,
            CannotShootReason::OutOfBounds => ErrorKind::OutOfBounds,
            CannotShootReason::InvalidTarget => ErrorKind::InvalidTarget,
            CannotShootReason::SelfTargeting => ErrorKind::SelfTargeting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Bounds;

    #[test]
    fn kinds_follow_reasons() {
        let err: Error = Bounds::from_limits(1, 0, 0, 0, 0, 0).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(
            Error::GameNotFound(GameId::new(3)).kind(),
            ErrorKind::GameNotFound
        );
        assert_eq!(
            ErrorKind::from(CannotJoinReason::DuplicatePlayer),
            ErrorKind::DuplicatePlayer
        );
        assert_eq!(
            ErrorKind::from(CannotShootReason::SelfTargeting),
            ErrorKind::SelfTargeting
        );
        assert_eq!(
            ErrorKind::from(CannotPlaceReason::InvalidVesselType),
            ErrorKind::InvalidVesselType
        );
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::GameNotFound(GameId::new(9)).to_string(),
            "game 9 not found"
        );
        let err: Error = Bounds::from_limits(0, 0, 4, 2, 0, 0).unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "invalid bounds along y: min 4 is greater than max 2"
        );
        assert_eq!(ErrorKind::CellOccupied.to_string(), "CellOccupied");
    }
}
