//! Engine for a multiplayer game of Battleship played inside a bounded 3-D volume.
//!
//! Players join a [`Game`], place single-cell vessels at coordinates inside the game's
//! [`Bounds`](board::Bounds), and fire at coordinates to sink opposing vessels. The last
//! player with a vessel still afloat wins.
//!
//! The entry point for concurrent callers is the [`GameRegistry`], which creates games,
//! hands out [`GameHandle`]s, and serializes every operation on a single game behind
//! that game's own lock. [`Game`] itself is a plain value that can be driven directly
//! when no sharing is needed.
//!
//! ```
//! use battlespace::{board::Bounds, GamePhase, GameRegistry, PlayerStatus};
//!
//! let registry = GameRegistry::new();
//! let bounds = Bounds::from_limits(0, 10, 0, 10, 0, 10).unwrap();
//! let id = registry.create_game("A", bounds);
//! registry.join(id, "B").unwrap();
//! registry.add_vessel(id, "A", "scout", 1, 1, 1).unwrap();
//! let target = registry.add_vessel(id, "B", "scout", 2, 2, 2).unwrap();
//!
//! let outcome = registry.shoot_at(id, "A", target, 2, 2, 2).unwrap();
//! assert!(outcome.is_hit());
//! assert_eq!(registry.snapshot(id).unwrap().phase, GamePhase::Finished);
//! assert_eq!(registry.status_for(id, "A").unwrap(), PlayerStatus::Won);
//! ```

pub use self::{
    error::{Error, ErrorKind, Result},
    game::{
        Game, GameId, GamePhase, GameRules, GameSnapshot, PlayerStatus, ShotOutcome,
    },
    player::Player,
    registry::{GameHandle, GameRegistry},
    ships::{Vessel, VesselId, VesselType},
};

pub mod board;
pub mod error;
pub mod game;
pub mod player;
pub mod registry;
pub mod ships;
