//! The game state machine: joining, vessel placement, and combat resolution.
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

use log::{debug, info};

use crate::{
    board::{Bounds, Coordinate, Grid},
    player::Player,
    ships::{Vessel, VesselId, VesselType},
};

pub use self::{
    errors::{
        CannotJoinReason, CannotPlaceReason, CannotShootReason, JoinError, PlaceError, ShotError,
        UnknownPlayerError,
    },
    rules::GameRules,
    snapshot::GameSnapshot,
};

mod errors;
mod rules;
mod snapshot;

/// ID of a game, assigned by the [`GameRegistry`][crate::GameRegistry].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GameId(u64);

impl GameId {
    /// The ID given to the first game of a registry.
    pub(crate) const FIRST: GameId = GameId(1);

    /// Wrap a raw game ID.
    pub fn new(raw: u64) -> Self {
        GameId(raw)
    }

    /// Get the raw value of this ID.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The ID that follows this one.
    pub(crate) fn next(self) -> Self {
        GameId(self.0.checked_add(1).expect("game IDs exhausted"))
    }
}

impl From<u64> for GameId {
    fn from(raw: u64) -> Self {
        GameId(raw)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle stage of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum GamePhase {
    /// Fewer than two players have placed a vessel. Shooting is not allowed yet.
    WaitingForPlayers,
    /// At least two players have placed vessels and shots may be fired.
    InProgress,
    /// Only one player has vessels left afloat.
    Finished,
}

impl GamePhase {
    /// Upper case name of the phase.
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::WaitingForPlayers => "WAITING_FOR_PLAYERS",
            GamePhase::InProgress => "IN_PROGRESS",
            GamePhase::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Status of a game as seen by one of its players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlayerStatus {
    WaitingForPlayers,
    InProgress,
    Won,
    Lost,
}

impl PlayerStatus {
    /// Human readable status line.
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerStatus::WaitingForPlayers => "waiting for players",
            PlayerStatus::InProgress => "in progress",
            PlayerStatus::Won => "finished: you won",
            PlayerStatus::Lost => "finished: you lost",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of a successfully-fired shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// No vessel occupies the target cell.
    Miss,
    /// The given vessel was hit and sunk, and the game goes on.
    Sunk(VesselId),
    /// The given vessel had already been sunk. Nothing changed.
    AlreadySunk(VesselId),
    /// The given vessel was sunk and the shot ended the game. The winner is not
    /// necessarily the shooter; see [`Game::winner`].
    Victory(VesselId),
}

impl ShotOutcome {
    /// Whether the shot found a vessel.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }

    /// Get the id of the vessel that was hit.
    pub fn vessel(&self) -> Option<VesselId> {
        match *self {
            ShotOutcome::Miss => None,
            ShotOutcome::Sunk(id) | ShotOutcome::AlreadySunk(id) | ShotOutcome::Victory(id) => {
                Some(id)
            }
        }
    }
}

/// A single game: its bounds, roster, and phase.
#[derive(Debug)]
pub struct Game {
    /// ID of this game.
    id: GameId,

    /// Rules fixed at creation.
    rules: GameRules,

    /// Players indexed by name.
    players: HashMap<String, Player>,

    /// Records the order players joined in.
    join_order: Vec<String>,

    /// Occupancy of the battle space.
    grid: Grid,

    /// Current phase.
    phase: GamePhase,

    /// Name of the winner once the game is finished.
    winner: Option<String>,

    /// ID for the next vessel placed.
    next_vessel: VesselId,
}

impl Game {
    /// Create a game with the given ID. The creator joins immediately.
    pub fn new(id: GameId, creator: impl Into<String>, bounds: Bounds, rules: GameRules) -> Self {
        let mut game = Self {
            id,
            rules,
            players: HashMap::new(),
            join_order: Vec::new(),
            grid: Grid::new(bounds),
            phase: GamePhase::WaitingForPlayers,
            winner: None,
            next_vessel: VesselId::FIRST,
        };
        let creator = creator.into();
        info!("game {}: created by {:?} with bounds {}", id, creator, bounds);
        game.insert_player(creator);
        game
    }

    /// Get the ID of this game.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Get the [`Bounds`] of this game.
    pub fn bounds(&self) -> &Bounds {
        &self.grid.bounds
    }

    /// Get the rules this game was created with.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Get the current phase of the game.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the winner. Returns `None` unless the game is finished.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Get the player with the given name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Iterate the players in join order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        let players = &self.players;
        self.join_order.iter().filter_map(move |name| players.get(name))
    }

    /// Get the vessel at the given coordinate, whoever owns it.
    pub fn vessel_at(&self, coord: &Coordinate) -> Option<&Vessel> {
        self.grid
            .get(coord)
            .and_then(|cell| self.players.get(&cell.owner))
            .and_then(|owner| owner.vessel_at(coord))
    }

    /// Add a player to the game. Joining is allowed in every phase; a player who
    /// joins a finished game has no vessels and is reported as having lost.
    pub fn join(&mut self, player: impl Into<String>) -> Result<(), JoinError> {
        let player = player.into();
        if self.players.contains_key(&player) {
            return Err(self.refuse_join(CannotJoinReason::DuplicatePlayer, player));
        }
        if !self.rules.has_room(self.players.len()) {
            return Err(self.refuse_join(CannotJoinReason::GameFull, player));
        }
        info!("game {}: {:?} joined", self.id, player);
        self.insert_player(player);
        Ok(())
    }

    /// Place a vessel for the given player. On success returns the ID assigned to the
    /// new vessel. A failed placement leaves the game untouched.
    pub fn add_vessel(
        &mut self,
        player: &str,
        vessel_type: VesselType,
        coord: Coordinate,
    ) -> Result<VesselId, PlaceError> {
        let id = self.id;
        let reject = |reason: CannotPlaceReason| {
            debug!(
                "game {}: rejected {} for {:?} at {}: {}",
                id, vessel_type, player, coord, reason
            );
            PlaceError::new(reason, player, vessel_type.name(), coord)
        };
        if let Some(reason) = self.placement_blocker(player, &coord) {
            return Err(reject(reason));
        }
        if !self.rules.accepts(vessel_type) {
            return Err(reject(CannotPlaceReason::InvalidVesselType));
        }

        let vessel = self.next_vessel;
        let owner = match self.players.get_mut(player) {
            Some(owner) => owner,
            None => return Err(reject(CannotPlaceReason::UnknownPlayer)),
        };
        self.next_vessel = vessel.next();
        owner.add_vessel(Vessel::new(vessel, vessel_type, player.to_owned(), coord));
        self.grid.occupy(coord, player, vessel);
        debug!(
            "game {}: {:?} placed {} {} at {}",
            id, player, vessel_type, vessel, coord
        );
        self.try_start();
        Ok(vessel)
    }

    /// Place a vessel whose type is given by name or abbreviation. Text that does not
    /// name a vessel type fails [`CannotPlaceReason::InvalidVesselType`], but only
    /// after every other placement check has passed.
    pub fn add_vessel_by_name(
        &mut self,
        player: &str,
        vessel_type: &str,
        coord: Coordinate,
    ) -> Result<VesselId, PlaceError> {
        match vessel_type.parse::<VesselType>() {
            Ok(kind) => self.add_vessel(player, kind, coord),
            Err(_) => {
                let reason = self
                    .placement_blocker(player, &coord)
                    .unwrap_or(CannotPlaceReason::InvalidVesselType);
                debug!(
                    "game {}: rejected {:?} for {:?} at {}: {}",
                    self.id, vessel_type, player, coord, reason
                );
                Err(PlaceError::new(reason, player, vessel_type, coord))
            }
        }
    }

    /// Fire at the given vessel on the given coordinate.
    ///
    /// An empty cell is a [`ShotOutcome::Miss`], and firing at a vessel that was already
    /// sunk reports [`ShotOutcome::AlreadySunk`]; neither changes the game. A failed
    /// shot leaves the game untouched.
    pub fn shoot_at(
        &mut self,
        shooter: &str,
        vessel: VesselId,
        coord: Coordinate,
    ) -> Result<ShotOutcome, ShotError> {
        let id = self.id;
        let reject = |reason: CannotShootReason| {
            debug!(
                "game {}: rejected shot by {:?} at {} ({}): {}",
                id, shooter, coord, vessel, reason
            );
            ShotError::new(reason, shooter, vessel, coord)
        };
        if !self.players.contains_key(shooter) {
            return Err(reject(CannotShootReason::UnknownPlayer));
        }
        if !self.try_start() {
            return Err(reject(CannotShootReason::GameNotInProgress));
        }
        if !self.grid.bounds.contains(&coord) {
            return Err(reject(CannotShootReason::OutOfBounds));
        }
        let cell = match self.grid.get(&coord) {
            Some(cell) => cell,
            None => {
                debug!("game {}: {:?} missed at {}", id, shooter, coord);
                return Ok(ShotOutcome::Miss);
            }
        };
        if cell.owner == shooter {
            return Err(reject(CannotShootReason::SelfTargeting));
        }
        if cell.vessel != vessel {
            return Err(reject(CannotShootReason::InvalidTarget));
        }

        let target = match self
            .players
            .get_mut(&cell.owner)
            .and_then(|owner| owner.vessel_mut(vessel))
        {
            Some(target) => target,
            None => return Err(reject(CannotShootReason::InvalidTarget)),
        };
        if !target.mark_hit() {
            debug!("game {}: vessel {} was already sunk", id, vessel);
            return Ok(ShotOutcome::AlreadySunk(vessel));
        }
        debug!(
            "game {}: {:?} sank vessel {} of {:?}",
            id,
            shooter,
            vessel,
            target.owner()
        );
        Ok(if self.settle() {
            ShotOutcome::Victory(vessel)
        } else {
            ShotOutcome::Sunk(vessel)
        })
    }

    /// Get the status of the game from the point of view of the given player.
    pub fn status_for(&self, player: &str) -> Result<PlayerStatus, UnknownPlayerError> {
        if !self.players.contains_key(player) {
            return Err(UnknownPlayerError::new(player));
        }
        Ok(match self.phase {
            GamePhase::WaitingForPlayers => PlayerStatus::WaitingForPlayers,
            GamePhase::InProgress => PlayerStatus::InProgress,
            GamePhase::Finished if self.winner() == Some(player) => PlayerStatus::Won,
            GamePhase::Finished => PlayerStatus::Lost,
        })
    }

    /// Take an owned copy of the whole game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            bounds: self.grid.bounds,
            phase: self.phase,
            winner: self.winner.clone(),
            players: self.players().cloned().collect(),
        }
    }

    /// Register a new player at the end of the join order.
    fn insert_player(&mut self, name: String) {
        let joined_at = self.join_order.len();
        if let Entry::Vacant(entry) = self.players.entry(name.clone()) {
            entry.insert(Player::new(name.clone(), joined_at));
            self.join_order.push(name);
        }
    }

    /// First check a placement at the given coordinate fails, ignoring the vessel type.
    fn placement_blocker(&self, player: &str, coord: &Coordinate) -> Option<CannotPlaceReason> {
        if self.phase == GamePhase::Finished {
            Some(CannotPlaceReason::GameFinished)
        } else if !self.players.contains_key(player) {
            Some(CannotPlaceReason::UnknownPlayer)
        } else if !self.grid.bounds.contains(coord) {
            Some(CannotPlaceReason::OutOfBounds)
        } else if self.grid.is_occupied(coord) {
            Some(CannotPlaceReason::CellOccupied)
        } else {
            None
        }
    }

    /// Log and build a join refusal.
    fn refuse_join(&self, reason: CannotJoinReason, player: String) -> JoinError {
        debug!("game {}: refused join by {:?}: {}", self.id, player, reason);
        JoinError::new(reason, player)
    }

    /// Start the game if it is waiting and at least two players have placed vessels.
    /// Returns true if the game is in progress afterwards.
    fn try_start(&mut self) -> bool {
        if self.phase == GamePhase::WaitingForPlayers
            && self.players.values().filter(|p| p.has_vessels()).count() >= 2
        {
            info!("game {}: started", self.id);
            self.phase = GamePhase::InProgress;
        }
        self.phase == GamePhase::InProgress
    }

    /// Finish the game if exactly one player still has a vessel afloat. Returns true if
    /// the game finished.
    fn settle(&mut self) -> bool {
        let mut afloat = self
            .players
            .values()
            .filter(|player| player.has_vessels() && !player.all_sunk());
        let winner = match (afloat.next(), afloat.next()) {
            (Some(winner), None) => winner.name().to_owned(),
            _ => return false,
        };
        info!("game {}: finished, {:?} wins", self.id, winner);
        self.phase = GamePhase::Finished;
        self.winner = Some(winner);
        true
    }
}
