//! Registry of running games, shareable between threads.
//!
//! The registry's own lock only guards ID allocation and lookup. Each game sits behind
//! its own lock, held by a [`GameHandle`] for exactly one operation, so operations on
//! different games never wait on each other while operations on the same game are
//! applied one at a time.
use std::{collections::BTreeMap, sync::Arc};

use log::info;
use parking_lot::Mutex;

use crate::{
    board::{Bounds, Coordinate},
    error::{Error, Result},
    game::{
        Game, GameRules, GameSnapshot, JoinError, PlaceError, PlayerStatus, ShotError,
        ShotOutcome, UnknownPlayerError,
    },
    ships::{VesselId, VesselType},
};

pub use crate::game::GameId;

/// Shared handle to one game in a [`GameRegistry`]. Every method locks the game for the
/// duration of the call.
#[derive(Debug, Clone)]
pub struct GameHandle {
    id: GameId,
    game: Arc<Mutex<Game>>,
}

impl GameHandle {
    fn new(game: Game) -> Self {
        Self {
            id: game.id(),
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// The ID of the game.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Add a player to the game.
    pub fn join(&self, player: impl Into<String>) -> Result<(), JoinError> {
        self.game.lock().join(player)
    }

    /// Place a vessel for the given player.
    pub fn add_vessel(
        &self,
        player: &str,
        vessel_type: VesselType,
        coord: Coordinate,
    ) -> Result<VesselId, PlaceError> {
        self.game.lock().add_vessel(player, vessel_type, coord)
    }

    /// Place a vessel whose type is given by name or abbreviation.
    pub fn add_vessel_by_name(
        &self,
        player: &str,
        vessel_type: &str,
        coord: Coordinate,
    ) -> Result<VesselId, PlaceError> {
        self.game.lock().add_vessel_by_name(player, vessel_type, coord)
    }

    /// Fire at the given vessel on the given coordinate.
    pub fn shoot_at(
        &self,
        shooter: &str,
        vessel: VesselId,
        coord: Coordinate,
    ) -> Result<ShotOutcome, ShotError> {
        self.game.lock().shoot_at(shooter, vessel, coord)
    }

    /// Get the status of the game for the given player.
    pub fn status_for(&self, player: &str) -> Result<PlayerStatus, UnknownPlayerError> {
        self.game.lock().status_for(player)
    }

    /// Take an owned copy of the game.
    pub fn snapshot(&self) -> GameSnapshot {
        self.game.lock().snapshot()
    }

    /// Run a read-only closure against the locked game.
    pub fn read<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.game.lock())
    }
}

/// Mutable registry state, guarded by the registry lock.
#[derive(Debug)]
struct Games {
    /// ID for the next game created.
    next_id: GameId,
    /// Registered games.
    by_id: BTreeMap<GameId, GameHandle>,
}

/// Creates games and looks them up by ID.
#[derive(Debug)]
pub struct GameRegistry {
    /// Rules applied to every game created by this registry.
    rules: GameRules,

    games: Mutex<Games>,
}

impl GameRegistry {
    /// Construct an empty registry using the default [`GameRules`].
    pub fn new() -> Self {
        Self::with_rules(GameRules::default())
    }

    /// Construct an empty registry that creates games with the given rules.
    pub fn with_rules(rules: GameRules) -> Self {
        Self {
            rules,
            games: Mutex::new(Games {
                next_id: GameId::FIRST,
                by_id: BTreeMap::new(),
            }),
        }
    }

    /// The rules new games are created with.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Create a game with the given bounds. The creator joins it immediately. Returns the
    /// ID of the new game.
    pub fn create_game(&self, creator: impl Into<String>, bounds: Bounds) -> GameId {
        let mut games = self.games.lock();
        let id = games.next_id;
        games.next_id = id.next();
        let handle = GameHandle::new(Game::new(id, creator, bounds, self.rules));
        games.by_id.insert(id, handle);
        info!("registered game {} ({} total)", id, games.by_id.len());
        id
    }

    /// Create a game from the six raw per-axis limits.
    pub fn create_game_with_limits(
        &self,
        creator: impl Into<String>,
        min_x: i64,
        max_x: i64,
        min_y: i64,
        max_y: i64,
        min_z: i64,
        max_z: i64,
    ) -> Result<GameId> {
        let bounds = Bounds::from_limits(min_x, max_x, min_y, max_y, min_z, max_z)?;
        Ok(self.create_game(creator, bounds))
    }

    /// Get a handle to the game with the given ID.
    pub fn get_game(&self, id: GameId) -> Result<GameHandle> {
        self.games
            .lock()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(Error::GameNotFound(id))
    }

    /// IDs of every registered game, in ascending order.
    pub fn game_ids(&self) -> Vec<GameId> {
        self.games.lock().by_id.keys().copied().collect()
    }

    /// Add a player to a game.
    pub fn join(&self, id: GameId, player: impl Into<String>) -> Result<()> {
        Ok(self.get_game(id)?.join(player)?)
    }

    /// Place a vessel in a game. The vessel type is given as text; text that names no
    /// vessel type is reported only if the placement would otherwise succeed.
    pub fn add_vessel(
        &self,
        id: GameId,
        player: &str,
        vessel_type: &str,
        x: i64,
        y: i64,
        z: i64,
    ) -> Result<VesselId> {
        Ok(self
            .get_game(id)?
            .add_vessel_by_name(player, vessel_type, Coordinate::new(x, y, z))?)
    }

    /// Fire a shot in a game.
    pub fn shoot_at(
        &self,
        id: GameId,
        shooter: &str,
        vessel: VesselId,
        x: i64,
        y: i64,
        z: i64,
    ) -> Result<ShotOutcome> {
        Ok(self
            .get_game(id)?
            .shoot_at(shooter, vessel, Coordinate::new(x, y, z))?)
    }

    /// Get the status of a game for one of its players.
    pub fn status_for(&self, id: GameId, player: &str) -> Result<PlayerStatus> {
        Ok(self.get_game(id)?.status_for(player)?)
    }

    /// Take an owned copy of a game.
    pub fn snapshot(&self, id: GameId) -> Result<GameSnapshot> {
        Ok(self.get_game(id)?.snapshot())
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, game::GamePhase};

    fn bounds() -> Bounds {
        Bounds::from_limits(0, 10, 0, 10, 0, 10).unwrap()
    }

    #[test]
    fn ids_count_up_from_one() {
        let registry = GameRegistry::new();
        assert_eq!(registry.create_game("A", bounds()), GameId::new(1));
        assert_eq!(registry.create_game("A", bounds()), GameId::new(2));
        assert_eq!(registry.game_ids(), vec![GameId::new(1), GameId::new(2)]);
    }

    #[test]
    fn registries_are_independent() {
        let first = GameRegistry::new();
        let second = GameRegistry::new();
        first.create_game("A", bounds());
        assert_eq!(second.create_game("A", bounds()), GameId::new(1));
        assert_eq!(first.game_ids().len(), 1);
    }

    #[test]
    fn unknown_game_is_not_found() {
        let registry = GameRegistry::new();
        let err = registry.get_game(GameId::new(42)).unwrap_err();
        assert_eq!(err, Error::GameNotFound(GameId::new(42)));
        for err in vec![
            registry.join(GameId::new(42), "A").unwrap_err(),
            registry.status_for(GameId::new(42), "A").unwrap_err(),
            registry.snapshot(GameId::new(42)).unwrap_err(),
            registry
                .add_vessel(GameId::new(42), "A", "scout", 0, 0, 0)
                .unwrap_err(),
            registry
                .shoot_at(GameId::new(42), "A", VesselId::new(1), 0, 0, 0)
                .unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::GameNotFound);
        }
    }

    #[test]
    fn inverted_limits_create_nothing() {
        let registry = GameRegistry::new();
        let err = registry
            .create_game_with_limits("A", 0, 10, 0, 10, 10, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert!(registry.game_ids().is_empty());
        assert_eq!(
            registry.create_game_with_limits("A", 0, 0, 0, 0, 0, 0),
            Ok(GameId::new(1))
        );
    }

    #[test]
    fn vessel_type_text_is_validated() {
        let registry = GameRegistry::new();
        let id = registry.create_game("A", bounds());
        let err = registry.add_vessel(id, "A", "rowboat", 1, 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVesselType);
        assert_eq!(registry.add_vessel(id, "A", "CV", 1, 1, 1), Ok(VesselId::new(1)));
    }

    #[test]
    fn unknown_vessel_type_does_not_mask_other_failures() {
        let registry = GameRegistry::new();
        let id = registry.create_game("A", bounds());
        registry.add_vessel(id, "A", "scout", 1, 1, 1).unwrap();

        let kind = |player, x| {
            registry
                .add_vessel(id, player, "rowboat", x, 1, 1)
                .unwrap_err()
                .kind()
        };
        assert_eq!(kind("Z", 2), ErrorKind::UnknownPlayer);
        assert_eq!(kind("A", 99), ErrorKind::OutOfBounds);
        assert_eq!(kind("A", 1), ErrorKind::CellOccupied);
        assert_eq!(kind("A", 2), ErrorKind::InvalidVesselType);
        assert_eq!(
            registry.add_vessel(GameId::new(42), "Z", "rowboat", 99, 1, 1),
            Err(Error::GameNotFound(GameId::new(42)))
        );
    }

    #[test]
    fn finished_game_still_accepts_players() {
        let registry = GameRegistry::new();
        let id = registry.create_game("A", bounds());
        registry.join(id, "B").unwrap();
        registry.add_vessel(id, "A", "scout", 1, 1, 1).unwrap();
        let target = registry.add_vessel(id, "B", "scout", 2, 2, 2).unwrap();
        registry.shoot_at(id, "A", target, 2, 2, 2).unwrap();

        assert_eq!(registry.join(id, "C"), Ok(()));
        assert_eq!(registry.status_for(id, "C"), Ok(PlayerStatus::Lost));
        let snapshot = registry.snapshot(id).unwrap();
        assert_eq!(snapshot.phase, GamePhase::Finished);
        assert_eq!(snapshot.winner.as_deref(), Some("A"));
        assert_eq!(
            registry.add_vessel(id, "C", "scout", 3, 3, 3).unwrap_err().kind(),
            ErrorKind::GameFinished
        );
    }

    #[test]
    fn rules_reach_new_games() {
        let rules = GameRules::new().with_vessel_types(VesselType::Scout);
        let registry = GameRegistry::with_rules(rules);
        let id = registry.create_game("A", bounds());
        let err = registry.add_vessel(id, "A", "carrier", 1, 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVesselType);
        assert_eq!(registry.get_game(id).unwrap().read(|g| *g.rules()), rules);
    }

    #[test]
    fn handles_share_one_game() {
        let registry = GameRegistry::new();
        let id = registry.create_game("A", bounds());
        let first = registry.get_game(id).unwrap();
        let second = registry.get_game(id).unwrap();
        first.join("B").unwrap();
        assert_eq!(second.status_for("B"), Ok(PlayerStatus::WaitingForPlayers));
        assert_eq!(second.read(Game::phase), GamePhase::WaitingForPlayers);
        assert_eq!(second.id(), id);
    }

    #[test]
    fn registry_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GameRegistry>();
        assert_send_sync::<GameHandle>();
    }
}
