//! Per-game configuration.
use std::num::NonZeroUsize;

use enumflags2::BitFlags;

use crate::ships::VesselType;

/// Rules applied to a game when it is created.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameRules {
    /// Maximum number of players, including the creator. `None` means unbounded.
    max_players: Option<NonZeroUsize>,

    /// Vessel types that players may place.
    vessel_types: BitFlags<VesselType>,
}

impl GameRules {
    /// Rules with no player cap that accept every vessel type.
    pub fn new() -> Self {
        Self {
            max_players: None,
            vessel_types: BitFlags::all(),
        }
    }

    /// Cap the number of players, including the creator.
    pub fn with_max_players(mut self, max_players: Option<NonZeroUsize>) -> Self {
        self.max_players = max_players;
        self
    }

    /// Restrict the vessel types that may be placed.
    pub fn with_vessel_types<B: Into<BitFlags<VesselType>>>(mut self, vessel_types: B) -> Self {
        self.vessel_types = vessel_types.into();
        self
    }

    /// The player cap, if any.
    pub fn max_players(&self) -> Option<NonZeroUsize> {
        self.max_players
    }

    /// The accepted vessel types.
    pub fn vessel_types(&self) -> BitFlags<VesselType> {
        self.vessel_types
    }

    /// Whether the given vessel type may be placed.
    pub fn accepts(&self, vessel_type: VesselType) -> bool {
        self.vessel_types.contains(vessel_type)
    }

    /// Whether a game holding `players` players has room for another.
    pub fn has_room(&self, players: usize) -> bool {
        self.max_players.map_or(true, |max| players < max.get())
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let rules = GameRules::default();
        assert!(rules.has_room(10_000));
        for &kind in VesselType::ALL {
            assert!(rules.accepts(kind));
        }
    }

    #[test]
    fn restrictions_apply() {
        let rules = GameRules::new()
            .with_max_players(NonZeroUsize::new(2))
            .with_vessel_types(VesselType::Scout | VesselType::Carrier);
        assert!(rules.has_room(1));
        assert!(!rules.has_room(2));
        assert!(rules.accepts(VesselType::Carrier));
        assert!(!rules.accepts(VesselType::Submarine));
    }
}
