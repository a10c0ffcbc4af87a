//! Players and the vessels they own.

use crate::{
    board::Coordinate,
    ships::{Vessel, VesselId},
};

/// A named participant in a game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    /// Name of the player, unique within the game.
    name: String,

    /// Position of this player in the join order. The creator of a game is 0.
    joined_at: usize,

    /// Vessels owned by this player, in placement order.
    vessels: Vec<Vessel>,
}

impl Player {
    pub(crate) fn new(name: String, joined_at: usize) -> Self {
        Self {
            name,
            joined_at,
            vessels: Vec::new(),
        }
    }

    /// The player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this player in the join order.
    pub fn joined_at(&self) -> usize {
        self.joined_at
    }

    /// Whether this player created the game.
    pub fn is_creator(&self) -> bool {
        self.joined_at == 0
    }

    /// The player's vessels in placement order.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// Returns true if this player has placed at least one vessel.
    pub fn has_vessels(&self) -> bool {
        !self.vessels.is_empty()
    }

    /// Append a vessel to this player's fleet. Placement must already have been
    /// validated against the rest of the game.
    pub(crate) fn add_vessel(&mut self, vessel: Vessel) {
        self.vessels.push(vessel);
    }

    /// Find this player's own vessel at the given coordinate, if any.
    pub fn vessel_at(&self, coord: &Coordinate) -> Option<&Vessel> {
        self.vessels.iter().find(|vessel| vessel.occupies(coord))
    }

    /// Mutably get this player's vessel with the given ID.
    pub(crate) fn vessel_mut(&mut self, id: VesselId) -> Option<&mut Vessel> {
        self.vessels.iter_mut().find(|vessel| vessel.id() == id)
    }

    /// Number of vessels that have not been hit.
    pub fn afloat(&self) -> usize {
        self.vessels.iter().filter(|vessel| !vessel.is_hit()).count()
    }

    /// Returns true if the player owns at least one vessel and all of them have been
    /// hit. A player with no vessels is never considered sunk.
    pub fn all_sunk(&self) -> bool {
        self.has_vessels() && self.vessels.iter().all(Vessel::is_hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::VesselType;

    fn vessel(id: u32, x: i64) -> Vessel {
        Vessel::new(
            VesselId::new(id),
            VesselType::Scout,
            "A".to_owned(),
            Coordinate::new(x, 0, 0),
        )
    }

    #[test]
    fn empty_fleet_is_never_sunk() {
        let player = Player::new("A".to_owned(), 0);
        assert!(!player.has_vessels());
        assert!(!player.all_sunk());
        assert_eq!(player.afloat(), 0);
    }

    #[test]
    fn sunk_once_every_vessel_is_hit() {
        let mut player = Player::new("A".to_owned(), 1);
        player.add_vessel(vessel(1, 0));
        player.add_vessel(vessel(2, 1));
        assert!(!player.all_sunk());

        player.vessel_mut(VesselId::new(1)).unwrap().mark_hit();
        assert!(!player.all_sunk());
        assert_eq!(player.afloat(), 1);

        player.vessel_mut(VesselId::new(2)).unwrap().mark_hit();
        assert!(player.all_sunk());
        assert_eq!(player.afloat(), 0);
    }

    #[test]
    fn lookup_by_coordinate_and_order() {
        let mut player = Player::new("A".to_owned(), 0);
        player.add_vessel(vessel(3, 5));
        player.add_vessel(vessel(7, 2));
        assert!(player.is_creator());
        assert_eq!(
            player.vessel_at(&Coordinate::new(2, 0, 0)).map(Vessel::id),
            Some(VesselId::new(7))
        );
        assert!(player.vessel_at(&Coordinate::new(3, 0, 0)).is_none());
        let ids: Vec<_> = player.vessels().iter().map(Vessel::id).collect();
        assert_eq!(ids, vec![VesselId::new(3), VesselId::new(7)]);
    }
}
