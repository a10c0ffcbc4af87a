// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Types used for defining vessels and their types.
use std::{fmt, str::FromStr};

use enumflags2::BitFlags;
use thiserror::Error;

use crate::board::Coordinate;

/// Closed set of vessel types. Every vessel occupies a single cell regardless of type.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum VesselType {
    Scout = 0b00001,
    Destroyer = 0b00010,
    Cruiser = 0b00100,
    Submarine = 0b01000,
    Carrier = 0b10000,
}

impl VesselType {
    /// Every vessel type.
    pub const ALL: &'static [VesselType] = &[
        VesselType::Scout,
        VesselType::Destroyer,
        VesselType::Cruiser,
        VesselType::Submarine,
        VesselType::Carrier,
    ];

    /// Full lower case name of this vessel type.
    pub fn name(self) -> &'static str {
        match self {
            VesselType::Scout => "scout",
            VesselType::Destroyer => "destroyer",
            VesselType::Cruiser => "cruiser",
            VesselType::Submarine => "submarine",
            VesselType::Carrier => "carrier",
        }
    }

    /// Two letter tag for this vessel type.
    pub fn abbrev(self) -> &'static str {
        match self {
            VesselType::Scout => "sc",
            VesselType::Destroyer => "dd",
            VesselType::Cruiser => "ca",
            VesselType::Submarine => "ss",
            VesselType::Carrier => "cv",
        }
    }
}

impl fmt::Display for VesselType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for VesselType {
    type Err = ParseVesselTypeError;

    /// Parse either the full name or the two letter tag, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        VesselType::ALL
            .iter()
            .copied()
            .find(|kind| {
                trimmed.eq_ignore_ascii_case(kind.name())
                    || trimmed.eq_ignore_ascii_case(kind.abbrev())
            })
            .ok_or_else(|| ParseVesselTypeError {
                input: s.to_owned(),
            })
    }
}

/// Error returned when text does not name a known [`VesselType`].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unrecognized vessel type {input:?}")]
pub struct ParseVesselTypeError {
    input: String,
}

impl ParseVesselTypeError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Extract the text that failed to parse.
    pub fn into_input(self) -> String {
        self.input
    }
}

/// ID of a vessel, unique within its game. IDs are handed out in placement order
/// starting from 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VesselId(u32);

impl VesselId {
    /// The ID given to the first vessel placed in a game.
    pub(crate) const FIRST: VesselId = VesselId(1);

    /// Wrap a raw vessel ID.
    pub fn new(raw: u32) -> Self {
        VesselId(raw)
    }

    /// Get the raw value of this ID.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The ID that follows this one.
    pub(crate) fn next(self) -> Self {
        VesselId(self.0.checked_add(1).expect("vessel IDs exhausted"))
    }
}

impl From<u32> for VesselId {
    fn from(raw: u32) -> Self {
        VesselId(raw)
    }
}

impl From<VesselId> for u32 {
    fn from(id: VesselId) -> Self {
        id.0
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A vessel placed in the battle space.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Vessel {
    /// ID of the vessel within its game.
    id: VesselId,

    /// Type tag of the vessel.
    kind: VesselType,

    /// Name of the player who placed this vessel.
    owner: String,

    /// Cell occupied by the vessel.
    coord: Coordinate,

    /// Whether the vessel has been hit. A single hit sinks a vessel.
    hit: bool,
}

impl Vessel {
    pub(crate) fn new(id: VesselId, kind: VesselType, owner: String, coord: Coordinate) -> Self {
        Self {
            id,
            kind,
            owner,
            coord,
            hit: false,
        }
    }

    /// Get the ID of the vessel.
    pub fn id(&self) -> VesselId {
        self.id
    }

    /// Get the type of the vessel.
    pub fn vessel_type(&self) -> VesselType {
        self.kind
    }

    /// Name of the player who owns the vessel.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Cell the vessel occupies.
    pub fn coord(&self) -> &Coordinate {
        &self.coord
    }

    /// Check if this vessel has been hit, and is therefore sunk.
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Mark the vessel as hit. Returns true if the vessel was not already hit.
    pub fn mark_hit(&mut self) -> bool {
        !std::mem::replace(&mut self.hit, true)
    }

    /// Returns true if this vessel sits at the given coordinate.
    pub fn occupies(&self, coord: &Coordinate) -> bool {
        &self.coord == coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_tags() {
        assert_eq!("scout".parse(), Ok(VesselType::Scout));
        assert_eq!("Carrier".parse(), Ok(VesselType::Carrier));
        assert_eq!(" SS ".parse(), Ok(VesselType::Submarine));
        assert_eq!("dd".parse(), Ok(VesselType::Destroyer));
        for &kind in VesselType::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
            assert_eq!(kind.abbrev().parse(), Ok(kind));
        }
    }

    #[test]
    fn rejects_free_text() {
        let err = "battlestar".parse::<VesselType>().unwrap_err();
        assert_eq!(err.input(), "battlestar");
        assert!("".parse::<VesselType>().is_err());
    }

    #[test]
    fn mark_hit_is_idempotent() {
        let mut vessel = Vessel::new(
            VesselId::FIRST,
            VesselType::Scout,
            "A".to_owned(),
            Coordinate::new(1, 2, 3),
        );
        assert!(!vessel.is_hit());
        assert!(vessel.mark_hit());
        assert!(vessel.is_hit());
        assert!(!vessel.mark_hit());
        assert!(vessel.is_hit());
    }

    #[test]
    fn occupies_only_its_own_cell() {
        let vessel = Vessel::new(
            VesselId::new(4),
            VesselType::Cruiser,
            "A".to_owned(),
            Coordinate::new(1, 2, 3),
        );
        assert!(vessel.occupies(&Coordinate::new(1, 2, 3)));
        assert!(!vessel.occupies(&Coordinate::new(1, 2, 4)));
    }

    #[test]
    fn ids_count_up() {
        assert_eq!(VesselId::FIRST.get(), 1);
        assert_eq!(VesselId::FIRST.next(), VesselId::new(2));
    }

    #[test]
    #[should_panic(expected = "vessel IDs exhausted")]
    fn ids_never_wrap() {
        VesselId::new(u32::MAX).next();
    }
}
