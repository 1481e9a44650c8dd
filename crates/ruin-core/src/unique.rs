use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, UniqueActorKind};
use crate::error::{WorldError, WorldResult};
use crate::geometry::Point;
use crate::map::MapId;

/// Labels of the hand-designated maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueMapKind {
    /// The secret underground facility below a business district office.
    UndergroundFacility,
    /// The police station's street map.
    PoliceStation,
    /// The hospital's street map.
    Hospital,
}

impl UniqueMapKind {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::UndergroundFacility => "Underground Facility",
            Self::PoliceStation => "Police Station",
            Self::Hospital => "Hospital",
        }
    }
}

impl fmt::Display for UniqueMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handle to a unique map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueMap {
    /// The map itself.
    pub map: MapId,
    /// District it is anchored in.
    pub district: Point,
}

/// Set-once registry of unique maps and actors, looked up by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueRegistry {
    maps: BTreeMap<UniqueMapKind, UniqueMap>,
    actors: BTreeMap<UniqueActorKind, ActorId>,
}

impl UniqueRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unique map. Fails if the label is already taken.
    pub fn set_map(&mut self, kind: UniqueMapKind, handle: UniqueMap) -> WorldResult<()> {
        if self.maps.contains_key(&kind) {
            return Err(WorldError::UniqueAlreadySet(kind.label().to_string()));
        }
        self.maps.insert(kind, handle);
        Ok(())
    }

    /// Register a unique actor. Fails if the label is already taken.
    pub fn set_actor(&mut self, kind: UniqueActorKind, id: ActorId) -> WorldResult<()> {
        if self.actors.contains_key(&kind) {
            return Err(WorldError::UniqueAlreadySet(kind.name().to_string()));
        }
        self.actors.insert(kind, id);
        Ok(())
    }

    /// Look up a unique map.
    pub fn map(&self, kind: UniqueMapKind) -> Option<UniqueMap> {
        self.maps.get(&kind).copied()
    }

    /// Look up a unique actor.
    pub fn actor(&self, kind: UniqueActorKind) -> Option<ActorId> {
        self.actors.get(&kind).copied()
    }

    /// All registered maps, ordered by label.
    pub fn maps(&self) -> impl Iterator<Item = (UniqueMapKind, UniqueMap)> + '_ {
        self.maps.iter().map(|(k, v)| (*k, *v))
    }

    /// All registered actors, ordered by label.
    pub fn actors(&self) -> impl Iterator<Item = (UniqueActorKind, ActorId)> + '_ {
        self.actors.iter().map(|(k, v)| (*k, *v))
    }
}
