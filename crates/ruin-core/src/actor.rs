use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::map::MapId;

/// Index of an actor in the world's actor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor {}", self.0)
    }
}

/// The hand-designed characters seeded into every world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueActorKind {
    /// Axe-wielding psychopath hiding indoors.
    JasonMyers,
    /// Retired boxer.
    BigBear,
    /// Martial artist.
    FamuFataru,
    /// A department store Santa who kept the suit.
    Santaman,
    /// A developer lost in his own game.
    Roguedjack,
    /// The thing that lives in the sewers.
    SewersThing,
}

impl UniqueActorKind {
    /// Every unique actor, in generation order.
    pub const ALL: [UniqueActorKind; 6] = [
        Self::JasonMyers,
        Self::BigBear,
        Self::FamuFataru,
        Self::Santaman,
        Self::Roguedjack,
        Self::SewersThing,
    ];

    /// In-game name.
    pub fn name(self) -> &'static str {
        match self {
            Self::JasonMyers => "Jason Myers",
            Self::BigBear => "Big Bear",
            Self::FamuFataru => "Famu Fataru",
            Self::Santaman => "Santaman",
            Self::Roguedjack => "Roguedjack",
            Self::SewersThing => "The Sewers Thing",
        }
    }
}

impl fmt::Display for UniqueActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A character standing somewhere in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Map the actor stands on.
    pub map: MapId,
    /// Tile the actor stands on.
    pub position: Point,
    /// Cannot be harmed until revealed in play.
    pub invulnerable: bool,
    /// The player's character.
    pub is_player: bool,
    /// Which unique character this is, if any.
    pub unique: Option<UniqueActorKind>,
}

impl Actor {
    /// An ordinary, vulnerable actor.
    pub fn new(name: impl Into<String>, map: MapId, position: Point) -> Self {
        Self {
            name: name.into(),
            map,
            position,
            invulnerable: false,
            is_player: false,
            unique: None,
        }
    }
}
