//! Core types for Ruin: districts, map layers, exits, and the world model.
//!
//! This crate defines the aggregate that the generator in `ruin-gen` builds.
//! It knows nothing about how maps are laid out; it only stores them and
//! answers the tile queries (walkability, obstruction, zones, exits) that the
//! generation pipeline needs.

/// Actors placed into the world, including the named unique characters.
pub mod actor;
/// Districts: one cell of the world grid and its map layers.
pub mod district;
/// Error types used throughout the crate.
pub mod error;
/// Points and rectangles in tile or grid space.
pub mod geometry;
/// Tile maps, zones, objects, and exits.
pub mod map;
/// Singleton handles to hand-designated maps and actors.
pub mod unique;
/// The world aggregate that owns districts, maps, and actors.
pub mod world;

/// Re-export actor types.
pub use actor::{Actor, ActorId, UniqueActorKind};
/// Re-export district types.
pub use district::{District, DistrictKind};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export geometry types.
pub use geometry::{Point, Rect};
/// Re-export map types.
pub use map::{Exit, Layer, Map, MapId, MapObject, Tile, Zone};
/// Re-export unique handle types.
pub use unique::{UniqueMap, UniqueMapKind, UniqueRegistry};
/// Re-export world model types.
pub use world::{Weather, World};
