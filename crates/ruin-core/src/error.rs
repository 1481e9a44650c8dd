use crate::geometry::Point;
use crate::map::MapId;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested map ID does not exist in the world.
    #[error("map not found: {0}")]
    MapNotFound(MapId),

    /// A district coordinate lies outside the world grid.
    #[error("district {pos} is outside a {size}x{size} world")]
    DistrictOutOfBounds {
        /// The offending coordinate.
        pos: Point,
        /// The grid size.
        size: u32,
    },

    /// An exit was placed further than one tile outside the map.
    #[error("exit at {pos} is out of range for map {map}")]
    ExitOutOfRange {
        /// The map the exit was written to.
        map: MapId,
        /// The exit's source tile.
        pos: Point,
    },

    /// A unique handle was registered twice.
    #[error("unique \"{0}\" is already set")]
    UniqueAlreadySet(String),

    /// The requested actor index does not exist.
    #[error("actor not found: {0}")]
    ActorNotFound(usize),
}
