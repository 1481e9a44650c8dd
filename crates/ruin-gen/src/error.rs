use ruin_core::WorldError;

/// Alias for `Result<T, GenError>`.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort world generation. None of them are recoverable: a
/// fresh run (same or different seed) is the only way forward.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The configuration cannot produce a world.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No business district has an office to anchor the underground facility.
    #[error("no business district contains an office zone to anchor the underground facility")]
    NoFacilityAnchor,

    /// A unique actor, item, or the player found no valid tile.
    #[error("could not place {0}")]
    PlacementFailed(String),

    /// The map factory failed to lay out a map.
    #[error("layout error: {0}")]
    Layout(String),

    /// The world was requested before the program finished.
    #[error("generation has not finished")]
    Incomplete,

    /// A previous step failed; the half-built world is discarded.
    #[error("generation was aborted by an earlier failure")]
    Aborted,

    /// The world aggregate rejected an operation.
    #[error(transparent)]
    World(#[from] WorldError),
}
