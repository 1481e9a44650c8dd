//! Deterministic, incremental city generation for Ruin.
//!
//! A [`WorldGenerator`] turns a [`GenConfig`] into a fully linked
//! [`ruin_core::World`]. The work is queued as a linear program on a
//! [`TaskQueue`] and drained a time slice at a time, so a host loop can keep
//! redrawing progress while thousands of generation steps run.
//!
//! Map layouts come from a [`MapFactory`]; [`BlockFactory`] is the built-in
//! one. Everything structural draws from a single seeded [`Dice`], so the
//! same seed always yields the same world.

/// District creation, the underground facility, and grid linking.
pub mod assembly;
/// Configuration for a generation run.
pub mod config;
/// The seeded random source every generation step draws from.
pub mod dice;
/// Error types for the generator crate.
pub mod error;
/// The map factory interface and the per-call parameters it receives.
pub mod factory;
/// Unique actors, unique items, decorations, and the player.
pub mod finishing;
/// Top-level generation orchestrator.
pub mod generator;
/// The built-in block-based map factory.
pub mod layout;
/// Bidirectional passages between adjacent maps.
pub mod link;
/// Per-map seed derivation.
pub mod seed;
/// Mutable state shared by every queued generation step.
pub mod state;
/// Cooperative, time-budgeted task queue.
pub mod task;

/// Re-export of [`config::GenConfig`].
pub use config::GenConfig;
/// Re-export of [`dice::Dice`].
pub use dice::Dice;
/// Re-exports of [`error::GenError`] and [`error::GenResult`].
pub use error::{GenError, GenResult};
/// Re-exports of the factory interface.
pub use factory::{BuildingWeights, MapFactory, MapParams, UndergroundLayout};
/// Re-export of [`generator::WorldGenerator`].
pub use generator::WorldGenerator;
/// Re-export of [`layout::BlockFactory`].
pub use layout::BlockFactory;
/// Re-exports of the linker types.
pub use link::{Edge, Linker};
/// Re-export of [`state::GenStats`].
pub use state::GenStats;
/// Re-exports of the scheduler types.
pub use task::{NoProgress, ProgressListener, TaskQueue, TraceProgress};
