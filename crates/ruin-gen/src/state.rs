use std::fmt;

use ruin_core::{MapId, Point, World};
use serde::Serialize;

use crate::config::GenConfig;
use crate::dice::Dice;
use crate::factory::MapFactory;
use crate::link::Linker;
use crate::seed::cosmetic_seed;

/// Passage pairs written during a run, by layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenStats {
    /// Street level pairs.
    pub street_pairs: usize,
    /// Sewers pairs.
    pub sewer_pairs: usize,
    /// Subway pairs.
    pub subway_pairs: usize,
}

impl GenStats {
    /// Pairs across every layer.
    pub fn total(&self) -> usize {
        self.street_pairs + self.sewer_pairs + self.subway_pairs
    }
}

/// Mutable state handed to each queued generation step.
pub struct GenState {
    /// The world under construction.
    pub world: World,
    /// Structural random source; every layout decision draws from it.
    pub dice: Dice,
    /// Separate source for cosmetic choices such as the player's name.
    pub cosmetic: Dice,
    /// Run configuration.
    pub config: GenConfig,
    /// Lays out individual maps.
    pub factory: Box<dyn MapFactory>,
    /// Writes passages between maps.
    pub linker: Linker,
    /// Grid cell reserved for the police station.
    pub police_cell: Point,
    /// Grid cell reserved for the hospital.
    pub hospital_cell: Point,
    /// Surface map and tile leading down into the underground facility.
    pub facility_anchor: Option<(MapId, Point)>,
    /// Passages written so far.
    pub stats: GenStats,
}

impl fmt::Debug for GenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenState")
            .field("seed", &self.config.seed)
            .field("size", &self.world.size())
            .field("maps", &self.world.maps().len())
            .field("police_cell", &self.police_cell)
            .field("hospital_cell", &self.hospital_cell)
            .field("facility_anchor", &self.facility_anchor)
            .field("stats", &self.stats)
            .finish()
    }
}

impl GenState {
    /// Fresh state for `config`. The world is empty until the first step
    /// of the program creates it.
    pub fn new(config: GenConfig, factory: Box<dyn MapFactory>) -> Self {
        Self {
            world: World::new(config.seed, config.size),
            dice: Dice::new(config.seed),
            cosmetic: Dice::new(cosmetic_seed(config.seed)),
            linker: Linker::new(config.exit_chance),
            config,
            factory,
            police_cell: Point::new(0, 0),
            hospital_cell: Point::new(0, 0),
            facility_anchor: None,
            stats: GenStats::default(),
        }
    }
}
