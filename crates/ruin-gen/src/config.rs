use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};
use crate::seed::MAX_WORLD_SIZE;

/// Smallest grid side: two distinct cells are needed for the police
/// station and the hospital.
pub const MIN_WORLD_SIZE: u32 = 2;
/// Smallest map side: street maps get at least two rows and two columns of
/// full-size blocks, so the civic buildings never take a district's only
/// block.
pub const MIN_MAP_SIZE: i32 = 21;
/// Largest map side.
pub const MAX_MAP_SIZE: i32 = 200;

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Master seed; every structural choice derives from it.
    pub seed: u64,
    /// Side of the square district grid.
    pub size: u32,
    /// Width of street, sewers, and subway maps.
    pub map_width: i32,
    /// Height of street, sewers, and subway maps.
    pub map_height: i32,
    /// Percent chance that a shared street edge tile gets a passage.
    pub exit_chance: i32,
    /// Wall-clock budget of one scheduler step, in milliseconds.
    pub time_budget_ms: u64,
    /// Mark the player's starting building and the outdoors of the
    /// starting map as already seen.
    pub reveal_start_map: bool,
    /// How strongly a district kind favors its building type.
    pub kind_factor: i32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            size: 5,
            map_width: 50,
            map_height: 50,
            exit_chance: 50,
            time_budget_ms: 100,
            reveal_start_map: true,
            kind_factor: 8,
        }
    }
}

impl GenConfig {
    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the grid side.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the dimensions of every district map.
    pub fn with_map_size(mut self, width: i32, height: i32) -> Self {
        self.map_width = width;
        self.map_height = height;
        self
    }

    /// Set the street exit chance per tile (clamped to 0-100).
    pub fn with_exit_chance(mut self, percent: i32) -> Self {
        self.exit_chance = percent.clamp(0, 100);
        self
    }

    /// Set the scheduler time slice.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = budget.as_millis() as u64;
        self
    }

    /// Enable or disable the starting-map reveal.
    pub fn with_reveal_start_map(mut self, reveal: bool) -> Self {
        self.reveal_start_map = reveal;
        self
    }

    /// The scheduler time slice.
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Reject configurations that cannot produce a world.
    pub fn validate(&self) -> GenResult<()> {
        if !(MIN_WORLD_SIZE..=MAX_WORLD_SIZE).contains(&self.size) {
            return Err(GenError::InvalidConfig(format!(
                "world size {} is outside {MIN_WORLD_SIZE}..={MAX_WORLD_SIZE}",
                self.size
            )));
        }
        for (label, value) in [("width", self.map_width), ("height", self.map_height)] {
            if !(MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&value) {
                return Err(GenError::InvalidConfig(format!(
                    "map {label} {value} is outside {MIN_MAP_SIZE}..={MAX_MAP_SIZE}"
                )));
            }
        }
        if !(0..=100).contains(&self.exit_chance) {
            return Err(GenError::InvalidConfig(format!(
                "exit chance {} is not a percentage",
                self.exit_chance
            )));
        }
        if self.kind_factor < 1 {
            return Err(GenError::InvalidConfig(
                "kind factor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = GenConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.size, 5);
        assert_eq!(config.exit_chance, 50);
        assert_eq!(config.time_budget(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = GenConfig::default()
            .with_seed(123)
            .with_size(3)
            .with_map_size(30, 40)
            .with_exit_chance(250)
            .with_reveal_start_map(false);
        assert_eq!(config.seed, 123);
        assert_eq!(config.size, 3);
        assert_eq!((config.map_width, config.map_height), (30, 40));
        assert_eq!(config.exit_chance, 100);
        assert!(!config.reveal_start_map);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(GenConfig::default().with_size(1).validate().is_err());
        assert!(GenConfig::default().with_size(33).validate().is_err());
        assert!(
            GenConfig::default()
                .with_map_size(8, 50)
                .validate()
                .is_err()
        );
        assert!(
            GenConfig::default()
                .with_map_size(50, MIN_MAP_SIZE - 1)
                .validate()
                .is_err()
        );
        assert!(
            GenConfig::default()
                .with_map_size(MIN_MAP_SIZE, MIN_MAP_SIZE)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GenConfig = serde_json::from_str(r#"{ "seed": 7, "size": 3 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.size, 3);
        assert_eq!(config.map_width, 50);
    }
}
