use ruin_core::{Point, UniqueActorKind, World};
use tracing::info;

use crate::assembly::{create_district, create_world, generate_facility, link_district};
use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::factory::MapFactory;
use crate::finishing::{
    place_decorations, place_player, place_unique_actor, place_unique_items, reveal_start_map,
};
use crate::layout::BlockFactory;
use crate::state::{GenState, GenStats};
use crate::task::{NoProgress, ProgressListener, TaskQueue};

/// The top-level generation orchestrator.
///
/// Owns the world under construction, the dice, and the queued program.
/// The program is fixed at construction; [`step`](Self::step) drains one
/// time slice of it.
pub struct WorldGenerator {
    state: GenState,
    queue: TaskQueue<GenState, GenError>,
    failed: bool,
}

impl std::fmt::Debug for WorldGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldGenerator")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("failed", &self.failed)
            .finish()
    }
}

impl WorldGenerator {
    /// Create a generator for `config` laying maps out with `factory`.
    pub fn new(config: GenConfig, factory: Box<dyn MapFactory>) -> GenResult<Self> {
        config.validate()?;
        let queue = program(&config);
        Ok(Self {
            state: GenState::new(config, factory),
            queue,
            failed: false,
        })
    }

    /// Create a generator using the built-in [`BlockFactory`].
    pub fn with_block_factory(config: GenConfig) -> GenResult<Self> {
        Self::new(config, Box::new(BlockFactory))
    }

    /// Run one scheduler iteration. Returns `true` once the world is done.
    ///
    /// After any step fails, every further call returns
    /// [`GenError::Aborted`].
    pub fn step(&mut self, progress: &mut dyn ProgressListener) -> GenResult<bool> {
        if self.failed {
            return Err(GenError::Aborted);
        }
        match self.queue.step(&mut self.state, progress) {
            Ok(done) => {
                if done {
                    info!(
                        maps = self.state.world.maps().len(),
                        actors = self.state.world.actors().len(),
                        passages = self.state.stats.total(),
                        "world generated"
                    );
                }
                Ok(done)
            }
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    /// Step until the program is drained.
    pub fn run_to_completion(&mut self, progress: &mut dyn ProgressListener) -> GenResult<()> {
        while !self.step(progress)? {}
        Ok(())
    }

    /// `(done, total)` task counts.
    pub fn progress(&self) -> (usize, usize) {
        self.queue.progress()
    }

    /// Whether every step has run.
    pub fn is_complete(&self) -> bool {
        !self.failed && self.queue.is_complete()
    }

    /// The world as built so far.
    pub fn world(&self) -> &World {
        &self.state.world
    }

    /// Passages written so far.
    pub fn stats(&self) -> GenStats {
        self.state.stats
    }

    /// Hand over the finished world.
    pub fn finish(self) -> GenResult<World> {
        if self.failed {
            return Err(GenError::Aborted);
        }
        if !self.queue.is_complete() {
            return Err(GenError::Incomplete);
        }
        Ok(self.state.world)
    }
}

/// Generate a whole world with the built-in factory, without progress.
pub fn generate(config: GenConfig) -> GenResult<World> {
    let mut generator = WorldGenerator::with_block_factory(config)?;
    generator.run_to_completion(&mut NoProgress)?;
    generator.finish()
}

/// The fixed generation program for `config`.
fn program(config: &GenConfig) -> TaskQueue<GenState, GenError> {
    let mut queue = TaskQueue::new(config.time_budget());
    let size = config.size as i32;
    let cells = move || (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)));

    queue.category("Creating empty world", create_world);

    queue.category_start("Creating districts");
    for (x, y) in cells() {
        queue.action(move |s| create_district(s, Point::new(x, y)));
    }
    queue.category_end(Some("Districts created"));

    queue.category("Generating unique maps", generate_facility);

    queue.category_start("Generating unique actors");
    for kind in UniqueActorKind::ALL {
        queue.action(move |s| place_unique_actor(s, kind));
    }
    queue.category_end(Some("Unique actors placed"));

    queue.category_start("Linking districts");
    for (x, y) in cells() {
        queue.action(move |s| link_district(s, Point::new(x, y)));
    }
    queue.category_end(Some("Districts linked"));

    queue.category_start("Finishing");
    queue.action(place_unique_items);
    queue.action(place_decorations);
    queue.action(place_player);
    queue.action(reveal_start_map);
    queue.category_end(Some("World ready"));

    queue
}
