pub mod generate;
pub mod map;

use colored::Colorize;
use ruin_core::World;
use ruin_gen::{GenConfig, GenStats, ProgressListener, WorldGenerator};
use tracing::debug;

/// Prints category labels on stderr while the generator runs.
struct ConsoleProgress;

impl ProgressListener for ConsoleProgress {
    fn category_started(&mut self, label: &str) {
        eprintln!("  {} {label}...", "::".cyan());
    }

    fn category_finished(&mut self, _category: &str, completion: Option<&str>) {
        if let Some(done) = completion {
            eprintln!("  {} {done}", "ok".green());
        }
    }

    fn yielded(&mut self, done: usize, total: usize) {
        debug!(done, total, "generation step");
    }
}

/// Run the generator to completion, reporting progress on stderr.
fn build_world(config: GenConfig) -> Result<(World, GenStats), String> {
    debug!(?config, "generating");
    let mut generator = WorldGenerator::with_block_factory(config).map_err(|e| e.to_string())?;
    generator
        .run_to_completion(&mut ConsoleProgress)
        .map_err(|e| format!("generation failed: {e}"))?;
    let stats = generator.stats();
    let world = generator.finish().map_err(|e| e.to_string())?;
    Ok((world, stats))
}
