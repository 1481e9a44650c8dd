//! CLI frontend for the Ruin city generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ruin_core::{Layer, Point};
use ruin_gen::GenConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "ruin",
    about = "Ruin: procedural city generator",
    version,
    propagate_version = true
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Parameters of the world to generate.
#[derive(Args, Debug, Clone)]
struct WorldArgs {
    /// Master seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Side of the square district grid
    #[arg(long, default_value = "5")]
    size: u32,

    /// Width of every district map
    #[arg(long, default_value = "50")]
    width: i32,

    /// Height of every district map
    #[arg(long, default_value = "50")]
    height: i32,

    /// Percent chance of a street passage per shared edge tile
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(i32).range(0..=100))]
    exit_chance: i32,

    /// Leave the starting map unexplored
    #[arg(long)]
    no_reveal: bool,
}

impl WorldArgs {
    fn config(&self) -> GenConfig {
        GenConfig::default()
            .with_seed(self.seed)
            .with_size(self.size)
            .with_map_size(self.width, self.height)
            .with_exit_chance(self.exit_chance)
            .with_reveal_start_map(!self.no_reveal)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LayerArg {
    Entry,
    Sewers,
    Subway,
    Underground,
}

impl From<LayerArg> for Layer {
    fn from(arg: LayerArg) -> Self {
        match arg {
            LayerArg::Entry => Layer::Entry,
            LayerArg::Sewers => Layer::Sewers,
            LayerArg::Subway => Layer::Subway,
            LayerArg::Underground => Layer::Underground,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and print a summary of its districts and uniques
    Generate {
        #[command(flatten)]
        world: WorldArgs,

        /// Print a JSON summary instead of tables
        #[arg(long)]
        json: bool,

        /// Write the JSON summary to a file (implies --json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render one map of a district as ASCII
    Map {
        /// District column
        x: i32,

        /// District row
        y: i32,

        /// Which layer of the district to render
        #[arg(short, long, value_enum, default_value = "entry")]
        layer: LayerArg,

        #[command(flatten)]
        world: WorldArgs,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            world,
            json,
            output,
        } => commands::generate::run(world.config(), json, output.as_deref()),
        Commands::Map { x, y, layer, world } => {
            commands::map::run(world.config(), Point::new(x, y), layer.into())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
