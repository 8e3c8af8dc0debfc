//! Command-line front end for the adversarial spawner.
//!
//! # Usage
//!
//! Show where the spawner would put the next tile on a saved board:
//!
//! ```sh
//! evil2048 spawn --snapshot board.json
//! ```
//!
//! Build a random board with 6 tiles from a fixed seed, spawn into it and print the
//! resulting snapshot as JSON:
//!
//! ```sh
//! evil2048 spawn --size 4 --fill 6 --seed 42 --json
//! ```
//!
//! Let the spawner fill an empty board on its own:
//!
//! ```sh
//! evil2048 play --size 4 --turns 10
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to see the spawner's decisions.

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use evil2048_core::{Grid, Snapshot, SnapshotError, Tile};
use evil2048_spawner::{AdversarialSpawner, SpawnerOptions, TieBreak, candidate_cells};
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the next adversarial tile for a board.
    Spawn(SpawnArgs),
    /// Fill an empty board with adversarial tiles.
    Play(PlayArgs),
}

#[derive(Debug, Args)]
struct SpawnArgs {
    /// Board snapshot (JSON) to load instead of generating a random board.
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Size of the generated board.
    #[arg(long, value_name = "N", default_value_t = 4, conflicts_with = "snapshot")]
    size: usize,

    /// Number of random tiles on the generated board.
    #[arg(long, value_name = "COUNT", default_value_t = 0, conflicts_with = "snapshot")]
    fill: usize,

    /// Seed for the generated board.
    #[arg(long, value_name = "SEED", conflicts_with = "snapshot")]
    seed: Option<u64>,

    /// Print the board after spawning as a JSON snapshot.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    spawner: SpawnerArgs,
}

#[derive(Debug, Args)]
struct PlayArgs {
    /// Board size.
    #[arg(long, value_name = "N", default_value_t = 4)]
    size: usize,

    /// Stop after this many tiles even if the board is not full.
    #[arg(long, value_name = "COUNT")]
    turns: Option<usize>,

    #[command(flatten)]
    spawner: SpawnerArgs,
}

#[derive(Debug, Args)]
struct SpawnerArgs {
    /// How to rank cells whose neighbour sums are equal.
    #[arg(long, value_name = "RULE", default_value = "occupied-neighbors")]
    tie_break: TieBreakArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    OccupiedNeighbors,
    ScanOrder,
}

impl SpawnerArgs {
    fn build(&self) -> AdversarialSpawner {
        let tie_break = match self.tie_break {
            TieBreakArg::OccupiedNeighbors => TieBreak::OccupiedNeighbors,
            TieBreakArg::ScanOrder => TieBreak::ScanOrder,
        };
        AdversarialSpawner::with_options(SpawnerOptions { tie_break })
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("failed to read snapshot: {_0}")]
    Io(#[from] std::io::Error),
    #[display("failed to decode snapshot: {_0}")]
    Json(#[from] serde_json::Error),
    #[display("invalid snapshot: {_0}")]
    Snapshot(#[from] SnapshotError),
    #[display("board size must be between 1 and {max}, got {size}")]
    InvalidSize { size: usize, max: usize },
}

fn main() {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Spawn(args) => run_spawn(args),
        Command::Play(args) => run_play(args),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn check_size(size: usize) -> Result<(), CliError> {
    if size == 0 || size > Grid::MAX_SIZE {
        return Err(CliError::InvalidSize {
            size,
            max: Grid::MAX_SIZE,
        });
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Grid, CliError> {
    let text = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&text)?;
    let grid = Grid::from_snapshot(&snapshot)?;
    log::info!("loaded {0}x{0} board from {1}", grid.size(), path.display());
    Ok(grid)
}

fn random_board(size: usize, fill: usize, seed: u64) -> Grid {
    log::info!("generating {size}x{size} board with {fill} tiles, seed={seed}");
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut grid = Grid::new(size);
    for _ in 0..fill {
        let Some(pos) = grid.random_available_cell(&mut rng) else {
            log::warn!("board is full after {} tiles", grid.tiles().count());
            break;
        };
        let value = [2_u32, 4].choose(&mut rng).copied().unwrap_or(2);
        grid.insert_tile(Tile::new(pos, value));
    }
    grid
}

fn run_spawn(args: &SpawnArgs) -> Result<(), CliError> {
    let mut grid = match &args.snapshot {
        Some(path) => load_snapshot(path)?,
        None => {
            check_size(args.size)?;
            let seed = args.seed.unwrap_or_else(rand::random);
            random_board(args.size, args.fill, seed)
        }
    };
    let spawner = args.spawner.build();

    if !args.json {
        println!("Board:");
        print_board(&grid);
        println!();
        let candidates = candidate_cells(&grid)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        println!("Candidates:");
        println!("  {}", candidates.join(" "));
        println!();
    }

    let spawned = spawner.spawn_into(&mut grid);
    if args.json {
        let json = serde_json::to_string_pretty(&grid.serialize())?;
        println!("{json}");
        return Ok(());
    }

    match spawned {
        Some(tile) => {
            println!("Spawned:");
            println!("  {} at {}", tile.value(), tile.position());
            println!();
            println!("Result:");
            print_board(&grid);
        }
        None => println!("Board is full, nothing to spawn."),
    }
    Ok(())
}

fn run_play(args: &PlayArgs) -> Result<(), CliError> {
    check_size(args.size)?;
    let spawner = args.spawner.build();
    let mut grid = Grid::new(args.size);
    let turns = args.turns.unwrap_or(usize::MAX);

    let mut turn = 0;
    while turn < turns {
        let Some(tile) = spawner.spawn_into(&mut grid) else {
            break;
        };
        turn += 1;
        println!("Turn {turn}: {} at {}", tile.value(), tile.position());
        print_board(&grid);
        println!();
    }
    log::info!("placed {turn} tiles");
    if !grid.cells_available() {
        println!("Board is full.");
    }
    Ok(())
}

fn print_board(grid: &Grid) {
    for line in grid.to_string().lines() {
        println!("  {line}");
    }
}
