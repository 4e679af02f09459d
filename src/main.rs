//! Property Deal - Main Binary
//!
//! Runs games between AI controllers from the command line

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use property_deal_rs::{
    game::{
        GameLoop, PlayerController, RandomController, RuleSet, VerbosityLevel, ZeroController,
    },
    loader::GameInitializer,
    tournament::{run_tournament, TournamentConfig},
};
use std::path::PathBuf;

/// Controller type for AI agents
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Always chooses the first legal intent (for testing)
    Zero,
    /// Makes random choices
    Random,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "deal")]
#[command(about = "Property Deal - card game rules engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between AI controllers and print it
    Play {
        /// Number of participants (2-5)
        #[arg(long, short = 'n', default_value_t = 2)]
        players: usize,

        /// Controller used for every seat
        #[arg(long, value_enum, default_value = "random")]
        controller: ControllerType,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Stop without a winner after this many turns
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,

        /// JSON rule overrides
        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,
    },

    /// Play many silent random games in parallel and report statistics
    Simulate {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Number of participants (2-5)
        #[arg(long, short = 'n', default_value_t = 2)]
        players: usize,

        /// Master seed for the tournament
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 1000)]
        max_turns: u32,

        /// JSON rule overrides
        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,
    },
}

fn load_rules(path: Option<PathBuf>) -> anyhow::Result<RuleSet> {
    match path {
        Some(path) => RuleSet::load_from_file(&path)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => Ok(RuleSet::default()),
    }
}

fn run_play(
    players: usize,
    controller: ControllerType,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    max_turns: u32,
    rules: RuleSet,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let (mut game, ids) = GameInitializer::new("cli")
        .with_rules(rules)
        .with_seed(seed)
        .init_numbered(players)?;

    if verbosity >= VerbosityLevel::Minimal {
        println!("=== Property Deal ===");
        println!("Seed: {seed}, players: {players}\n");
    }

    let mut controllers: Vec<Box<dyn PlayerController>> = ids
        .iter()
        .enumerate()
        .map(|(seat, &id)| -> Box<dyn PlayerController> {
            match controller {
                ControllerType::Zero => Box::new(ZeroController::new(id)),
                ControllerType::Random => Box::new(RandomController::with_seed(id, seed.wrapping_add(seat as u64 + 1))),
            }
        })
        .collect();

    let result = GameLoop::new(&mut game)
        .with_verbosity(verbosity)
        .with_max_turns(max_turns)
        .run_game(&mut controllers)?;

    game.check_conservation()?;
    if verbosity >= VerbosityLevel::Normal {
        println!("\nEnded after {} turns: {}", result.turns_played, result.end_reason);
        for player in &game.players {
            println!(
                "  {}: {} complete set(s), {}M in bank",
                player.name,
                player.complete_set_count(),
                player.bank_value(&game.cards)
            );
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            players,
            controller,
            seed,
            verbosity,
            max_turns,
            rules,
        } => {
            let rules = load_rules(rules)?;
            run_play(players, controller, seed, verbosity.into(), max_turns, rules)?;
        }
        Commands::Simulate {
            games,
            players,
            seed,
            max_turns,
            rules,
        } => {
            if games == 0 {
                bail!("--games must be at least 1");
            }
            let config = TournamentConfig {
                games,
                players,
                seed,
                max_turns,
                rules: load_rules(rules)?,
            };
            println!("Running {games} games with {players} players (seed {seed})...\n");
            let report = run_tournament(&config)?;
            println!("{report}");
        }
    }

    Ok(())
}
