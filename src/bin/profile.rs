//! Profiling binary for game execution
//!
//! Runs random games in a tight loop for cargo-flamegraph. Unlike the
//! Criterion benchmarks this has almost no harness overhead.
//!
//! Usage:
//!   cargo flamegraph --bin profile
//!   PROFILE_ITERATIONS=5000 PROFILE_PLAYERS=4 cargo run --release --bin profile

use property_deal_rs::{
    game::{GameLoop, PlayerController, RandomController, VerbosityLevel},
    loader::GameInitializer,
};

fn env_or(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    let iterations = env_or("PROFILE_ITERATIONS", 1000);
    let seats = env_or("PROFILE_PLAYERS", 2);
    let seed = 42u64;

    println!("Profiling game execution...");
    println!("Running {iterations} games with {seats} players, seed {seed}\n");

    let mut turns = 0u64;
    for i in 0..iterations {
        let game_seed = seed.wrapping_add(i as u64);
        let (mut game, ids) = GameInitializer::new("profile").with_seed(game_seed).init_numbered(seats)?;
        game.log.set_enabled(false);

        let mut controllers: Vec<Box<dyn PlayerController>> = ids
            .iter()
            .enumerate()
            .map(|(seat, &id)| {
                Box::new(RandomController::with_seed(id, game_seed + seat as u64)) as Box<dyn PlayerController>
            })
            .collect();

        let result = GameLoop::new(&mut game)
            .with_verbosity(VerbosityLevel::Silent)
            .run_game(&mut controllers)?;
        turns += result.turns_played as u64;

        if (i + 1) % 100 == 0 {
            println!("Completed {} games", i + 1);
        }
    }

    println!("\nProfiling complete! {iterations} games, {turns} turns.");
    Ok(())
}
