//! Performance benchmarks for the property deal engine
//!
//! Measures full games between random controllers using Criterion.rs, in
//! two iteration modes:
//!
//! 1. **Fresh** - deal a new game for each iteration
//! 2. **Snapshot** - clone a dealt game each iteration, skipping the setup
//!
//! Build without the default `verbose-logging` feature to measure the
//! engine without event formatting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use property_deal_rs::{
    core::PlayerId,
    game::{GameLoop, GameResult, GameState, PlayerController, RandomController, VerbosityLevel},
    loader::GameInitializer,
};

fn controllers(ids: &[PlayerId], seed: u64) -> Vec<Box<dyn PlayerController>> {
    ids.iter()
        .enumerate()
        .map(|(i, &id)| Box::new(RandomController::with_seed(id, seed + i as u64)) as Box<dyn PlayerController>)
        .collect()
}

fn play(game: &mut GameState, ids: &[PlayerId], seed: u64) -> GameResult {
    game.log.set_enabled(false);
    GameLoop::new(game)
        .with_verbosity(VerbosityLevel::Silent)
        .with_max_turns(1000)
        .run_game(&mut controllers(ids, seed))
        .unwrap()
}

fn bench_game_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    for seats in [2usize, 4] {
        group.bench_with_input(BenchmarkId::new("fresh", seats), &seats, |b, &seats| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let (mut game, ids) = GameInitializer::new("bench").with_seed(seed).init_numbered(seats).unwrap();
                black_box(play(&mut game, &ids, seed))
            });
        });
    }
    group.finish();
}

fn bench_game_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    let seed = 42u64;
    let (dealt, ids) = GameInitializer::new("bench").with_seed(seed).init_numbered(2).unwrap();

    group.bench_function(BenchmarkId::new("snapshot", seed), |b| {
        b.iter(|| {
            let mut game = dealt.clone();
            black_box(play(&mut game, &ids, seed))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_game_fresh, bench_game_snapshot);
criterion_main!(benches);
