//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Fixed-depth alpha-beta on 5x5 and 7x7 boards, with and without the cache
//! - Monte Carlo tree search with varying iteration counts
//! - Canonical key computation for the symmetric cache

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isolation::config::EngineConfig;
use isolation::eval::Heuristic;
use isolation::search::{MctsConfig, MctsSearch, Searcher, SymmetricTranspositionCache, Unlimited};
use isolation::{Board, Player, Pos};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Both players placed near the centre, nothing else blocked
fn opening(size: usize) -> Board {
    let mid = (size / 2) as u8;
    Board::from_parts(
        size,
        size,
        &[],
        Some(Pos::new(mid, mid)),
        Some(Pos::new(0, 0)),
        Player::One,
    )
    .expect("valid opening")
}

// =============================================================================
// Alpha-Beta
// =============================================================================

fn bench_alphabeta_depths(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_depth");

    for size in [5, 7] {
        let board = opening(size);
        for depth in [2u32, 4] {
            for cache in [true, false] {
                let id = format!("{size}x{size}/cache={cache}");
                group.bench_with_input(BenchmarkId::new(id, depth), &depth, |b, &depth| {
                    let config = EngineConfig::for_testing()
                        .with_heuristic(Heuristic::ExtendedMobility)
                        .with_cache(cache);
                    let mut searcher = Searcher::new(&config);
                    b.iter(|| {
                        black_box(searcher.alpha_beta(
                            black_box(&board),
                            depth,
                            f64::NEG_INFINITY,
                            f64::INFINITY,
                            &Unlimited,
                        ))
                    });
                });
            }
        }
    }

    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_heuristic");
    let board = opening(7);

    for heuristic in [Heuristic::Mobility, Heuristic::ExtendedMobility, Heuristic::Distance] {
        group.bench_function(heuristic.name(), |b| {
            let mut searcher = Searcher::new(&EngineConfig::for_testing().with_heuristic(heuristic));
            b.iter(|| {
                black_box(searcher.alpha_beta(&board, 3, f64::NEG_INFINITY, f64::INFINITY, &Unlimited))
            });
        });
    }

    group.finish();
}

// =============================================================================
// Monte Carlo
// =============================================================================

fn bench_mcts_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_iterations");
    let board = opening(7);

    for iterations in [100u32, 400, 1600] {
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(BenchmarkId::new("7x7", iterations), &iterations, |b, &n| {
            let search = MctsSearch::new(MctsConfig::for_testing().with_iterations(n));
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| black_box(search.run(&board, Player::One, &mut rng, &Unlimited)));
        });
    }

    group.finish();
}

// =============================================================================
// Symmetric cache
// =============================================================================

fn bench_canonical_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_key");
    let cache = SymmetricTranspositionCache::default();

    for size in [5, 7, 12] {
        let board = opening(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &board, |b, board| {
            b.iter(|| black_box(cache.canonical_key(black_box(board))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_alphabeta_depths,
    bench_heuristics,
    bench_mcts_iterations,
    bench_canonical_key,
);
criterion_main!(benches);
