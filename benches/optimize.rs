// Benchmarks for the refingering pipeline: parsing, scoring, and a full
// annealing run over a repeated riff.
//
// Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fretwise::distance::travel_distance;
use fretwise::fretboard::Fretboard;
use fretwise::neighbor::adjacent_string_move;
use fretwise::playing::Playing;
use fretwise::sa::{SAConfig, solve};
use fretwise::song::STANDARD_TUNING;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RIFF: &str = "\
|-------5-------|-----7-|
|-----5---5-----|-7-----|
|---7-------7---|-------|
|-0-------------|-------|
|---------------|---3---|
|---------------|-------|";

fn riff_tab(blocks: usize) -> String {
    vec![RIFF; blocks].join("\n\n")
}

fn standard_fretboard() -> Fretboard {
    Fretboard::new(STANDARD_TUNING.to_vec(), 24, 26.0, 0.35)
}

/// Benchmark tab parsing over a 64-block song.
fn bench_parse(c: &mut Criterion) {
    let tab = riff_tab(64);
    c.bench_function("parse_64_blocks", |b| {
        b.iter(|| fretwise::parse(black_box(&tab), &STANDARD_TUNING).unwrap())
    });
}

/// Benchmark the travel-distance scorer on an assigned fingering.
fn bench_travel_distance(c: &mut Criterion) {
    let song = fretwise::parse(&riff_tab(64), &STANDARD_TUNING).unwrap();
    let fretboard = standard_fretboard();
    let playing = Playing::assign(&song, &fretboard).unwrap();
    c.bench_function("travel_distance_64_blocks", |b| {
        b.iter(|| travel_distance(black_box(&playing), &fretboard))
    });
}

/// Benchmark a 10k-iteration annealing run on an 8-block song.
fn bench_solve(c: &mut Criterion) {
    let song = fretwise::parse(&riff_tab(8), &STANDARD_TUNING).unwrap();
    let fretboard = standard_fretboard();
    let playing = Playing::assign(&song, &fretboard).unwrap();
    let config = SAConfig {
        iterations: 10_000,
        ..SAConfig::default()
    };
    c.bench_function("solve_10k_iterations", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            solve(
                black_box(playing.clone()),
                &config,
                |p, rng| adjacent_string_move(p, &fretboard, rng),
                |p| travel_distance(p, &fretboard),
                &mut rng,
            )
        })
    });
}

criterion_group!(benches, bench_parse, bench_travel_distance, bench_solve);
criterion_main!(benches);
