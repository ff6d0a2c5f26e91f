// Fretwise — CLI entry point.
//
// Reads an ASCII tab file, refingers it for minimal fretting-hand travel,
// and prints (or writes) the optimized tab. The pipeline: parse → initial
// assignment → SA refinement → render.
//
// Usage:
//   refret <tab-file> [--output FILE] [--midi FILE] [--tuning 64,59,55,50,45,40]
//     [--max-fret N] [--width N] [--neck-length INCHES] [--string-spacing INCHES]
//     [--iterations N] [--seed N] [--tempo BPM] [--params FILE] [--parse-only]

use fretwise::distance::travel_distance;
use fretwise::fretboard::Fretboard;
use fretwise::midi::write_midi;
use fretwise::neighbor::adjacent_string_move;
use fretwise::playing::Playing;
use fretwise::render::render;
use fretwise::sa::{SAConfig, solve};
use fretwise::song::STANDARD_TUNING;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Parse arguments
    let Some(input) = args.get(1).filter(|s| !s.starts_with("--")) else {
        eprintln!("Usage: refret <tab-file> [--output FILE] [--midi FILE] [--tuning P,P,...]");
        eprintln!("  [--max-fret N] [--width N] [--neck-length INCHES] [--string-spacing INCHES]");
        eprintln!("  [--iterations N] [--seed N] [--tempo BPM] [--params FILE] [--parse-only]");
        std::process::exit(1);
    };
    let tuning = match parse_flag::<String>(&args, "--tuning") {
        Some(text) => match parse_tuning(&text) {
            Some(tuning) => tuning,
            None => {
                eprintln!("Bad tuning '{}': expected comma-separated MIDI pitches", text);
                std::process::exit(1);
            }
        },
        None => STANDARD_TUNING.to_vec(),
    };
    let max_fret: u8 = parse_flag(&args, "--max-fret").unwrap_or(24);
    let width: usize = parse_flag(&args, "--width").unwrap_or(80);
    let neck_length: f64 = parse_flag(&args, "--neck-length").unwrap_or(26.0);
    let string_spacing: f64 = parse_flag(&args, "--string-spacing").unwrap_or(0.35);
    let seed: Option<u64> = parse_flag(&args, "--seed");
    let tempo: u16 = parse_flag(&args, "--tempo").unwrap_or(120);
    let midi_path: Option<String> = parse_flag(&args, "--midi");
    let output_path: Option<String> = parse_flag(&args, "--output");
    let parse_only = args.iter().any(|a| a == "--parse-only");

    let mut config = match parse_flag::<String>(&args, "--params") {
        Some(path) => match SAConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SAConfig::default(),
    };
    if let Some(iterations) = parse_flag(&args, "--iterations") {
        config.iterations = iterations;
    }

    let tab = match std::fs::read_to_string(input) {
        Ok(tab) => tab,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input, e);
            std::process::exit(1);
        }
    };
    let song = match fretwise::parse(&tab, &tuning) {
        Ok(song) => song,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // --parse-only prints the parsed song as JSON and nothing else.
    if parse_only {
        match serde_json::to_string_pretty(&song) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("=== Fretwise ===");
    println!("Input: {}", input);
    println!("Tuning: {:?}", tuning);
    println!("Max fret: {}", max_fret);
    println!("Iterations: {}", config.iterations);
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    println!("[1/4] Parsing tab...");
    println!("  {} measures, {} notes.", song.measures.len(), song.note_count());

    if let Some(path) = &midi_path {
        match write_midi(&song, tempo, Path::new(path)) {
            Ok(()) => println!("  MIDI written to {} ({} BPM).", path, tempo),
            Err(e) => {
                eprintln!("  Error writing MIDI: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Initialize RNG
    let mut rng = if let Some(s) = seed {
        StdRng::seed_from_u64(s)
    } else {
        StdRng::from_os_rng()
    };

    println!("[2/4] Assigning initial fingering...");
    let fretboard = Fretboard::new(tuning, max_fret, neck_length, string_spacing);
    let start = match Playing::assign(&song, &fretboard) {
        Ok(playing) => playing,
        Err(e) => {
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    let before = travel_distance(&start, &fretboard);
    println!("  Hand travel: {:.2} in.", before);

    println!("[3/4] Refining with simulated annealing...");
    let result = solve(
        start,
        &config,
        |playing, rng| adjacent_string_move(playing, &fretboard, rng),
        |playing| travel_distance(playing, &fretboard),
        &mut rng,
    );
    println!("  Iterations: {}", result.iterations);
    println!("  Accepted: {} ({:.1}%)",
        result.accepted,
        if result.iterations > 0 { result.accepted as f64 / result.iterations as f64 * 100.0 } else { 0.0 });
    println!("  Hand travel: {:.2} -> {:.2} in ({:+.2})",
        before, result.score, result.score - before);

    println!("[4/4] Rendering tab...");
    let text = match render(&result.solution, &song, &fretboard, width) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    match &output_path {
        Some(path) => match std::fs::write(path, &text) {
            Ok(()) => println!("  Tab written to {}.", path),
            Err(e) => {
                eprintln!("  Error writing {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!();
            print!("{}", text);
        }
    }
}

fn parse_tuning(text: &str) -> Option<Vec<i32>> {
    let mut tuning = Vec::new();
    for part in text.split(',') {
        tuning.push(part.trim().parse().ok()?);
    }
    Some(tuning)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
