// Fretwise
//
// A guitar tablature refingering tool. Reads free-form ASCII tab, recovers
// the notes behind it, and searches for a fingering that minimizes how far
// the fretting hand has to travel, using simulated annealing over
// note-to-string assignments. The winning fingering is rendered back out
// as tab, and can also be exported as MIDI for checking by ear.
//
// Architecture:
// - song.rs: parsed song representation (pitches at measure fractions)
// - parse.rs: strict ASCII tab parser (line blocks, bar alignment, fret runs)
// - fretboard.rs: instrument geometry (tuning, fret positions, reach)
// - playing.rs: fingering representation + initial string assignment
// - distance.rs: hand-travel cost of a fingering
// - neighbor.rs: adjacent-string moves for the annealer
// - sa.rs: generic simulated annealing with a geometric cooling schedule
// - render.rs: fingering back to ASCII tab (slot layout + block packing)
// - midi.rs: MIDI file output from parsed songs
// - error.rs: parse and configuration error types
//
// Runs are deterministic given a seed, supporting reproducible output.

pub mod distance;
pub mod error;
pub mod fretboard;
pub mod midi;
pub mod neighbor;
pub mod parse;
pub mod playing;
pub mod render;
pub mod sa;
pub mod song;

pub use error::{ConfigError, ParseError};
pub use parse::parse;

use fretboard::Fretboard;
use playing::Playing;
use rand::Rng;
use sa::SAConfig;
use song::Song;

/// Full pipeline after parsing: assign an initial fingering, anneal it,
/// render the result as tab.
///
/// Errors:
/// - [`ConfigError::UnplayablePitch`] when some note fits no string at all
///   under this tuning and fret bound.
/// - [`ConfigError::UnplayableChord`] when the annealed fingering still has
///   two simultaneous notes on one string. The initial assignment stacks
///   chord notes onto the lowest reachable string, and with the default
///   schedule (T0=100, cooling 0.95) the exploratory phase lasts only a few
///   hundred iterations regardless of budget, so chord-heavy songs often
///   freeze before every collision is pulled apart. Retrying with a fresh
///   seed or a slower `cooling_rate` usually resolves it.
pub fn optimize(
    song: &Song,
    fretboard: &Fretboard,
    config: &SAConfig,
    max_width: usize,
    rng: &mut impl Rng,
) -> Result<String, ConfigError> {
    let start = Playing::assign(song, fretboard)?;
    let annealed = sa::solve(
        start,
        config,
        |playing, rng| neighbor::adjacent_string_move(playing, fretboard, rng),
        |playing| distance::travel_distance(playing, fretboard),
        rng,
    );
    render::render(&annealed.solution, song, fretboard, max_width)
}
