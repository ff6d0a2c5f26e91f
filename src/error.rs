// Error types for tab parsing and fingering configuration.
//
// ParseError covers malformed tab text; every variant carries the 1-based
// source line number of the offending block so callers can point at it.
// ConfigError covers tuning/fret-bound problems found while assigning or
// rendering a fingering.

use thiserror::Error;

/// Fatal tab-text errors. A failed parse never yields a partial Song.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A tab block had more or fewer string lines than the tuning has strings.
    #[error("tab block at line {line} has {found} string lines, tuning has {expected}")]
    BlockLineCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A line's `|` columns disagree with the first line of its block.
    #[error("measure borders do not match at line {line}")]
    MeasureBorders { line: usize },
    /// A block whose first line never closes a measure.
    #[error("tab block at line {line} has no closed measure")]
    TruncatedBlock { line: usize },
    /// A run of digits too large to be a fret number.
    #[error("fret number '{text}' at line {line} is out of range")]
    FretNumber { line: usize, text: String },
}

/// Fatal tuning/fret-bound errors found after parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No string can reach this pitch within the fret bound.
    #[error("pitch {pitch} in measure {measure} is unplayable on this tuning within {max_fret} frets")]
    UnplayablePitch {
        pitch: i32,
        measure: usize,
        max_fret: u8,
    },
    /// Two simultaneous notes ended up on the same string.
    #[error("measure {measure} places two simultaneous notes on one string")]
    UnplayableChord { measure: usize },
}
