// Parsed song model: pitches and their positions within measures.
//
// A Song is the read-only output of the parser. The optimizer never changes
// it; fingerings (playing.rs) stay aligned with it index-for-index and read
// timing back out of it when rendering.

use serde::{Deserialize, Serialize};

/// Standard guitar tuning EADGBE as absolute pitches, high E first: the
/// same order the strings appear in tab text.
pub const STANDARD_TUNING: [i32; 6] = [64, 59, 55, 50, 45, 40];

/// A single parsed note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Absolute pitch number (MIDI numbering, but not range-restricted).
    pub pitch: i32,
    /// Fraction of the measure elapsed before this note starts, in [0, 1).
    pub measure_start: f64,
}

/// One measure: notes sorted by start position, simultaneous notes kept in
/// string order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub notes: Vec<Note>,
}

/// An ordered sequence of measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub measures: Vec<Measure>,
}

impl Song {
    /// Total note count across all measures.
    pub fn note_count(&self) -> usize {
        self.measures.iter().map(|m| m.notes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality_is_deep() {
        let a = Song {
            measures: vec![Measure {
                notes: vec![Note {
                    pitch: 65,
                    measure_start: 0.0,
                }],
            }],
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.measures[0].notes[0].pitch = 66;
        assert_ne!(a, b);
    }

    #[test]
    fn test_note_serializes_with_camel_case_fields() {
        let note = Note {
            pitch: 65,
            measure_start: 0.5,
        };
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"pitch":65,"measureStart":0.5}"#);
    }
}
