// A Playing is a fingering: for each note of a Song, which string it is
// played on and at which fret. Measures line up one-to-one with the Song's
// measures, notes in the same order, so a (Song, Playing) pair can always
// be walked in lockstep.

use crate::error::ConfigError;
use crate::fretboard::Fretboard;
use crate::song::Song;

/// One fretted (or open) note: string index into the tuning, fret number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayingNote {
    pub string: usize,
    pub fret: u8,
}

/// Fingerings for one measure, in the same order as the Song measure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayingMeasure {
    pub notes: Vec<PlayingNote>,
}

/// A complete fingering of a Song.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playing {
    pub measures: Vec<PlayingMeasure>,
}

impl Playing {
    /// Assign every note to the lowest-pitched string that can reach it,
    /// putting each note as far up the neck as possible. Ties between equal
    /// open pitches go to the later string.
    pub fn assign(song: &Song, fretboard: &Fretboard) -> Result<Self, ConfigError> {
        let mut measures = Vec::with_capacity(song.measures.len());
        for (mi, measure) in song.measures.iter().enumerate() {
            let mut notes = Vec::with_capacity(measure.notes.len());
            for note in &measure.notes {
                let mut best: Option<(usize, i32)> = None;
                for (string, &open) in fretboard.tuning.iter().enumerate() {
                    if fretboard.reachable(note.pitch, open)
                        && best.is_none_or(|(_, t)| open <= t)
                    {
                        best = Some((string, open));
                    }
                }
                let Some((string, open)) = best else {
                    return Err(ConfigError::UnplayablePitch {
                        pitch: note.pitch,
                        measure: mi,
                        max_fret: fretboard.max_fret,
                    });
                };
                notes.push(PlayingNote {
                    string,
                    fret: (note.pitch - open) as u8,
                });
            }
            measures.push(PlayingMeasure { notes });
        }
        Ok(Playing { measures })
    }
}
