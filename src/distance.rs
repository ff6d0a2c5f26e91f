// Cost of a fingering: total distance the fretting hand travels.
//
// Notes are walked in playing order across all measures. Open strings need
// no fretting, so they neither move the hand nor anchor it; they are left
// out of the walk entirely. Between consecutive fretted notes the hand
// moves along the neck (difference of fret positions) and across it
// (string spacing), combined as a straight line.

use crate::fretboard::Fretboard;
use crate::playing::Playing;

/// Euclidean hand travel over all fretted notes of the fingering.
pub fn travel_distance(playing: &Playing, fretboard: &Fretboard) -> f64 {
    let mut total = 0.0;
    let mut prev: Option<(usize, u8)> = None;
    for measure in &playing.measures {
        for note in &measure.notes {
            if note.fret == 0 {
                continue;
            }
            if let Some((prev_string, prev_fret)) = prev {
                let dx = fretboard.fret_distance(prev_fret) - fretboard.fret_distance(note.fret);
                let dy =
                    (prev_string as f64 - note.string as f64) * fretboard.string_spacing;
                total += (dx * dx + dy * dy).sqrt();
            }
            prev = Some((note.string, note.fret));
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playing::{PlayingMeasure, PlayingNote};
    use crate::song::STANDARD_TUNING;

    fn standard() -> Fretboard {
        Fretboard::new(STANDARD_TUNING.to_vec(), 24, 26.0, 0.35)
    }

    fn playing_of(notes: &[(usize, u8)]) -> Playing {
        Playing {
            measures: vec![PlayingMeasure {
                notes: notes
                    .iter()
                    .map(|&(string, fret)| PlayingNote { string, fret })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_open_strings_travel_nothing() {
        let playing = playing_of(&[(0, 0), (3, 0), (5, 0)]);
        assert_eq!(travel_distance(&playing, &standard()), 0.0);
    }

    #[test]
    fn test_single_fretted_note_travels_nothing() {
        let playing = playing_of(&[(2, 7)]);
        assert_eq!(travel_distance(&playing, &standard()), 0.0);
    }

    #[test]
    fn test_same_fret_crosses_strings_only() {
        let playing = playing_of(&[(1, 5), (2, 5)]);
        let travel = travel_distance(&playing, &standard());
        assert!((travel - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_open_note_between_fretted_notes_is_invisible() {
        let fretboard = standard();
        let with_open = playing_of(&[(1, 5), (4, 0), (2, 7)]);
        let without = playing_of(&[(1, 5), (2, 7)]);
        assert_eq!(
            travel_distance(&with_open, &fretboard),
            travel_distance(&without, &fretboard)
        );
    }

    #[test]
    fn test_travel_spans_measure_boundaries() {
        let fretboard = standard();
        let split = Playing {
            measures: vec![
                PlayingMeasure {
                    notes: vec![PlayingNote { string: 1, fret: 5 }],
                },
                PlayingMeasure {
                    notes: vec![PlayingNote { string: 2, fret: 7 }],
                },
            ],
        };
        let joined = playing_of(&[(1, 5), (2, 7)]);
        assert_eq!(
            travel_distance(&split, &fretboard),
            travel_distance(&joined, &fretboard)
        );
    }

    #[test]
    fn test_travel_matches_hand_worked_value() {
        let fretboard = standard();
        let playing = playing_of(&[(5, 3), (4, 5)]);
        let dx = fretboard.fret_distance(3) - fretboard.fret_distance(5);
        let dy = 0.35;
        let expected = (dx * dx + dy * dy).sqrt();
        assert_eq!(travel_distance(&playing, &fretboard), expected);
    }
}
