// Neighbor moves for the annealer.
//
// A move picks one note and shifts it to an adjacent string, refretted so
// the pitch is unchanged. Random sampling finds a legal move quickly on
// normal material; when the samples all come up empty (sparse fingerings,
// narrow tunings) an exhaustive scan either produces a move or proves that
// none exists, so a None return is final.

use rand::Rng;

use crate::fretboard::Fretboard;
use crate::playing::{Playing, PlayingNote};

// Random picks before falling back to the exhaustive scan.
const RESAMPLE_CAP: usize = 64;

/// Move one random note to an adjacent string at the same pitch. Returns
/// None only when no note in the fingering has a legal move.
pub fn adjacent_string_move(
    playing: &Playing,
    fretboard: &Fretboard,
    rng: &mut impl Rng,
) -> Option<Playing> {
    let occupied: Vec<usize> = playing
        .measures
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.notes.is_empty())
        .map(|(mi, _)| mi)
        .collect();
    if occupied.is_empty() {
        return None;
    }

    for _ in 0..RESAMPLE_CAP {
        let mi = occupied[rng.random_range(0..occupied.len())];
        let notes = &playing.measures[mi].notes;
        let ni = rng.random_range(0..notes.len());
        let moves = string_moves(notes[ni], fretboard);
        if !moves.is_empty() {
            let target = moves[rng.random_range(0..moves.len())];
            return Some(apply_move(playing, fretboard, mi, ni, target));
        }
    }

    let mut movable = Vec::new();
    for (mi, measure) in playing.measures.iter().enumerate() {
        for (ni, &note) in measure.notes.iter().enumerate() {
            if !string_moves(note, fretboard).is_empty() {
                movable.push((mi, ni));
            }
        }
    }
    if movable.is_empty() {
        return None;
    }
    let (mi, ni) = movable[rng.random_range(0..movable.len())];
    let moves = string_moves(playing.measures[mi].notes[ni], fretboard);
    let target = moves[rng.random_range(0..moves.len())];
    Some(apply_move(playing, fretboard, mi, ni, target))
}

/// Adjacent strings that can reproduce this note's pitch within the fret
/// range.
fn string_moves(note: PlayingNote, fretboard: &Fretboard) -> Vec<usize> {
    let pitch = fretboard.pitch_at(note.string, note.fret);
    let mut moves = Vec::new();
    if let Some(lower) = note.string.checked_sub(1) {
        if fretboard.reachable(pitch, fretboard.tuning[lower]) {
            moves.push(lower);
        }
    }
    let higher = note.string + 1;
    if higher < fretboard.strings() && fretboard.reachable(pitch, fretboard.tuning[higher]) {
        moves.push(higher);
    }
    moves
}

fn apply_move(
    playing: &Playing,
    fretboard: &Fretboard,
    mi: usize,
    ni: usize,
    string: usize,
) -> Playing {
    let old = playing.measures[mi].notes[ni];
    let pitch = fretboard.pitch_at(old.string, old.fret);
    let mut next = playing.clone();
    next.measures[mi].notes[ni] = PlayingNote {
        string,
        fret: (pitch - fretboard.tuning[string]) as u8,
    };
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playing::PlayingMeasure;
    use crate::song::STANDARD_TUNING;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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
    fn test_empty_playing_has_no_moves() {
        let fretboard = Fretboard::new(STANDARD_TUNING.to_vec(), 24, 26.0, 0.35);
        let playing = Playing {
            measures: vec![PlayingMeasure::default()],
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(adjacent_string_move(&playing, &fretboard, &mut rng).is_none());
    }

    #[test]
    fn test_single_string_has_no_moves() {
        let fretboard = Fretboard::new(vec![40], 24, 26.0, 0.35);
        let playing = playing_of(&[(0, 5)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(adjacent_string_move(&playing, &fretboard, &mut rng).is_none());
    }

    #[test]
    fn test_unreachable_neighbors_mean_no_moves() {
        // Pitch 65 on string 0; string 1 tops out at 40 + 24 = 64.
        let fretboard = Fretboard::new(vec![65, 40], 24, 26.0, 0.35);
        let playing = playing_of(&[(0, 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(adjacent_string_move(&playing, &fretboard, &mut rng).is_none());
    }

    #[test]
    fn test_move_changes_one_note_and_keeps_pitch() {
        let fretboard = Fretboard::new(STANDARD_TUNING.to_vec(), 24, 26.0, 0.35);
        let playing = playing_of(&[(4, 20), (5, 3), (3, 12)]);
        let before = playing.clone();
        let mut rng = StdRng::seed_from_u64(7);
        let next = adjacent_string_move(&playing, &fretboard, &mut rng).unwrap();

        assert_eq!(playing, before);
        let old_notes = &playing.measures[0].notes;
        let new_notes = &next.measures[0].notes;
        let changed: Vec<usize> = (0..old_notes.len())
            .filter(|&i| old_notes[i] != new_notes[i])
            .collect();
        assert_eq!(changed.len(), 1);
        let i = changed[0];
        assert_eq!(
            fretboard.pitch_at(old_notes[i].string, old_notes[i].fret),
            fretboard.pitch_at(new_notes[i].string, new_notes[i].fret)
        );
        assert_eq!(
            old_notes[i].string.abs_diff(new_notes[i].string),
            1
        );
    }

    #[test]
    fn test_only_legal_move_is_found() {
        // Pitch 60 can hop to string 0 as an open note; pitch 41 cannot
        // leave string 1. Whatever the rng does, there is one outcome.
        let fretboard = Fretboard::new(vec![60, 40], 24, 26.0, 0.35);
        let playing = playing_of(&[(1, 20), (1, 1)]);
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let next = adjacent_string_move(&playing, &fretboard, &mut rng).unwrap();
            assert_eq!(
                next.measures[0].notes,
                vec![
                    PlayingNote { string: 0, fret: 0 },
                    PlayingNote { string: 1, fret: 1 },
                ]
            );
        }
    }

    #[test]
    fn test_same_seed_same_move() {
        let fretboard = Fretboard::new(STANDARD_TUNING.to_vec(), 24, 26.0, 0.35);
        let playing = playing_of(&[(4, 20), (5, 3), (3, 12), (2, 9)]);
        let a = {
            let mut rng = StdRng::seed_from_u64(99);
            adjacent_string_move(&playing, &fretboard, &mut rng)
        };
        let b = {
            let mut rng = StdRng::seed_from_u64(99);
            adjacent_string_move(&playing, &fretboard, &mut rng)
        };
        assert_eq!(a, b);
    }
}
