// MIDI output from parsed songs.
//
// Converts a Song into a Standard MIDI File (SMF) for playback, so a
// fingering can be checked by ear against the source tab. Track 0 carries
// the tempo; track 1 holds every note on one guitar channel. Measures are
// four quarter notes long and a note's measure fraction maps linearly to
// ticks inside its measure.
//
// Uses the `midly` crate for MIDI writing. Output is SMF Format 1.

use crate::song::Song;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Ticks per measure (four quarter notes).
const TICKS_PER_MEASURE: u32 = TICKS_PER_QUARTER as u32 * 4;

/// Sounding length of each note (an eighth note). Tab carries no
/// durations, so every note gets the same one.
const NOTE_TICKS: u32 = TICKS_PER_QUARTER as u32 / 2;

/// Convert a Song to MIDI and write to a file.
pub fn write_midi(song: &Song, tempo_bpm: u16, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let smf = song_to_smf(song, tempo_bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a Song to an in-memory SMF.
fn song_to_smf(song: &Song, tempo_bpm: u16) -> Smf<'static> {
    let tempo_bpm = u32::from(tempo_bpm.max(1));
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    let mut tempo_track: Track<'static> = Vec::new();
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(60_000_000 / tempo_bpm))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    // (tick, order, pitch, on) tuples; sorting puts note-offs ahead of
    // note-ons that land on the same tick.
    let mut events: Vec<(u32, u8, u8, bool)> = Vec::new();
    for (mi, measure) in song.measures.iter().enumerate() {
        let measure_tick = mi as u32 * TICKS_PER_MEASURE;
        for note in &measure.notes {
            let pitch = match u8::try_from(note.pitch) {
                Ok(p) if p <= 127 => p,
                _ => {
                    tracing::warn!("pitch {} is outside the MIDI range, skipped", note.pitch);
                    continue;
                }
            };
            let start =
                measure_tick + (note.measure_start * f64::from(TICKS_PER_MEASURE)).round() as u32;
            events.push((start, 1, pitch, true));
            events.push((start + NOTE_TICKS, 0, pitch, false));
        }
    }
    events.sort();

    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(b"Guitar")),
    });
    // Program 24: acoustic guitar (nylon).
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(24),
            },
        },
    });

    let mut last_tick: u32 = 0;
    for (tick, _, pitch, on) in events {
        let delta = tick - last_tick;
        last_tick = tick;
        let message = if on {
            MidiMessage::NoteOn {
                key: u7::new(pitch),
                vel: u7::new(80),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(pitch),
                vel: u7::new(0),
            }
        };
        track.push(TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi { channel, message },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}
