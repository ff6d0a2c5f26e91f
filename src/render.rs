// Tab renderer: turns a fingering back into ASCII tab.
//
// Layout is slot-based. Notes that share a measure fraction share a
// column; every time advance writes one rest cell on the strings that
// stayed silent plus a one-dash separator on every line, so columns stay
// aligned across strings. The cell width is uniform over the whole song,
// wide enough for the largest fret number and never narrower than two.
// Finished measures are packed left to right into blocks no wider than
// the requested width; a single measure that is too wide on its own still
// gets a block of its own.

use crate::error::ConfigError;
use crate::fretboard::Fretboard;
use crate::playing::Playing;
use crate::song::Song;

/// Render `playing` as ASCII tab, one block per group of measures that
/// fits in `max_width` columns. Fails if the fingering puts two
/// simultaneous notes on the same string.
pub fn render(
    playing: &Playing,
    song: &Song,
    fretboard: &Fretboard,
    max_width: usize,
) -> Result<String, ConfigError> {
    let strings = fretboard.strings();
    let cell = cell_width(playing);

    let mut rendered = Vec::with_capacity(song.measures.len());
    for (mi, (pm, m)) in playing.measures.iter().zip(&song.measures).enumerate() {
        let mut lines = vec![String::from("|-"); strings];
        let mut placed = vec![false; strings];
        let mut cursor = 0.0;
        for (pn, note) in pm.notes.iter().zip(&m.notes) {
            if note.measure_start > cursor {
                advance_slot(&mut lines, &mut placed, cell);
                cursor = note.measure_start;
            }
            if placed[pn.string] {
                return Err(ConfigError::UnplayableChord { measure: mi });
            }
            lines[pn.string].push_str(&format!("{:-<width$}", pn.fret, width = cell));
            placed[pn.string] = true;
        }
        let widest = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        for line in &mut lines {
            while line.len() < widest {
                line.push('-');
            }
        }
        rendered.push(lines);
    }

    let blocks = pack_blocks(rendered, max_width);
    Ok(blocks
        .iter()
        .map(|block| {
            let mut text = block.join("\n");
            text.push('\n');
            text
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Uniform cell width: the widest fret number in the fingering, at least
/// two columns.
fn cell_width(playing: &Playing) -> usize {
    playing
        .measures
        .iter()
        .flat_map(|m| &m.notes)
        .map(|n| match n.fret {
            0..=9 => 1,
            10..=99 => 2,
            _ => 3,
        })
        .max()
        .unwrap_or(1)
        .max(2)
}

/// Close the current time slot: strings that had no note get a rest cell,
/// then every line gets the slot separator.
fn advance_slot(lines: &mut [String], placed: &mut [bool], cell: usize) {
    for (line, was_placed) in lines.iter_mut().zip(placed.iter()) {
        if !was_placed {
            line.push_str(&"-".repeat(cell));
        }
        line.push('-');
    }
    placed.fill(false);
}

/// Pack measures into blocks, closing a block once appending the next
/// measure would push its closed width past `max_width`.
fn pack_blocks(measures: Vec<Vec<String>>, max_width: usize) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut open: Option<Vec<String>> = None;
    for lines in measures {
        let fits = match &open {
            Some(block) => block[0].len() + lines[0].len() + 1 <= max_width,
            None => true,
        };
        if fits {
            if let Some(block) = &mut open {
                for (line, extra) in block.iter_mut().zip(&lines) {
                    line.push_str(extra);
                }
            } else {
                open = Some(lines);
            }
        } else if let Some(finished) = open.replace(lines) {
            blocks.push(close_block(finished));
        }
    }
    if let Some(last) = open {
        blocks.push(close_block(last));
    }
    blocks
}

fn close_block(mut lines: Vec<String>) -> Vec<String> {
    for line in &mut lines {
        line.push('|');
    }
    lines
}
