// Strict ASCII tab parser.
//
// Tab text arrives as free-form lines: section names, lyrics, and legends
// interleaved with the actual tab. Lines that look like tab (bar-delimited,
// tab alphabet only) are grouped into blocks of consecutive lines, one line
// per string. Within a block the `|` columns must agree exactly across all
// lines; the spans between bars are measures.
//
// Column-to-time mapping: after stripping the common leading rest run of a
// measure (so `|1-|` and `|-1-|` read the same), a digit run starting at
// column c of a body of length L is a note at measure fraction c / L.

use crate::error::ParseError;
use crate::song::{Measure, Note, Song};

/// Characters allowed from the first bar of a tab line on. Digits are fret
/// numbers; the letters are hammer-on, pull-off, bend, release, slide and
/// harmonic marks.
fn tab_char(c: char) -> bool {
    matches!(c, '-' | '|' | '/' | '\\' | '(' | ')' | '_' | '=' | '~')
        || c.is_ascii_digit()
        || matches!(c.to_ascii_lowercase(), 'h' | 'p' | 'b' | 'r' | 's' | 'o')
}

/// A tab line ends with `|` and uses only the tab alphabet from its first
/// `|` on. Anything before the first bar (tuning letters, indentation) is
/// allowed; the column checks below keep it honest.
fn is_tab_line(line: &str) -> bool {
    match line.find('|') {
        Some(first) => line.ends_with('|') && line[first..].chars().all(tab_char),
        None => false,
    }
}

/// Parse tab text into a Song. `tuning` gives the open pitch of each string
/// in line order; every block must have exactly one line per string.
pub fn parse(tab: &str, tuning: &[i32]) -> Result<Song, ParseError> {
    let mut measures = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();
    let mut blocks = 0usize;

    for (idx, raw) in tab.lines().enumerate() {
        let line = raw.trim_end();
        if is_tab_line(line) {
            block.push((idx + 1, line));
        } else if !block.is_empty() {
            parse_block(&block, tuning, &mut measures)?;
            blocks += 1;
            block.clear();
        }
    }
    if !block.is_empty() {
        parse_block(&block, tuning, &mut measures)?;
        blocks += 1;
    }

    tracing::debug!("parsed {} blocks into {} measures", blocks, measures.len());
    Ok(Song { measures })
}

fn parse_block(
    block: &[(usize, &str)],
    tuning: &[i32],
    measures: &mut Vec<Measure>,
) -> Result<(), ParseError> {
    let first_line = block[0].0;
    if block.len() != tuning.len() {
        return Err(ParseError::BlockLineCount {
            line: first_line,
            expected: tuning.len(),
            found: block.len(),
        });
    }

    // Every line must put its bars in exactly the same columns as line 0.
    let bars = bar_columns(block[0].1);
    for &(line_no, line) in &block[1..] {
        if bar_columns(line) != bars {
            return Err(ParseError::MeasureBorders { line: line_no });
        }
    }
    if bars.len() < 2 {
        return Err(ParseError::TruncatedBlock { line: first_line });
    }

    for span in bars.windows(2) {
        let (start, end) = (span[0] + 1, span[1]);
        let segments: Vec<&str> = block.iter().map(|&(_, line)| &line[start..end]).collect();
        measures.push(parse_measure(&segments, block, tuning)?);
    }
    Ok(())
}

fn bar_columns(line: &str) -> Vec<usize> {
    line.match_indices('|').map(|(col, _)| col).collect()
}

fn parse_measure(
    segments: &[&str],
    block: &[(usize, &str)],
    tuning: &[i32],
) -> Result<Measure, ParseError> {
    // Strip the common leading rest run so spacer conventions don't shift
    // the column-to-time mapping.
    let skip = segments
        .iter()
        .map(|s| s.chars().take_while(|&c| c == '-').count())
        .min()
        .unwrap_or(0);

    let mut notes = Vec::new();
    for (string, segment) in segments.iter().enumerate() {
        let body = &segment[skip..];
        let bytes = body.as_bytes();
        let mut col = 0;
        while col < bytes.len() {
            if bytes[col].is_ascii_digit() {
                let start = col;
                while col < bytes.len() && bytes[col].is_ascii_digit() {
                    col += 1;
                }
                let text = &body[start..col];
                let fret: i32 = text.parse().map_err(|_| ParseError::FretNumber {
                    line: block[string].0,
                    text: text.to_string(),
                })?;
                notes.push(Note {
                    pitch: tuning[string] + fret,
                    measure_start: start as f64 / body.len() as f64,
                });
            } else {
                col += 1;
            }
        }
    }

    // Stable: simultaneous notes keep string order.
    notes.sort_by(|a, b| a.measure_start.total_cmp(&b.measure_start));
    Ok(Measure { notes })
}
