//! # Chord Space Correction
//!
//! Chord lines are written for a monospace font: a chord sits above the
//! lyrics character in the same column. Rendered in a proportional font the
//! columns drift apart. The corrector rebuilds the chord line so that every
//! chord starts where its column's lyrics text starts once rendered, using
//! spaces of the same font for padding.
//!
//! ```text
//! chords (source)  "C         G"
//! lyrics           "Amazing grace"
//!                   ^         ^ column 10
//! target x of G  = width("Amazing gr")
//! output           "C" + n spaces + "G"   with width("C" + n spaces) >= target
//! ```
//!
//! The result is visually, not textually, equivalent: runs of spaces grow or
//! shrink with the font. With a monospace measure the input comes back
//! unchanged (minus trailing whitespace).

use crate::metrics::TextMeasure;

/// Upper bound of spaces inserted in front of a single chord.
const MAX_PADDING: usize = 1024;

/// A maximal run of non-whitespace characters in a chord line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChordToken<'a> {
    /// Start column, counted in characters.
    column: usize,
    text: &'a str,
}

fn chord_tokens(line: &str) -> Vec<ChordToken<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    for (column, (offset, c)) in line.char_indices().enumerate() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some((column, offset)),
            (true, Some((token_column, token_offset))) => {
                tokens.push(ChordToken {
                    column: token_column,
                    text: &line[token_offset..offset],
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some((column, offset)) = start {
        tokens.push(ChordToken {
            column,
            text: &line[offset..],
        });
    }
    tokens
}

/// Byte offset of the given character column, clamped to the end of `text`.
fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Rebuilds chord lines for a particular font.
#[derive(Debug, Clone)]
pub struct ChordSpaceCorrector<M> {
    measure: M,
}

impl<M: TextMeasure> ChordSpaceCorrector<M> {
    pub fn new(measure: M) -> Self {
        Self { measure }
    }

    /// Rendered x offset at which a chord from `column` has to start.
    fn target_offset(&self, text: &str, column: usize) -> i32 {
        let text_columns = text.chars().count();
        if column <= text_columns {
            self.measure.width(&text[..byte_offset(text, column)])
        } else {
            // chord hangs over the end of the text: keep its distance in spaces
            let overhang = " ".repeat(column - text_columns);
            self.measure
                .width(text)
                .saturating_add(self.measure.width(&overhang))
        }
    }

    /// Smallest number of spaces at least `gap` wide.
    fn spaces_for(&self, gap: i32) -> usize {
        let mut padding = String::new();
        while self.measure.width(&padding) < gap {
            if padding.len() >= MAX_PADDING {
                log::warn!("chord padding capped at {} spaces (gap {})", MAX_PADDING, gap);
                break;
            }
            padding.push(' ');
        }
        padding.len()
    }

    /// Re-space `chords` so each chord lines up with `text` in this font.
    pub fn correct_chord_spaces(&self, chords: &str, text: &str) -> String {
        let mut result = String::with_capacity(chords.len());
        for token in chord_tokens(chords) {
            let target = self.target_offset(text, token.column);
            let gap = target.saturating_sub(self.measure.width(&result)).max(0);
            let mut spaces = self.spaces_for(gap);
            if !result.is_empty() {
                // chords never touch each other
                spaces = spaces.max(1);
            }
            result.extend(std::iter::repeat(' ').take(spaces));
            result.push_str(token.text);
        }
        log::trace!("corrected chords {:?} over {:?} to {:?}", chords, text, result);
        result
    }
}

/// One-shot form of [`ChordSpaceCorrector::correct_chord_spaces`].
pub fn correct_chord_spaces(chords: &str, text: &str, measure: impl TextMeasure) -> String {
    ChordSpaceCorrector::new(measure).correct_chord_spaces(chords, text)
}
