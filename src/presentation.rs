//! # Presentation Layout
//!
//! Groups a parsed song into parts (title, stanzas, copyright) made of
//! lines, so a presenter can jump from part to part. Each line carries its
//! lyrics, the chord line above it (re-spaced for the presenter's font) and
//! the translation shown below it.
//!
//! ## Rules
//! - the title is a part of its own
//! - an empty line ends the current stanza
//! - all copyright lines form the last part

use crate::corrector::ChordSpaceCorrector;
use crate::element::{SongElement, SongElementKind};
use crate::history::{is, SongElementHistory};
use crate::metrics::TextMeasure;
use crate::parser::{parse, ParseOptions};
use crate::song::Song;

/// One displayed line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationLine {
    pub chords: Option<String>,
    pub text: String,
    pub translation: Option<String>,
}

impl PresentationLine {
    fn is_empty(&self) -> bool {
        self.chords.is_none() && self.text.is_empty() && self.translation.is_none()
    }
}

/// A block of lines the presenter can jump to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub lines: Vec<PresentationLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub parts: Vec<Part>,
}

impl Presentation {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn line_count(&self) -> usize {
        self.parts.iter().map(|part| part.lines.len()).sum()
    }
}

struct LayoutBuilder<M> {
    corrector: ChordSpaceCorrector<M>,
    show_chords: bool,
    parts: Vec<Part>,
    part: Part,
    line: PresentationLine,
    copyright: Part,
}

impl<M: TextMeasure> LayoutBuilder<M> {
    fn close_part(&mut self) {
        if !self.part.lines.is_empty() {
            self.parts.push(std::mem::take(&mut self.part));
        }
    }

    fn chords_for(&self, history: &SongElementHistory, text: &str) -> Option<String> {
        if !self.show_chords {
            return None;
        }
        let chords: &SongElement = history
            .query()
            .without(&[SongElementKind::NewLine])
            .last_seen(&[is(SongElementKind::Chords)])
            .end()
            .first()?;
        Some(self.corrector.correct_chord_spaces(chords.text(), text))
    }

    fn element(&mut self, element: &SongElement, history: &SongElementHistory) {
        match element.kind() {
            SongElementKind::Title => self.parts.push(Part {
                lines: vec![PresentationLine {
                    text: element.text().to_string(),
                    ..PresentationLine::default()
                }],
            }),
            SongElementKind::Chords => {}
            SongElementKind::Lyrics => {
                if self.line.chords.is_none() && self.line.text.is_empty() {
                    self.line.chords = self.chords_for(history, element.text());
                }
                self.line.text.push_str(element.text());
            }
            SongElementKind::Translation => {
                if self.line.is_empty() {
                    self.line.chords = self.chords_for(history, element.text());
                }
                self.line
                    .translation
                    .get_or_insert_with(String::new)
                    .push_str(element.text());
            }
            SongElementKind::NewLine => {
                if !self.line.is_empty() {
                    let line = std::mem::take(&mut self.line);
                    self.part.lines.push(line);
                } else if history.previous().map_or(false, |e| e.is(SongElementKind::NewLine)) {
                    self.close_part();
                }
            }
            SongElementKind::Copyright => self.copyright.lines.push(PresentationLine {
                text: element.text().to_string(),
                ..PresentationLine::default()
            }),
        }
    }

    fn finish(mut self) -> Presentation {
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            self.part.lines.push(line);
        }
        self.close_part();
        if !self.copyright.lines.is_empty() {
            self.parts.push(self.copyright);
        }
        Presentation { parts: self.parts }
    }
}

/// Lay a song out for on-screen presentation.
pub fn layout(song: &Song, options: ParseOptions, measure: impl TextMeasure) -> Presentation {
    let elements = parse(song, options);
    let mut builder = LayoutBuilder {
        corrector: ChordSpaceCorrector::new(measure),
        show_chords: options.include_chords,
        parts: Vec::new(),
        part: Part::default(),
        line: PresentationLine::default(),
        copyright: Part::default(),
    };
    let mut history = SongElementHistory::new(&elements);
    while let Some(element) = history.advance() {
        builder.element(element, &history);
    }
    builder.finish()
}
