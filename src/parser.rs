//! # Song Parser
//!
//! Breaks a [`Song`] down into a flat sequence of [`SongElement`]s.
//!
//! ## Line grammar
//! Every physical line of the lyrics is exactly one of:
//! - a **chord line** (see [`crate::chords::is_chords_line`]), kept verbatim
//!   so the column of every chord survives;
//! - a line with a **translation** in brackets: `prefix [translation] suffix`,
//!   where prefix and suffix are lyrics (whitespace-only parts included);
//! - plain **lyrics** (whitespace-only lines included, empty lines produce
//!   only their line break).
//!
//! A `NEW_LINE` follows every kept line. One more `NEW_LINE` separates the
//! lyrics from the copyright lines. Malformed brackets are simply lyrics; the
//! parser accepts any text.
//!
//! ## Example
//! ```rust
//! use songtext::{parse, ParseOptions, Song, SongElementKind};
//!
//! let song = Song::new("Title").with_lyrics("C   G\nla la\n[lo lo]");
//! let elements = parse(&song, ParseOptions::all());
//! let kinds: Vec<_> = elements.iter().map(|e| e.kind()).collect();
//! assert_eq!(kinds, vec![
//!     SongElementKind::Title,
//!     SongElementKind::Chords, SongElementKind::NewLine,
//!     SongElementKind::Lyrics, SongElementKind::NewLine,
//!     SongElementKind::Translation, SongElementKind::NewLine,
//!     SongElementKind::NewLine,
//! ]);
//! ```

use crate::chords::is_chords_line;
use crate::element::{SongElement, SongElementKind};
use crate::song::{non_blank, Song};

pub const LABEL_MUSIC: &str = "Music: ";
pub const LABEL_TEXT: &str = "Text: ";
pub const LABEL_TRANSLATION: &str = "Translation: ";
pub const LABEL_PUBLISHER: &str = "Publisher: ";

/// Which optional parts of a song end up in the element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub include_chords: bool,
    pub include_translation: bool,
    pub include_copyright: bool,
}

impl ParseOptions {
    pub fn new(include_chords: bool, include_translation: bool, include_copyright: bool) -> Self {
        Self {
            include_chords,
            include_translation,
            include_copyright,
        }
    }

    pub fn all() -> Self {
        Self::new(true, true, true)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// A line split around its translation brackets.
struct TranslationSplit<'a> {
    prefix: &'a str,
    translation: &'a str,
    suffix: &'a str,
}

/// Split at the last `]` and the last `[` before it. Returns `None` when the
/// line has no such pair, in which case any bracket is literal text.
fn split_translation(line: &str) -> Option<TranslationSplit<'_>> {
    let close = line.rfind(']')?;
    let open = line[..close].rfind('[')?;
    Some(TranslationSplit {
        prefix: &line[..open],
        translation: &line[open + 1..close],
        suffix: &line[close + 1..],
    })
}

/// Physical lines of the lyrics, ended by `\n`, `\r\n` or a bare `\r`.
/// Empty lyrics have no lines at all, and a final line break does not start
/// another line.
fn physical_lines(lyrics: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = lyrics;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                lines.push(&rest[..end]);
                let break_len = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + break_len..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

struct SongParser {
    options: ParseOptions,
    elements: Vec<SongElement>,
}

impl SongParser {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            elements: Vec::new(),
        }
    }

    fn push(&mut self, kind: SongElementKind, content: &str) {
        self.elements.push(SongElement::new(kind, content));
    }

    fn parse(mut self, song: &Song) -> Vec<SongElement> {
        self.push(SongElementKind::Title, &song.title);

        for line in physical_lines(song.lyrics()) {
            if self.parse_line(line) {
                self.elements.push(SongElement::new_line());
            }
        }

        // always separate lyrics from copyright
        self.elements.push(SongElement::new_line());

        if self.options.include_copyright {
            self.parse_copyright(song);
        }

        self.elements
    }

    /// Emit the elements of one physical line. Returns false when the line
    /// was dropped entirely and must not be followed by a line break.
    fn parse_line(&mut self, line: &str) -> bool {
        if is_chords_line(line) {
            if !self.options.include_chords {
                return false;
            }
            self.push(SongElementKind::Chords, line);
            return true;
        }

        if let Some(split) = split_translation(line) {
            let lyrics_blank = split.prefix.trim().is_empty() && split.suffix.trim().is_empty();
            if !self.options.include_translation && lyrics_blank {
                return false;
            }
            if !split.prefix.is_empty() {
                self.push(SongElementKind::Lyrics, split.prefix);
            }
            if self.options.include_translation && !split.translation.is_empty() {
                self.push(SongElementKind::Translation, split.translation);
            }
            if !split.suffix.is_empty() {
                self.push(SongElementKind::Lyrics, split.suffix);
            }
            return true;
        }

        if !line.is_empty() {
            self.push(SongElementKind::Lyrics, line);
        }
        true
    }

    fn parse_copyright(&mut self, song: &Song) {
        let labelled = [
            (LABEL_MUSIC, &song.composer),
            (LABEL_TEXT, &song.author_text),
            (LABEL_TRANSLATION, &song.author_translation),
            (LABEL_PUBLISHER, &song.publisher),
            ("", &song.additional_copyright_notes),
        ];
        for (label, value) in labelled {
            if let Some(value) = non_blank(value) {
                let content = format!("{}{}", label, value);
                self.push(SongElementKind::Copyright, &content);
            }
        }
    }
}

/// Parse a song into its element sequence.
pub fn parse(song: &Song, options: ParseOptions) -> Vec<SongElement> {
    SongParser::new(options).parse(song)
}

/// The first line of the lyrics that is neither a chord line nor carries a
/// translation. Empty if there is none.
pub fn first_lyrics_line(song: &Song) -> String {
    physical_lines(song.lyrics())
        .into_iter()
        .find(|line| split_translation(line).is_none() && !is_chords_line(line))
        .unwrap_or("")
        .to_string()
}
