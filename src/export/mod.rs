//! # Songbook Export
//!
//! Turns songs into a paginated [`Document`]: each song is parsed, then its
//! elements are walked with a [`SongElementHistory`] and dispatched on their
//! kind. Chord lines produce no output of their own; the lyrics line after
//! them looks back through the history, picks the chord line up and places it
//! above itself, re-spaced for the lyrics font.
//!
//! ## Layout
//! - every song starts on a new page with its title (and chord sequence)
//! - stanzas are separated by blank lines
//! - copyright lines close the song, the first one set off from the lyrics
//! - a "Table of Contents" page lists every exported song with its page
//!
//! ## Example
//! ```rust
//! use songtext::export::{render, Block};
//! use songtext::{ExportFormat, Song, TimesRoman};
//!
//! let songs = vec![Song::new("Amazing Grace").with_lyrics("G       C\nAmazing grace")];
//! let document = render(&ExportFormat::default(), &songs, TimesRoman::new(12.0)).unwrap();
//! assert_eq!(document.page_count(), 2);
//! assert_eq!(document.toc()[0].page, 1);
//! assert!(matches!(document.pages()[1].blocks[0], Block::Paragraph(_)));
//! ```

pub mod document;
pub mod xml;

pub use document::{Block, Document, Font, Page, Paragraph, Run, TextStyle, TocEntry};
pub use xml::to_xml;

use crate::config::ExportFormat;
use crate::corrector::ChordSpaceCorrector;
use crate::element::{SongElement, SongElementKind};
use crate::error::SongtextError;
use crate::history::{is, SongElementHistory};
use crate::metrics::{Monospace, TextMeasure, TimesRoman};
use crate::parser::{parse, ParseOptions};
use crate::song::Song;

pub const TOC_HEADING: &str = "Table of Contents";

const TITLE_MARGIN_BOTTOM: u16 = 15;
const CHORD_SEQUENCE_PADDING_LEFT: u16 = 30;
const COPYRIGHT_PADDING_TOP: u16 = 20;

/// Renders songs into one document.
struct Exporter<M> {
    format: ExportFormat,
    corrector: ChordSpaceCorrector<M>,
    document: Document,
    /// The body line being assembled; flushed on `NEW_LINE`.
    line: Paragraph,
}

impl<M: TextMeasure> Exporter<M> {
    fn new(format: &ExportFormat, measure: M) -> Self {
        Self {
            format: *format,
            corrector: ChordSpaceCorrector::new(measure),
            document: Document::new(),
            line: Paragraph::new(TextStyle::Lyrics),
        }
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new(
            self.format.show_chords || self.format.only_songs_with_chords,
            self.format.show_translation,
            true,
        )
    }

    fn export_song(&mut self, song: &Song, number: usize) -> Result<(), SongtextError> {
        let elements = parse(song, self.parse_options());

        if self.format.only_songs_with_chords && !elements.iter().any(|e| e.is(SongElementKind::Chords)) {
            log::debug!("skipping {:?}: no chords", song.title);
            return Ok(());
        }
        log::debug!(
            "exporting {:?} ({} elements) on page {}",
            song.title,
            elements.len(),
            self.document.current_page()
        );

        let mut history = SongElementHistory::new(&elements);
        while let Some(element) = history.advance() {
            match element.kind() {
                SongElementKind::Title => self.title(song, number)?,
                // picked up by the following lyrics or translation
                SongElementKind::Chords => {}
                SongElementKind::Lyrics => self.lyrics(element, &history),
                SongElementKind::Translation => self.translation(element, &history),
                SongElementKind::NewLine => self.new_line(&history)?,
                SongElementKind::Copyright => self.copyright(element, &history)?,
            }
        }
        self.flush_line()?;
        self.document.new_page();
        Ok(())
    }

    fn title(&mut self, song: &Song, number: usize) -> Result<(), SongtextError> {
        let anchor = song
            .id
            .clone()
            .unwrap_or_else(|| format!("song-{}", number));
        self.document.add_toc_entry(&anchor, &song.title)?;

        let mut title = Paragraph::with_text(TextStyle::Title, song.title.as_str());
        title.anchor = Some(anchor);
        title.margin_bottom = TITLE_MARGIN_BOTTOM;
        self.document.add_paragraph(title)?;

        if self.format.show_chords {
            if let Some(sequence) = song.clean_chord_sequence() {
                let mut paragraph = Paragraph::with_text(TextStyle::Lyrics, format!("{}\n\n", sequence));
                paragraph.padding_left = CHORD_SEQUENCE_PADDING_LEFT;
                self.document.add_paragraph(paragraph)?;
            }
        }
        Ok(())
    }

    /// The chord line right before the current element, ignoring line breaks.
    fn preceding_chords<'a>(&self, history: &SongElementHistory<'a>) -> Option<&'a SongElement> {
        if !self.format.show_chords {
            return None;
        }
        history
            .query()
            .without(&[SongElementKind::NewLine])
            .last_seen(&[is(SongElementKind::Chords)])
            .end()
            .first()
    }

    fn push_chords(&mut self, chords: &SongElement, text: &str) {
        let corrected = self.corrector.correct_chord_spaces(chords.text(), text);
        self.line.push(Run::new(TextStyle::Chords, format!("{}\n", corrected)));
    }

    fn lyrics(&mut self, element: &SongElement, history: &SongElementHistory) {
        if let Some(chords) = self.preceding_chords(history) {
            self.push_chords(chords, element.text());
        }
        self.line.push(Run::new(TextStyle::Lyrics, element.text()));
    }

    fn translation(&mut self, element: &SongElement, history: &SongElementHistory) {
        if !self.format.show_translation {
            return;
        }
        if self.line.is_empty() {
            if let Some(chords) = self.preceding_chords(history) {
                self.push_chords(chords, element.text());
            }
        }
        self.line.push(Run::new(TextStyle::Translation, element.text()));
    }

    fn flush_line(&mut self) -> Result<bool, SongtextError> {
        if self.line.is_empty() {
            return Ok(false);
        }
        let line = std::mem::replace(&mut self.line, Paragraph::new(TextStyle::Lyrics));
        self.document.add_paragraph(line)?;
        Ok(true)
    }

    fn new_line(&mut self, history: &SongElementHistory) -> Result<(), SongtextError> {
        if self.flush_line()? {
            return Ok(());
        }
        let blank = history
            .query()
            .last_seen(&[is(SongElementKind::NewLine)])
            .end()
            .is_matched();
        if blank {
            self.document.add(Block::BlankLine)?;
        }
        Ok(())
    }

    fn copyright(&mut self, element: &SongElement, history: &SongElementHistory) -> Result<(), SongtextError> {
        self.flush_line()?;
        let mut paragraph = Paragraph::with_text(TextStyle::Copyright, element.text());
        let follows_copyright = history
            .query()
            .without(&[SongElementKind::NewLine])
            .last_seen(&[is(SongElementKind::Copyright)])
            .end()
            .is_matched();
        if !follows_copyright {
            paragraph.padding_top = COPYRIGHT_PADDING_TOP;
        }
        self.document.add_paragraph(paragraph)
    }

    fn table_of_contents(&mut self) -> Result<(), SongtextError> {
        self.document
            .add_paragraph(Paragraph::with_text(TextStyle::Title, TOC_HEADING))?;
        let entries = self.document.toc().to_vec();
        for entry in entries {
            self.document.add(Block::Toc(entry))?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Document, SongtextError> {
        self.table_of_contents()?;
        Ok(self.document)
    }
}

/// Render songs into a document, measuring chord lines with `measure`.
///
/// Fails as a whole if any song carries text the document cannot hold.
pub fn render<M: TextMeasure>(
    format: &ExportFormat,
    songs: &[Song],
    measure: M,
) -> Result<Document, SongtextError> {
    let mut exporter = Exporter::new(format, measure);
    for (index, song) in songs.iter().enumerate() {
        exporter.export_song(song, index + 1)?;
    }
    exporter.finish()
}

/// Export songs as an XML document set in Times-Roman.
pub fn export(format: &ExportFormat, songs: &[Song]) -> Result<Vec<u8>, SongtextError> {
    let document = render(format, songs, TimesRoman::new(TextStyle::Lyrics.font().size))?;
    to_xml(&document)
}

/// Export songs as plain text, with chord lines kept in monospace columns.
pub fn export_text(format: &ExportFormat, songs: &[Song]) -> Result<String, SongtextError> {
    let document = render(format, songs, Monospace::default())?;
    Ok(document.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraphs(page: &Page) -> Vec<&Paragraph> {
        page.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(paragraph) => Some(paragraph),
                _ => None,
            })
            .collect()
    }

    fn song() -> Song {
        Song::new("Amazing Grace")
            .with_id("grace")
            .with_chord_sequence("  G C D  ")
            .with_lyrics("G       C\nAmazing grace\n[Erstaunliche Gnade]\n\nhow sweet\n")
            .with_composer("John Newton")
            .with_publisher("Public Domain")
    }

    fn render_mono(format: ExportFormat, songs: &[Song]) -> Document {
        render(&format, songs, Monospace::default()).unwrap()
    }

    #[test]
    fn test_song_layout() {
        let document = render_mono(ExportFormat::default(), &[song()]);
        let page = &document.pages()[0];
        let texts: Vec<String> = paragraphs(page).iter().map(|p| p.text()).collect();
        assert_eq!(
            texts,
            vec![
                "Amazing Grace".to_string(),
                "G C D\n\n".to_string(),
                "G       C\nAmazing grace".to_string(),
                "Erstaunliche Gnade".to_string(),
                "how sweet".to_string(),
                "Music: John Newton".to_string(),
                "Publisher: Public Domain".to_string(),
            ]
        );

        let title = paragraphs(page)[0];
        assert_eq!(title.anchor.as_deref(), Some("grace"));
        assert_eq!(title.margin_bottom, 15);
        assert_eq!(paragraphs(page)[1].padding_left, 30);

        let chord_line = paragraphs(page)[2];
        assert_eq!(chord_line.runs[0].style, TextStyle::Chords);
        assert_eq!(chord_line.runs[1].style, TextStyle::Lyrics);
    }

    #[test]
    fn test_blank_lines_between_stanzas() {
        let document = render_mono(ExportFormat::default(), &[song()]);
        let blocks = &document.pages()[0].blocks;
        let blank_lines = blocks.iter().filter(|b| **b == Block::BlankLine).count();
        // one inside the lyrics, one before the copyright
        assert_eq!(blank_lines, 2);
        let translation_at = blocks
            .iter()
            .position(|b| matches!(b, Block::Paragraph(p) if p.text() == "Erstaunliche Gnade"))
            .unwrap();
        assert_eq!(blocks[translation_at + 1], Block::BlankLine);
    }

    #[test]
    fn test_copyright_padding() {
        let document = render_mono(ExportFormat::default(), &[song()]);
        let copyright: Vec<_> = paragraphs(&document.pages()[0])
            .into_iter()
            .filter(|p| p.style == TextStyle::Copyright)
            .collect();
        assert_eq!(copyright.len(), 2);
        assert_eq!(copyright[0].padding_top, 20);
        assert_eq!(copyright[1].padding_top, 0);
    }

    #[test]
    fn test_pages_and_toc() {
        let songs = vec![song(), Song::new("Second").with_lyrics("la la"), Song::new("Third")];
        let document = render_mono(ExportFormat::default(), &songs);
        assert_eq!(document.page_count(), 4);

        let toc: Vec<_> = document
            .toc()
            .iter()
            .map(|e| (e.anchor.as_str(), e.title.as_str(), e.page))
            .collect();
        assert_eq!(
            toc,
            vec![("grace", "Amazing Grace", 1), ("song-2", "Second", 2), ("song-3", "Third", 3)]
        );

        let last = &document.pages()[3];
        assert_eq!(paragraphs(last)[0].text(), TOC_HEADING);
        assert_eq!(last.blocks.iter().filter(|b| matches!(b, Block::Toc(_))).count(), 3);
    }

    #[test]
    fn test_only_songs_with_chords() {
        let songs = vec![song(), Song::new("No chords").with_lyrics("just words")];
        let format = ExportFormat::new(true, false, true);
        let document = render_mono(format, &songs);
        assert_eq!(document.page_count(), 2);
        assert_eq!(document.toc().len(), 1);
        // filtered on chords, but they are still not shown
        let text = document.to_text();
        assert!(!text.contains("G       C"));
        assert!(!text.contains("G C D"));
        assert!(text.contains("Amazing grace"));
    }

    #[test]
    fn test_translation_hidden() {
        let document = render_mono(ExportFormat::new(false, true, false), &[song()]);
        let text = document.to_text();
        assert!(!text.contains("Erstaunliche"));
        assert!(text.contains("how sweet"));
    }

    #[test]
    fn test_chords_above_translation_only_line() {
        let song = Song::new("t").with_lyrics("Am   G\n[da da]");
        let document = render_mono(ExportFormat::default(), &[song]);
        let line = paragraphs(&document.pages()[0])[1];
        assert_eq!(line.runs[0], Run::new(TextStyle::Chords, "Am   G\n"));
        assert_eq!(line.runs[1], Run::new(TextStyle::Translation, "da da"));
    }

    #[test]
    fn test_chords_are_corrected_for_the_font() {
        let song = Song::new("t").with_lyrics("C    G\nmmmmmmmm");
        let wide = |text: &str| text.chars().map(|c| if c == 'm' { 3 } else { 1 }).sum::<i32>();
        let document = render(&ExportFormat::default(), &[song], wide).unwrap();
        let line = paragraphs(&document.pages()[0])[1];
        assert_eq!(line.runs[0].text, format!("C{}G\n", " ".repeat(14)));
    }

    #[test]
    fn test_control_characters_abort_export() {
        let songs = vec![song(), Song::new("Broken").with_lyrics("bell \u{7}")];
        let result = render(&ExportFormat::default(), &songs, Monospace::default());
        match result {
            Err(SongtextError::Document { page, .. }) => assert_eq!(page, 2),
            other => panic!("expected a document error, got {:?}", other),
        }
        assert!(export(&ExportFormat::default(), &songs).is_err());
    }

    #[test]
    fn test_carriage_returns_do_not_fail_export() {
        let songs = vec![
            Song::new("Trailing").with_lyrics("la la\r"),
            Song::new("Old Mac").with_lyrics("first line\rsecond line"),
            Song::new("Title\r").with_lyrics("words"),
        ];
        let result = render(&ExportFormat::default(), &songs, Monospace::default());
        assert!(result.is_ok(), "carriage returns should not abort the export");
        let document = result.unwrap();
        let lines: Vec<String> = paragraphs(&document.pages()[1]).iter().map(|p| p.text()).collect();
        assert_eq!(lines, vec!["Old Mac".to_string(), "first line".to_string(), "second line".to_string()]);
        assert_eq!(paragraphs(&document.pages()[0])[1].text(), "la la");
        assert!(export(&ExportFormat::default(), &songs).is_ok());
    }

    #[test]
    fn test_chords_carry_over_stanza_break() {
        let song = Song::new("t").with_lyrics("C   G\n\nla la la");
        let document = render_mono(ExportFormat::default(), &[song]);
        let blocks = &document.pages()[0].blocks;
        assert_eq!(blocks[1], Block::BlankLine);
        match &blocks[2] {
            Block::Paragraph(line) => assert_eq!(
                line.runs,
                vec![Run::new(TextStyle::Chords, "C   G\n"), Run::new(TextStyle::Lyrics, "la la la")]
            ),
            other => panic!("expected the lyrics line, got {:?}", other),
        }
    }

    #[test]
    fn test_no_songs() {
        let document = render_mono(ExportFormat::default(), &[]);
        assert_eq!(document.page_count(), 1);
        assert_eq!(paragraphs(&document.pages()[0])[0].text(), TOC_HEADING);
    }

    #[test]
    fn test_export_xml() {
        let xml = String::from_utf8(export(&ExportFormat::default(), &[song()]).unwrap()).unwrap();
        assert!(xml.contains(r#"<songbook pages="2">"#));
        assert!(xml.contains(r#"anchor="grace""#));
        assert!(xml.contains("Amazing grace"));
        assert!(xml.contains(r#"<toc-entry target="grace" page="1">Amazing Grace</toc-entry>"#));
    }
}
