pub mod chords;
pub mod config;
pub mod corrector;
pub mod element;
pub mod error;
pub mod export;
pub mod highlight;
pub mod history;
pub mod metrics;
pub mod parser;
pub mod presentation;
pub mod song;

pub use config::{ExportFormat, Songbook};
pub use corrector::{correct_chord_spaces, ChordSpaceCorrector};
pub use element::{SongElement, SongElementKind};
pub use error::*;
pub use export::{export, export_text, render, Document};
pub use highlight::{Highlighter, SongCell};
pub use history::SongElementHistory;
pub use metrics::{Monospace, TextMeasure, TimesRoman};
pub use parser::{first_lyrics_line, parse, ParseOptions};
pub use presentation::{layout, Presentation};
pub use song::Song;

/// Export a YAML songbook to XML with the settings it carries.
/// This is the main entry point for the library.
pub fn export_songbook(yaml: &str) -> Result<Vec<u8>, SongtextError> {
    let songbook = Songbook::from_yaml(yaml)?;
    export(&songbook.export, &songbook.songs)
}

/// Export a YAML songbook as plain text (chords in monospace columns)
pub fn export_songbook_text(yaml: &str) -> Result<String, SongtextError> {
    let songbook = Songbook::from_yaml(yaml)?;
    export_text(&songbook.export, &songbook.songs)
}
