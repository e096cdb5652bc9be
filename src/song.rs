//! The song record handed to the core by whatever stores songs.

use serde::Deserialize;

/// Raw song fields. Every field except the title is optional; blank values
/// are treated the same as missing ones.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Song {
    /// Stable identifier, used as the jump target of table of contents entries.
    pub id: Option<String>,
    pub title: String,
    pub composer: Option<String>,
    pub author_text: Option<String>,
    pub author_translation: Option<String>,
    pub publisher: Option<String>,
    pub additional_copyright_notes: Option<String>,
    /// Lyrics with embedded chord lines and `[bracketed]` translations.
    pub lyrics: Option<String>,
    /// Free-form listing of the chords used, independent of the chord lines.
    pub chord_sequence: Option<String>,
}

impl Song {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    pub fn with_composer(mut self, composer: impl Into<String>) -> Self {
        self.composer = Some(composer.into());
        self
    }

    pub fn with_author_text(mut self, author: impl Into<String>) -> Self {
        self.author_text = Some(author.into());
        self
    }

    pub fn with_author_translation(mut self, author: impl Into<String>) -> Self {
        self.author_translation = Some(author.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_additional_copyright_notes(mut self, notes: impl Into<String>) -> Self {
        self.additional_copyright_notes = Some(notes.into());
        self
    }

    pub fn with_chord_sequence(mut self, chord_sequence: impl Into<String>) -> Self {
        self.chord_sequence = Some(chord_sequence.into());
        self
    }

    pub fn lyrics(&self) -> &str {
        self.lyrics.as_deref().unwrap_or("")
    }

    /// The chord sequence without surrounding whitespace, `None` if blank.
    pub fn clean_chord_sequence(&self) -> Option<&str> {
        self.chord_sequence
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Returns the value if it holds anything besides whitespace.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
