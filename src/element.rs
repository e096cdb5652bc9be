//! # Song Elements
//!
//! The vocabulary the parser produces and every renderer consumes.
//!
//! ```text
//! Vec<SongElement>
//!   TITLE
//!   CHORDS      "G        C"
//!   NEW_LINE    "\n"
//!   LYRICS      "Amazing grace"
//!   TRANSLATION "Erstaunliche Gnade"
//!   NEW_LINE    "\n"
//!   NEW_LINE    "\n"          (separates lyrics from copyright)
//!   COPYRIGHT   "Music: ..."
//! ```
//!
//! There is no tree: the order of the sequence is the only thing that encodes
//! song structure. `NEW_LINE` only appears between body elements (chords,
//! lyrics, translation); one physical line may produce several body elements
//! before its `NEW_LINE`.

use std::fmt;

/// Kind of a [`SongElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongElementKind {
    /// The title, always exactly one element.
    Title,
    /// A chord line, kept verbatim so column positions survive.
    Chords,
    /// Lyrics; not necessarily a whole line.
    Lyrics,
    /// A translation (bracketed in the source); not necessarily a whole line.
    Translation,
    /// Line break between chords, lyrics and translation elements.
    NewLine,
    /// One copyright line.
    Copyright,
}

impl SongElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SongElementKind::Title => "TITLE",
            SongElementKind::Chords => "CHORDS",
            SongElementKind::Lyrics => "LYRICS",
            SongElementKind::Translation => "TRANSLATION",
            SongElementKind::NewLine => "NEW_LINE",
            SongElementKind::Copyright => "COPYRIGHT",
        }
    }
}

impl fmt::Display for SongElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified fragment of a song.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongElement {
    kind: SongElementKind,
    content: Option<String>,
}

impl SongElement {
    pub fn new(kind: SongElementKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: Some(content.into()),
        }
    }

    /// An element without any payload.
    pub fn bare(kind: SongElementKind) -> Self {
        Self {
            kind,
            content: None,
        }
    }

    pub fn new_line() -> Self {
        Self::new(SongElementKind::NewLine, "\n")
    }

    pub fn kind(&self) -> SongElementKind {
        self.kind
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Content, with a missing payload read as the empty string.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn is(&self, kind: SongElementKind) -> bool {
        self.kind == kind
    }

    /// True when there is no content or the content is whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

impl fmt::Display for SongElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Some(content) => write!(f, "{}[{:?}]", self.kind, content),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = SongElement::new(SongElementKind::Lyrics, "la la");
        let b = SongElement::new(SongElementKind::Lyrics, "la la");
        let c = SongElement::new(SongElementKind::Translation, "la la");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(SongElement::bare(SongElementKind::Lyrics), SongElement::new(SongElementKind::Lyrics, ""));
    }

    #[test]
    fn test_blank_detection() {
        assert!(SongElement::new(SongElementKind::Lyrics, "   ").is_blank());
        assert!(SongElement::bare(SongElementKind::Title).is_blank());
        assert!(!SongElement::new(SongElementKind::Lyrics, " a ").is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(SongElement::new_line().to_string(), "NEW_LINE[\"\\n\"]");
        assert_eq!(SongElement::bare(SongElementKind::Copyright).to_string(), "COPYRIGHT");
    }
}
