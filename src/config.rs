//! # Songbook Configuration
//!
//! Export settings and the songs to export, loaded from YAML:
//!
//! ```yaml
//! export:
//!   show-chords: true
//!   show-translation: false
//!   only-songs-with-chords: false
//! songs:
//!   - title: Amazing Grace
//!     composer: John Newton
//!     chord-sequence: G C G D
//!     lyrics: |
//!       G          C        G
//!       Amazing grace how sweet the sound
//! ```
//!
//! Every key is optional; missing export settings show everything and
//! filter nothing.

use serde::Deserialize;

use crate::error::SongtextError;
use crate::song::Song;

/// What an export includes.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExportFormat {
    pub show_translation: bool,
    pub show_chords: bool,
    /// Leave out songs without a single chord line.
    pub only_songs_with_chords: bool,
}

impl ExportFormat {
    pub fn new(show_translation: bool, show_chords: bool, only_songs_with_chords: bool) -> Self {
        Self {
            show_translation,
            show_chords,
            only_songs_with_chords,
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::new(true, true, false)
    }
}

/// A YAML songbook: export settings plus songs, in export order.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Songbook {
    pub export: ExportFormat,
    pub songs: Vec<Song>,
}

impl Songbook {
    pub fn from_yaml(content: &str) -> Result<Self, SongtextError> {
        let songbook: Songbook =
            serde_yaml::from_str(content).map_err(|e| SongtextError::Config(e.to_string()))?;
        if let Some(position) = songbook.songs.iter().position(|song| song.title.trim().is_empty()) {
            log::warn!("song #{} has no title", position + 1);
        }
        Ok(songbook)
    }
}
