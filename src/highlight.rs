//! Song list cells and search-match highlighting.
//!
//! A song list shows each song as its title plus the first lyrics line.
//! While searching, matches in both are wrapped using a regex replacement,
//! e.g. find `(?i)(grace)` and replace `<b>$1</b>`.

use regex::Regex;

use crate::error::SongtextError;
use crate::parser::first_lyrics_line;
use crate::song::Song;

/// What a song list shows for one song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongCell {
    pub title: String,
    pub first_line: String,
}

impl SongCell {
    pub fn from_song(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            first_line: first_lyrics_line(song),
        }
    }
}

/// Applies one find/replace pair to song cells.
#[derive(Debug, Clone)]
pub struct Highlighter {
    find: Regex,
    replace: String,
}

impl Highlighter {
    /// `replace` may refer to capture groups as `$1` or `${name}`.
    pub fn new(find: &str, replace: &str) -> Result<Self, SongtextError> {
        let find = Regex::new(find).map_err(|e| SongtextError::Highlight(e.to_string()))?;
        Ok(Self {
            find,
            replace: replace.to_string(),
        })
    }

    pub fn highlight_text(&self, text: &str) -> String {
        self.find.replace_all(text, self.replace.as_str()).into_owned()
    }

    /// Replace every match in the title and the first line.
    pub fn highlight(&self, cell: &mut SongCell) {
        if self.find.as_str().trim().is_empty() || self.replace.trim().is_empty() {
            return;
        }
        cell.title = self.highlight_text(&cell.title);
        cell.first_line = self.highlight_text(&cell.first_line);
    }
}
