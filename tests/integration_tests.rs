//! Integration tests for songtext
//!
//! Tests the full pipeline from a YAML songbook to exported documents.

use songtext::export::Block;
use songtext::history::{is, is_one_of};
use songtext::{
    export_songbook, export_songbook_text, layout, parse, render, ExportFormat, Monospace, ParseOptions, Song,
    SongElementHistory, SongElementKind, Songbook, SongtextError,
};

const SONGBOOK: &str = r#"
export:
  show-chords: true
  show-translation: true
songs:
  - id: grace
    title: Amazing Grace
    composer: John Newton
    chord-sequence: G C G D
    lyrics: |
      G          C        G
      Amazing grace how sweet the sound
      [Erstaunliche Gnade]

      G               D
      That saved a wretch like me
  - title: Silent Words
    author-text: Nobody
    lyrics: |
      Only words here
      [Nur Worte hier]
  - title: Closing
    lyrics: |
      D    A
      Amen amen
"#;

#[test]
fn test_export_full_songbook() {
    let result = export_songbook(SONGBOOK);
    assert!(result.is_ok(), "Should export the songbook");
    let xml = String::from_utf8(result.unwrap()).unwrap();
    assert!(xml.contains(r#"<songbook pages="4">"#));
    assert!(xml.contains("Amazing grace how sweet the sound"));
    assert!(xml.contains("Erstaunliche Gnade"));
    assert!(xml.contains("Music: John Newton"));
    assert!(xml.contains("Text: Nobody"));
    assert!(xml.contains(r#"<toc-entry target="grace" page="1">Amazing Grace</toc-entry>"#));
    assert!(xml.contains(r#"<toc-entry target="song-2" page="2">Silent Words</toc-entry>"#));
    assert!(xml.contains(r#"<toc-entry target="song-3" page="3">Closing</toc-entry>"#));
    assert!(xml.contains("Table of Contents"));
}

#[test]
fn test_only_songs_with_chords() {
    let mut songbook = Songbook::from_yaml(SONGBOOK).unwrap();
    songbook.export.only_songs_with_chords = true;
    let document = render(&songbook.export, &songbook.songs, Monospace::default()).unwrap();
    assert_eq!(document.page_count(), 3);
    let titles: Vec<_> = document.toc().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Amazing Grace", "Closing"]);
}

#[test]
fn test_export_without_chords() {
    let yaml = SONGBOOK.replace("show-chords: true", "show-chords: false");
    let text = export_songbook_text(&yaml).unwrap();
    assert!(text.contains("Amazing grace how sweet the sound"));
    assert!(!text.contains("G          C"));
    assert!(!text.contains("G C G D"));
    assert!(!text.contains("D    A"));
}

#[test]
fn test_export_text_keeps_chord_columns() {
    let text = export_songbook_text(SONGBOOK).unwrap();
    assert!(text.contains("G          C        G\nAmazing grace how sweet the sound\n"));
    assert!(text.contains("- 1 -"));
    assert!(text.contains("- 4 -"));
    assert_eq!(text.matches('\u{c}').count(), 3);
}

#[test]
fn test_export_without_translation() {
    let yaml = SONGBOOK.replace("show-translation: true", "show-translation: false");
    let text = export_songbook_text(&yaml).unwrap();
    assert!(!text.contains("Erstaunliche Gnade"));
    assert!(!text.contains("Nur Worte hier"));
    assert!(text.contains("Only words here"));
}

#[test]
fn test_invalid_songbook() {
    let result = export_songbook("songs:\n  - title: [not, a, string]\n");
    assert!(matches!(result, Err(SongtextError::Config(_))));
}

#[test]
fn test_control_character_fails_whole_export() {
    let songs = vec![
        Song::new("Fine").with_lyrics("all good"),
        Song::new("Broken").with_lyrics("escape \u{1b}[0m"),
    ];
    let result = render(&ExportFormat::default(), &songs, Monospace::default());
    assert!(result.is_err(), "Should reject control characters");
    assert!(result.unwrap_err().to_string().starts_with("Document error on page 2"));
}

#[test]
fn test_history_over_parsed_song() {
    let song = Song::new("t").with_lyrics("C D\nfirst line\n[t1]");
    let elements = parse(&song, ParseOptions::all());
    let mut history = SongElementHistory::new(&elements);
    let mut translation_seen = false;
    while let Some(element) = history.advance() {
        if element.is(SongElementKind::Translation) {
            translation_seen = true;
            let result = history
                .query_including_current()
                .without(&[SongElementKind::NewLine])
                .last_seen(&[
                    is(SongElementKind::Chords),
                    is(SongElementKind::Lyrics),
                    is_one_of(&[SongElementKind::Translation]),
                ])
                .end();
            assert!(result.is_matched());
            assert_eq!(result.matched_elements().len(), 3);
            assert_eq!(result.matched_elements()[1].text(), "first line");
        }
    }
    assert!(translation_seen);
    assert!(history.is_exhausted());
}

#[test]
fn test_presentation_of_songbook_song() {
    let songbook = Songbook::from_yaml(SONGBOOK).unwrap();
    let presentation = layout(&songbook.songs[0], ParseOptions::all(), Monospace::default());
    // title, two stanzas, copyright
    assert_eq!(presentation.parts().len(), 4);
    let first = &presentation.parts()[1].lines[0];
    assert_eq!(first.chords.as_deref(), Some("G          C        G"));
    assert_eq!(first.text, "Amazing grace how sweet the sound");
}

#[test]
fn test_document_blocks() {
    let songbook = Songbook::from_yaml(SONGBOOK).unwrap();
    let document = render(&songbook.export, &songbook.songs, Monospace::default()).unwrap();
    let blank_lines = document.pages()[0]
        .blocks
        .iter()
        .filter(|block| matches!(block, Block::BlankLine))
        .count();
    assert_eq!(blank_lines, 2, "Stanza break and copyright separator");
}
