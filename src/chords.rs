//! Chord symbol recognition
//!
//! Decides whether a physical lyrics line is a chord line. A chord line is a
//! line made up only of whitespace-separated chord tokens (`C`, `Am7`,
//! `F#m7b5`, `Bb/D`, `(G)`, bar marks, `N.C.`, ...) with at least one real
//! chord symbol. Stray capitals like `X` are tolerated next to real chords.
//! A line with a single chord symbol also needs column spacing (two or more
//! blanks in a row), otherwise short lyrics like `A` or `Am I` would pass.
//! Anything with brackets is never a chord line because brackets mark
//! translations.
//!
//! # Examples
//! ```
//! use songtext::chords::{is_chord_symbol, is_chords_line};
//!
//! assert!(is_chord_symbol("F#m7b5"));
//! assert!(is_chord_symbol("Bb/D"));
//! assert!(!is_chord_symbol("Amen"));
//!
//! assert!(is_chords_line("A     B          X"));
//! assert!(is_chords_line("    G"));
//! assert!(!is_chords_line("Amen"));
//! assert!(!is_chords_line("Am I"));
//! assert!(!is_chords_line("   "));
//! ```

/// Multi-letter quality words, matched before single quality characters.
const QUALITY_WORDS: [&str; 6] = ["maj", "min", "dim", "aug", "sus", "add"];

/// Single characters that may appear in a chord quality.
const QUALITY_CHARS: [char; 10] = ['m', 'M', '+', '-', '°', 'ø', '#', 'b', '(', ')'];

/// Non-chord tokens that may still appear on a chord line.
const LINE_MARKS: [&str; 10] = ["|", "||", "|:", ":|", "/", "//", "-", "%", "N.C.", "NC"];

fn is_root(c: char) -> bool {
    // H is the German B
    matches!(c, 'A'..='H')
}

fn word_at(chars: &[char], idx: usize, word: &str) -> bool {
    let mut i = idx;
    for w in word.chars() {
        if chars.get(i) != Some(&w) {
            return false;
        }
        i += 1;
    }
    true
}

/// Parse a note name (root or bass) starting at `idx`, returning the index
/// after it.
fn note_end(chars: &[char], idx: usize) -> Option<usize> {
    let root = *chars.get(idx)?;
    if !is_root(root) {
        return None;
    }
    let mut idx = idx + 1;
    if matches!(chars.get(idx), Some('#') | Some('b')) {
        idx += 1;
    }
    Some(idx)
}

/// Recognize a chord symbol such as `C`, `Dm`, `G7`, `Cmaj7`, `F#m7b5`,
/// `Gsus4`, `Cadd9`, `Bb/D` or `(Em)`.
pub fn is_chord_symbol(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return false;
    }

    let opening = chars.iter().filter(|&&c| c == '(').count();
    let closing = chars.iter().filter(|&&c| c == ')').count();
    if opening != closing {
        return false;
    }

    let mut idx = 0;
    if chars[idx] == '(' {
        idx += 1;
    }

    idx = match note_end(&chars, idx) {
        Some(end) => end,
        None => return false,
    };

    // Quality
    while idx < chars.len() && chars[idx] != '/' {
        if let Some(word) = QUALITY_WORDS.iter().find(|w| word_at(&chars, idx, w)) {
            idx += word.len();
            continue;
        }
        let c = chars[idx];
        if c.is_ascii_digit() || QUALITY_CHARS.contains(&c) {
            idx += 1;
            continue;
        }
        return false;
    }

    // Bass note
    if idx < chars.len() {
        idx = match note_end(&chars, idx + 1) {
            Some(end) => end,
            None => return false,
        };
        if chars.get(idx) == Some(&')') {
            idx += 1;
        }
    }

    idx == chars.len()
}

/// Repeat counters like `x2` or `3x`.
fn is_repeat_counter(token: &str) -> bool {
    let digits = token
        .strip_prefix('x')
        .or_else(|| token.strip_suffix('x'));
    matches!(digits, Some(d) if !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
}

fn is_single_capital(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Whether `token` may appear on a chord line.
pub fn is_chord_line_token(token: &str) -> bool {
    is_chord_symbol(token)
        || is_single_capital(token)
        || LINE_MARKS.contains(&token)
        || is_repeat_counter(token)
}

/// Whether the whole line is a chord line.
pub fn is_chords_line(line: &str) -> bool {
    if line.contains('[') || line.contains(']') {
        return false;
    }
    let mut symbols = 0;
    for token in line.split_whitespace() {
        if !is_chord_line_token(token) {
            return false;
        }
        if is_chord_symbol(token) {
            symbols += 1;
        }
    }
    symbols >= 2 || (symbols == 1 && has_column_spacing(line))
}

/// Two blanks in a row, as chords are placed over columns.
fn has_column_spacing(line: &str) -> bool {
    line.contains("  ") || line.contains('\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_symbols() {
        for chord in [
            "C", "Dm", "G7", "Cmaj7", "F#", "Bbm", "F#m7b5", "Gsus4", "Cadd9", "Bb/D", "C/E",
            "(Em)", "Hm", "Cm(maj7)", "G+", "Ddim", "Eaug", "A7/C#", "(G/B)",
        ] {
            assert!(is_chord_symbol(chord), "{} should be a chord", chord);
        }
    }

    #[test]
    fn test_words_are_not_chords() {
        for word in ["Amen", "Bad", "Be", "Dad", "Abe", "X", "", "(C", "C/", "C/x", "am", "Lord"] {
            assert!(!is_chord_symbol(word), "{:?} should not be a chord", word);
        }
    }

    #[test]
    fn test_chord_lines() {
        assert!(is_chords_line("C D"));
        assert!(is_chords_line("A     B     C"));
        assert!(is_chords_line("  G        D/F#   Em7   C  "));
        assert!(is_chords_line("| G  C | D  x2"));
        assert!(is_chords_line("N.C.   A     B          Y"));
    }

    #[test]
    fn test_lyric_lines() {
        assert!(!is_chords_line("first line"));
        assert!(!is_chords_line("Amen"));
        assert!(!is_chords_line("Oh Lord"));
        assert!(!is_chords_line("[C D]"));
        assert!(!is_chords_line("   [t2]   "));
        assert!(!is_chords_line(""));
        assert!(!is_chords_line("    "));
        assert!(!is_chords_line("| - |"));
    }

    #[test]
    fn test_short_lyrics_are_not_chords() {
        for line in ["I", "O", "A", "Am I", "Hm", "Be", "A X", "I  O"] {
            assert!(!is_chords_line(line), "{:?} should be lyrics", line);
        }
    }

    #[test]
    fn test_single_chord_needs_column_spacing() {
        assert!(is_chords_line("    G"));
        assert!(is_chords_line("G\t|"));
        assert!(is_chords_line("Am  X"));
        assert!(!is_chords_line("G"));
        assert!(!is_chords_line("Am X"));
    }

    #[test]
    fn test_repeat_counters() {
        assert!(is_chord_line_token("x2"));
        assert!(is_chord_line_token("3x"));
        assert!(!is_chord_line_token("x"));
        assert!(!is_chord_line_token("xx"));
    }
}
