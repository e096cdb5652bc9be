//! Text width measurement.
//!
//! The core never knows which font it is rendering with; renderers hand in a
//! [`TextMeasure`]. Any `Fn(&str) -> i32` closure works, which is how
//! on-screen font metrics are usually plugged in.

/// Rendered width of a piece of text, in whatever unit the renderer uses.
/// Implementations should be monotonically non-decreasing in the text length
/// and return 0 for the empty string.
pub trait TextMeasure {
    fn width(&self, text: &str) -> i32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> i32,
{
    fn width(&self, text: &str) -> i32 {
        self(text)
    }
}

/// Every character is `unit` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monospace {
    pub unit: i32,
}

impl Monospace {
    pub fn new(unit: i32) -> Self {
        Self { unit }
    }
}

impl Default for Monospace {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TextMeasure for Monospace {
    fn width(&self, text: &str) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.unit)
    }
}

/// Advance widths of the standard Times-Roman font for ASCII 32..=126, in
/// 1/1000 em.
#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    // 0-9
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    // : ; < = > ? @
    278, 278, 564, 564, 564, 444, 921,
    // A-Z
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 469, 500, 333,
    // a-z
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    // { | } ~
    480, 200, 480, 541,
];

/// Width used for characters outside the table.
const TIMES_ROMAN_DEFAULT_WIDTH: u16 = 500;

/// Times-Roman at a given point size, the font songbook exports are set in.
/// Widths are truncated to whole points like PDF font metrics reported as
/// integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimesRoman {
    pub size: f32,
}

impl TimesRoman {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    fn glyph_width(c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            TIMES_ROMAN_WIDTHS[(code - 32) as usize]
        } else if c == '\u{a0}' {
            TIMES_ROMAN_WIDTHS[0]
        } else {
            TIMES_ROMAN_DEFAULT_WIDTH
        }
    }
}

impl TextMeasure for TimesRoman {
    fn width(&self, text: &str) -> i32 {
        let units: u64 = text.chars().map(|c| u64::from(Self::glyph_width(c))).sum();
        let width = units as f64 * f64::from(self.size) / 1000.0;
        width.min(f64::from(i32::MAX)) as i32
    }
}
