//! Paginated document model built by the exporter.
//!
//! A [`Document`] is a list of pages. Each page holds blocks: paragraphs made
//! of styled runs, explicit blank lines, or table-of-contents lines. Text is
//! checked when a block is added; the model refuses control characters
//! (other than tab and line breaks) because neither XML nor a printed page can
//! carry them.

use crate::error::SongtextError;

/// Font family and size of a text style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: &'static str,
    pub size: f32,
}

/// Named text styles of a songbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Title,
    Lyrics,
    Chords,
    Translation,
    Copyright,
}

impl TextStyle {
    pub fn name(self) -> &'static str {
        match self {
            TextStyle::Title => "title",
            TextStyle::Lyrics => "lyrics",
            TextStyle::Chords => "chords",
            TextStyle::Translation => "translation",
            TextStyle::Copyright => "copyright",
        }
    }

    pub fn font(self) -> Font {
        match self {
            TextStyle::Title => Font {
                family: "Times-Bold",
                size: 20.0,
            },
            // chords are corrected against 12pt lyrics, so they share the font
            TextStyle::Lyrics | TextStyle::Chords => Font {
                family: "Times-Roman",
                size: 12.0,
            },
            TextStyle::Translation => Font {
                family: "Times-Italic",
                size: 8.0,
            },
            TextStyle::Copyright => Font {
                family: "Times-Italic",
                size: 10.0,
            },
        }
    }
}

/// A piece of text in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub style: TextStyle,
    pub text: String,
}

impl Run {
    pub fn new(style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// A paragraph: runs set one after another, plus spacing in points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub style: TextStyle,
    pub runs: Vec<Run>,
    pub padding_top: u16,
    pub padding_left: u16,
    pub margin_bottom: u16,
    /// Link target other blocks can refer to.
    pub anchor: Option<String>,
}

impl Paragraph {
    pub fn new(style: TextStyle) -> Self {
        Self {
            style,
            runs: Vec::new(),
            padding_top: 0,
            padding_left: 0,
            margin_bottom: 0,
            anchor: None,
        }
    }

    /// A paragraph holding a single run in its own style.
    pub fn with_text(style: TextStyle, text: impl Into<String>) -> Self {
        let mut paragraph = Self::new(style);
        paragraph.push(Run::new(style, text));
        paragraph
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// All run texts concatenated.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Anchor of the song's title paragraph.
    pub anchor: String,
    pub title: String,
    /// Page the song starts on, counted from 1.
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    /// An empty line between stanzas.
    BlankLine,
    Toc(TocEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub blocks: Vec<Block>,
}

/// A paginated document. Always has at least one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
    toc: Vec<TocEntry>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn check_text(text: &str) -> Result<(), String> {
    match text.chars().find(|&c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')) {
        Some(c) => Err(format!("control character U+{:04X} in {:?}", u32::from(c), text)),
        None => Ok(()),
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            toc: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of the page blocks are currently added to, counted from 1.
    pub fn current_page(&self) -> usize {
        self.pages.len()
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    fn error(&self, message: String) -> SongtextError {
        SongtextError::Document {
            page: self.current_page(),
            message,
        }
    }

    fn check_block(&self, block: &Block) -> Result<(), SongtextError> {
        let result = match block {
            Block::Paragraph(paragraph) => paragraph
                .runs
                .iter()
                .map(|run| run.text.as_str())
                .chain(paragraph.anchor.as_deref())
                .try_for_each(check_text),
            Block::BlankLine => Ok(()),
            Block::Toc(entry) => check_text(&entry.title).and_then(|_| check_text(&entry.anchor)),
        };
        result.map_err(|message| self.error(message))
    }

    /// Add a block to the current page.
    pub fn add(&mut self, block: Block) -> Result<(), SongtextError> {
        self.check_block(&block)?;
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
        Ok(())
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> Result<(), SongtextError> {
        self.add(Block::Paragraph(paragraph))
    }

    /// Record a table-of-contents entry pointing at the current page.
    pub fn add_toc_entry(&mut self, anchor: &str, title: &str) -> Result<(), SongtextError> {
        let entry = TocEntry {
            anchor: anchor.to_string(),
            title: title.to_string(),
            page: self.current_page(),
        };
        check_text(&entry.title)
            .and_then(|_| check_text(&entry.anchor))
            .map_err(|message| self.error(message))?;
        self.toc.push(entry);
        Ok(())
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    /// Plain text rendering: paragraphs as lines, a centered `- N -` footer
    /// under every page, pages separated by form feeds.
    pub fn to_text(&self) -> String {
        const WIDTH: usize = 60;
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\u{c}');
            }
            for block in &page.blocks {
                match block {
                    Block::Paragraph(paragraph) => {
                        if paragraph.padding_top > 0 {
                            out.push('\n');
                        }
                        let indent = " ".repeat(usize::from(paragraph.padding_left / 6));
                        for line in paragraph.text().trim_end_matches('\n').split('\n') {
                            out.push_str(&indent);
                            out.push_str(line);
                            out.push('\n');
                        }
                    }
                    Block::BlankLine => out.push('\n'),
                    Block::Toc(entry) => {
                        let page = entry.page.to_string();
                        let used = entry.title.chars().count() + page.len() + 2;
                        let dots = ".".repeat(WIDTH.saturating_sub(used).max(3));
                        out.push_str(&format!("{} {} {}\n", entry.title, dots, page));
                    }
                }
            }
            let footer = page_footer(index + 1);
            let pad = (WIDTH.saturating_sub(footer.len())) / 2;
            out.push_str(&format!("\n{}{}\n", " ".repeat(pad), footer));
        }
        out
    }
}

/// Footer printed at the bottom of every page.
pub fn page_footer(page: usize) -> String {
    format!("- {} -", page)
}
