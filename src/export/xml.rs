//! XML serialization of a [`Document`].
//!
//! ```text
//! <songbook pages="2">
//!   <page number="1">
//!     <paragraph style="title" anchor="song-1" margin-bottom="15">
//!       <run font="Times-Bold" size="20">Amazing Grace</run>
//!     </paragraph>
//!     <blank-line/>
//!     <footer>- 1 -</footer>
//!   </page>
//!   ...
//! </songbook>
//! ```

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::document::{page_footer, Block, Document, Paragraph, Run, TocEntry};
use crate::error::SongtextError;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn text_element(writer: &mut XmlWriter, start: BytesStart, text: &str) -> Result<(), SongtextError> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_run(writer: &mut XmlWriter, run: &Run) -> Result<(), SongtextError> {
    let font = run.style.font();
    let size = font.size.to_string();
    let mut start = BytesStart::new("run");
    start.push_attribute(("style", run.style.name()));
    start.push_attribute(("font", font.family));
    start.push_attribute(("size", size.as_str()));
    text_element(writer, start, &run.text)
}

fn write_paragraph(writer: &mut XmlWriter, paragraph: &Paragraph) -> Result<(), SongtextError> {
    let mut start = BytesStart::new("paragraph");
    start.push_attribute(("style", paragraph.style.name()));
    if let Some(anchor) = &paragraph.anchor {
        start.push_attribute(("anchor", anchor.as_str()));
    }
    let spacing = [
        ("padding-top", paragraph.padding_top),
        ("padding-left", paragraph.padding_left),
        ("margin-bottom", paragraph.margin_bottom),
    ];
    for (name, value) in spacing {
        if value > 0 {
            let value = value.to_string();
            start.push_attribute((name, value.as_str()));
        }
    }
    writer.write_event(Event::Start(start))?;
    for run in &paragraph.runs {
        write_run(writer, run)?;
    }
    writer.write_event(Event::End(BytesEnd::new("paragraph")))?;
    Ok(())
}

fn write_toc_entry(writer: &mut XmlWriter, entry: &TocEntry) -> Result<(), SongtextError> {
    let page = entry.page.to_string();
    let mut start = BytesStart::new("toc-entry");
    start.push_attribute(("target", entry.anchor.as_str()));
    start.push_attribute(("page", page.as_str()));
    text_element(writer, start, &entry.title)
}

/// Serialize the document, pretty-printed with two-space indentation.
pub fn to_xml(document: &Document) -> Result<Vec<u8>, SongtextError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let pages = document.page_count().to_string();
    let mut root = BytesStart::new("songbook");
    root.push_attribute(("pages", pages.as_str()));
    writer.write_event(Event::Start(root))?;

    for (index, page) in document.pages().iter().enumerate() {
        let number = (index + 1).to_string();
        let mut start = BytesStart::new("page");
        start.push_attribute(("number", number.as_str()));
        writer.write_event(Event::Start(start))?;

        for block in &page.blocks {
            match block {
                Block::Paragraph(paragraph) => write_paragraph(&mut writer, paragraph)?,
                Block::BlankLine => {
                    writer.write_event(Event::Empty(BytesStart::new("blank-line")))?;
                }
                Block::Toc(entry) => write_toc_entry(&mut writer, entry)?,
            }
        }

        text_element(&mut writer, BytesStart::new("footer"), &page_footer(index + 1))?;
        writer.write_event(Event::End(BytesEnd::new("page")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("songbook")))?;
    Ok(writer.into_inner().into_inner())
}
