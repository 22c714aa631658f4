//! Document model: `Document → Section* → Element*`

mod docinfo;
mod element;
mod field;
mod image;
mod notes;
mod section;
mod settings;
mod table;

pub use docinfo::{format_w3c_date, parse_w3c_date, CustomValue, DocInfo};
pub use element::{
    title_style_name, Bookmark, ChangeKind, Element, ElementKind, Link, ListItem, NoteReference,
    Text, TextRun, Title, Toc, TrackChange, Tracked,
};
pub use field::{Field, FieldKind, FieldOption, FieldProperties};
pub use image::{Image, ImageSource, ImageStyle, Wrapping};
pub use notes::{Note, Notes};
pub use section::{HeaderFooter, HeaderFooterKind, Section};
pub use settings::DocumentSettings;
pub use table::{Cell, Row, Table};

use crate::error::{Error, Result};
use crate::style::{SectionStyle, StyleRegistry};
use crate::writer::{Format, WriterOptions};
use std::path::Path;

/// A word-processing document.
///
/// Owns its sections, its style registry and its note collections; nothing
/// is shared between documents.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub info: DocInfo,
    pub settings: DocumentSettings,
    pub styles: StyleRegistry,
    pub sections: Vec<Section>,
    pub footnotes: Notes,
    pub endnotes: Notes,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| Error::UnreadablePackage(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse DOCX bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        crate::reader::load(bytes)
    }

    /// Serialize with default writer options
    pub fn to_bytes(&self, format: Format) -> Result<Vec<u8>> {
        crate::writer::write(self, format, &WriterOptions::default())
    }

    /// Serialize to a file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: Format) -> Result<()> {
        let bytes = self.to_bytes(format)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Append a section and return it
    pub fn add_section(&mut self, style: SectionStyle) -> &mut Section {
        self.sections.push(Section::new(style));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Store a footnote body and return the element referencing it
    pub fn add_footnote(&mut self, elements: Vec<Element>) -> Element {
        Element::Footnote(self.footnotes.add(elements))
    }

    /// Store an endnote body and return the element referencing it
    pub fn add_endnote(&mut self, elements: Vec<Element>) -> Element {
        Element::Endnote(self.endnotes.add(elements))
    }

    /// All titles in document order, including those nested in tables
    pub fn titles(&self) -> Vec<&Title> {
        fn collect<'a>(elements: &'a [Element], out: &mut Vec<&'a Title>) {
            for e in elements {
                match e {
                    Element::Title(t) => out.push(t),
                    Element::Tracked(t) => collect(std::slice::from_ref(t.element.as_ref()), out),
                    Element::Table(table) => {
                        for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
                            collect(&cell.elements, out);
                        }
                    }
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        for section in &self.sections {
            collect(&section.elements, &mut out);
        }
        out
    }

    /// Plain text of the body, one line per block element
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .flat_map(|s| s.elements.iter())
            .map(Element::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check style chains for cycles
    pub fn validate(&self) -> Result<()> {
        self.styles.validate()
    }

    /// Visit every element of the document, depth first: section bodies,
    /// headers and footers, then footnote and endnote bodies.
    pub fn for_each_element<F: FnMut(&Element)>(&self, mut f: F) {
        fn walk<F: FnMut(&Element)>(elements: &[Element], f: &mut F) {
            for e in elements {
                f(e);
                match e {
                    Element::TextRun(run) => walk(&run.elements, f),
                    Element::ListItem(item) => walk(&item.elements, f),
                    Element::Tracked(t) => walk(std::slice::from_ref(t.element.as_ref()), f),
                    Element::Table(table) => {
                        for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
                            walk(&cell.elements, f);
                        }
                    }
                    _ => {}
                }
            }
        }

        for section in &self.sections {
            walk(&section.elements, &mut f);
            for hf in section.headers.iter().chain(section.footers.iter()) {
                walk(&hf.elements, &mut f);
            }
        }
        for (_, note) in self.footnotes.iter().chain(self.endnotes.iter()) {
            walk(&note.elements, &mut f);
        }
    }

    /// True when any element satisfies `pred`
    pub fn contains_element(&self, pred: impl Fn(&Element) -> bool) -> bool {
        let mut found = false;
        self.for_each_element(|e| found |= pred(e));
        found
    }
}
