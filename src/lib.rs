//! # linch-doc-rs
//!
//! A word-processing document model with a DOCX reader and writers for
//! DOCX, ODT and RTF.
//!
//! ## Features
//!
//! - Build documents from sections, paragraphs, tables, images, fields,
//!   lists, notes and tracked changes
//! - Named styles with inheritance, resolved per document
//! - Load `.docx` packages into the same model
//! - Write the model as Office Open XML, OpenDocument Text or RTF
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linch_doc_rs::{Document, Format, SectionStyle, Table};
//! use linch_doc_rs::units::Length;
//!
//! let mut doc = Document::new();
//! let section = doc.add_section(SectionStyle::new());
//! section.add_title("Report", 1);
//!
//! let mut table = Table::new();
//! let row = table.add_row(None);
//! row.add_cell(Length::cm(4.0)).push(linch_doc_rs::Text::new("Total"));
//! section.add_table(table);
//!
//! doc.save("report.odt", Format::OdText)?;
//!
//! // Read it back from a DOCX file
//! let doc = Document::open("input.docx")?;
//! println!("{}", doc.text());
//! ```

pub mod color;
pub mod error;
pub mod image;
pub mod model;
pub mod opc;
pub mod reader;
pub mod style;
pub mod units;
pub mod writer;
pub mod xml;

pub use color::Color;
pub use error::{Error, Result};
pub use model::{
    Bookmark, Cell, Document, Element, ElementKind, Field, FieldKind, HeaderFooter,
    HeaderFooterKind, Image, Link, ListItem, Row, Section, Table, Text, TextRun, Title, Toc,
};
pub use opc::{Package, Part, PartUri};
pub use style::{FontStyle, ParagraphStyle, SectionStyle, StyleRef, StyleRegistry};
pub use writer::{Format, WriterOptions};
