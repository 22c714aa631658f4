//! Shared helpers for the integration tests

#![allow(dead_code)]

use linch_doc_rs::model::Document;
use linch_doc_rs::opc::{content_type, rel_types, well_known, Package, Part, Relationships};
use linch_doc_rs::style::{FontStyle, SectionStyle, StyleRef};
use linch_doc_rs::units::Length;
use linch_doc_rs::{Format, Table, Text, Title};
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One entry of a zip archive as text
pub fn zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("output is a zip archive");
    let mut file = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("entry {} missing", name));
    let mut out = String::new();
    file.read_to_string(&mut out).expect("entry is UTF-8");
    out
}

/// Entry names in archive order
pub fn zip_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).expect("output is a zip archive");
    archive.file_names().map(str::to_string).collect()
}

/// Serialized output of every backend, as text for RTF and as the main
/// content entry for the packages
pub fn main_content(doc: &Document, format: Format) -> String {
    let bytes = doc.to_bytes(format).expect("document serializes");
    match format {
        Format::Word2007 => zip_entry(&bytes, "word/document.xml"),
        Format::OdText => zip_entry(&bytes, "content.xml"),
        Format::Rtf => String::from_utf8(bytes).expect("RTF output is ASCII"),
    }
}

/// `Report` at depth 1, bold 20pt
pub fn report_title() -> Title {
    Title {
        style: Some(StyleRef::inline(FontStyle::new().bold().with_size(20.0))),
        ..Title::new("Report", 1)
    }
}

/// A `Report` heading followed by a 2x2 table
pub fn report() -> Document {
    let mut doc = Document::new();
    let section = doc.add_section(SectionStyle::default());
    section.push(report_title());

    let mut table = Table::new();
    for (a, b) in [("Item", "Amount"), ("Paper", "12")] {
        let row = table.add_row(None);
        row.add_cell(Length::cm(4.0)).push(Text::new(a));
        row.add_cell(Length::cm(3.0)).push(Text::new(b));
    }
    section.add_table(table);
    doc
}

/// A `.docx` package with the given body and extra parts related to the
/// main document as `(relationship type, file name under word/, xml)`
pub fn docx_with(body: &str, related: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut package = Package::new();
    package.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");

    let mut rels = Relationships::new();
    for (rel_type, name, xml) in related {
        rels.add(rel_type, name);
        let uri = linch_doc_rs::PartUri::new(&format!("/word/{}", name)).expect("valid part name");
        package.add_part(Part::new(uri, content_type::XML, xml.as_bytes().to_vec()));
    }

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, R_NS, body
    );
    package.add_part(
        Part::new(
            well_known::document(),
            content_type::MAIN_DOCUMENT,
            document.into_bytes(),
        )
        .with_relationships(rels),
    );
    package.to_bytes(true).expect("package serializes")
}
