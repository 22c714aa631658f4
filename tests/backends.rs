//! Integration test: one document through every backend

mod common;

use common::{init_logging, main_content, report, zip_entry, zip_names};
use linch_doc_rs::model::{Element, ElementKind, Toc};
use linch_doc_rs::style::{FontStyle, ParagraphStyle, SectionStyle, StyleFamily};
use linch_doc_rs::units::Length;
use linch_doc_rs::writer::dispatch::{supported_families, supported_kinds};
use linch_doc_rs::writer::odf::OdfWriter;
use linch_doc_rs::writer::rtf::RtfWriter;
use linch_doc_rs::writer::word::WordWriter;
use linch_doc_rs::{Document, Format, Table, Text, WriterOptions};
use pretty_assertions::assert_eq;

const ALL_FORMATS: [Format; 3] = [Format::Word2007, Format::OdText, Format::Rtf];

#[test]
fn test_report_in_every_format() {
    init_logging();
    let doc = report();

    let word = main_content(&doc, Format::Word2007);
    assert_eq!(word.matches("<w:tbl>").count(), 1);
    assert_eq!(word.matches(r#"<w:pStyle w:val="Heading1"/>"#).count(), 1);
    assert!(word.contains("<w:t>Report</w:t>"));
    assert!(word.contains("<w:b/>"));
    assert!(word.contains(r#"<w:sz w:val="40"/>"#));
    assert_eq!(word.matches("<w:tr>").count(), 2);
    assert_eq!(word.matches("<w:tc>").count(), 4);

    let odf = main_content(&doc, Format::OdText);
    assert_eq!(odf.matches("<table:table ").count(), 1);
    assert_eq!(odf.matches("<text:h ").count(), 1);
    assert!(odf.contains(r#"text:outline-level="1""#));
    assert!(odf.contains(r#"fo:font-size="20pt""#));
    assert!(odf.contains(r#"fo:font-weight="bold""#));
    assert!(odf.contains(">Report<"));
    assert_eq!(odf.matches("<table:table-row>").count(), 2);
    assert!(odf.contains(">Paper<"));

    let rtf = main_content(&doc, Format::Rtf);
    assert!(rtf.starts_with("{\\rtf1"));
    let (_, body) = rtf.split_once("\\deftab720").expect("document words");
    assert_eq!(body.matches("\\outlinelevel").count(), 1);
    let heading_at = body.find("Report").expect("heading text");
    let start = body[..heading_at].rfind("\\pard").expect("heading paragraph");
    let heading = &body[start..heading_at];
    assert!(heading.contains("\\outlinelevel0"), "{}", heading);
    assert!(heading.contains("\\b"), "{}", heading);
    assert!(heading.contains("\\fs40"), "{}", heading);
    assert_eq!(body.matches("\\row").count(), 2);
    assert!(body.contains("Amount\\cell"));
}

#[test]
fn test_short_hex_color_in_every_format() {
    let mut doc = Document::new();
    let red = linch_doc_rs::Color::hex("F00").unwrap();
    doc.add_section(SectionStyle::default())
        .push(Text::new("alert").with_font(FontStyle::new().with_color(red)));

    let rtf = main_content(&doc, Format::Rtf);
    assert!(rtf.contains("\\red255\\green0\\blue0;"));
    assert!(main_content(&doc, Format::Word2007).contains(r#"<w:color w:val="FF0000"/>"#));
    assert!(main_content(&doc, Format::OdText).contains(r##"fo:color="#ff0000""##));
}

#[test]
fn test_output_is_deterministic() {
    let mut doc = report();
    doc.info.title = Some("Budget".into());
    for format in ALL_FORMATS {
        let first = doc.to_bytes(format).unwrap();
        let second = doc.to_bytes(format).unwrap();
        assert!(first == second, "{:?} output differs between runs", format);
    }
}

#[test]
fn test_disk_caching_matches_memory() {
    let doc = report();
    let cached = WriterOptions::default().with_disk_caching(None);
    for format in ALL_FORMATS {
        let in_memory = linch_doc_rs::writer::write(&doc, format, &WriterOptions::default()).unwrap();
        let on_disk = linch_doc_rs::writer::write(&doc, format, &cached).unwrap();
        assert!(in_memory == on_disk, "{:?} output depends on buffering", format);
    }
}

#[test]
fn test_dispatch_tables() {
    let all = ElementKind::ALL.to_vec();
    let without_toc: Vec<_> = all
        .iter()
        .copied()
        .filter(|k| *k != ElementKind::Toc)
        .collect();

    assert_eq!(supported_kinds::<WordWriter<'static>>(), all);
    assert_eq!(supported_kinds::<OdfWriter<'static>>(), without_toc);
    assert_eq!(supported_kinds::<RtfWriter<'static>>(), without_toc);

    assert_eq!(
        supported_families::<RtfWriter<'static>>(),
        vec![StyleFamily::Font, StyleFamily::Paragraph]
    );
    assert!(!supported_families::<WordWriter<'static>>().contains(&StyleFamily::Section));
}

#[test]
fn test_unsupported_kind_writes_nothing() {
    let mut doc = Document::new();
    doc.add_section(SectionStyle::default())
        .push(Element::Toc(Toc::default()))
        .add_text("after");

    let odf = main_content(&doc, Format::OdText);
    assert!(!odf.contains("table-of-content"));
    assert!(odf.contains(">after</text:p>"));

    let rtf = main_content(&doc, Format::Rtf);
    assert!(!rtf.contains("TOC"));
    assert!(rtf.contains("after\\par"));

    let word = main_content(&doc, Format::Word2007);
    assert!(word.contains("TOC \\o"));
}

#[test]
fn test_rtf_cell_boundaries_are_cumulative() {
    let mut table = Table::new();
    let row = table.add_row(None);
    row.add_cell(Length::twip(1000.0)).push(Text::new("a"));
    row.add_cell(Length::twip(2500.0)).push(Text::new("b"));
    let mut doc = Document::new();
    doc.add_section(SectionStyle::default()).add_table(table);

    let rtf = main_content(&doc, Format::Rtf);
    assert!(rtf.contains("\\cellx1000\\cellx3500"));
}

#[test]
fn test_odf_spacing_in_centimetres() {
    let mut doc = Document::new();
    doc.add_section(SectionStyle::default()).push(Text::new("spaced").with_paragraph(
        ParagraphStyle {
            space_before: Some(88),
            ..Default::default()
        },
    ));
    let odf = main_content(&doc, Format::OdText);
    assert!(odf.contains(r#"fo:margin-top="0.2cm""#));
}

#[test]
fn test_odt_package_layout() {
    let bytes = report().to_bytes(Format::OdText).unwrap();
    let names = zip_names(&bytes);
    assert_eq!(names[0], "mimetype");
    assert!(names.iter().any(|n| n == "styles.xml"));
    assert_eq!(zip_entry(&bytes, "mimetype"), "application/vnd.oasis.opendocument.text");
}

#[test]
fn test_save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");
    report().save(&path, Format::Word2007).unwrap();

    let reopened = Document::open(&path).unwrap();
    assert_eq!(reopened.titles().len(), 1);
    assert_eq!(reopened.titles()[0].text, "Report");
}
