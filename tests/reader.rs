//! Integration test: loading `.docx` packages, including the writer's own
//! output

mod common;

use common::{docx_with, init_logging, report, report_title, W_NS};
use linch_doc_rs::model::{
    ChangeKind, CustomValue, Element, HeaderFooterKind, TrackChange, Tracked,
};
use linch_doc_rs::opc::rel_types;
use linch_doc_rs::style::{FontStyle, SectionStyle, StyleRef};
use linch_doc_rs::{Document, Error, Format, Text, TextRun, Title};
use pretty_assertions::assert_eq;

fn reload(doc: &Document) -> Document {
    let bytes = doc.to_bytes(Format::Word2007).expect("document serializes");
    Document::from_bytes(&bytes).expect("written package loads")
}

fn bold(font: &Option<StyleRef<FontStyle>>) -> Option<bool> {
    font.as_ref()?.inline.as_ref()?.bold
}

fn italic(font: &Option<StyleRef<FontStyle>>) -> Option<bool> {
    font.as_ref()?.inline.as_ref()?.italic
}

#[test]
fn test_bold_and_italic_survive_a_round_trip() {
    init_logging();
    let mut run = TextRun::new();
    run.push(Text::new("Bold").with_font(FontStyle {
        bold: Some(true),
        ..Default::default()
    }))
    .push(Text::new(" plain "))
    .push(Text::new("Italic").with_font(FontStyle {
        italic: Some(true),
        ..Default::default()
    }));
    let mut doc = Document::new();
    doc.add_section(SectionStyle::default()).push(run);

    let loaded = reload(&doc);
    let Element::TextRun(run) = &loaded.sections[0].elements[0] else {
        panic!("expected a text run, got {:?}", loaded.sections[0].elements);
    };
    let texts: Vec<&Text> = run
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0].text, "Bold");
    assert_eq!(bold(&texts[0].font), Some(true));
    assert_eq!(texts[1].text, " plain ");
    assert_eq!(bold(&texts[1].font), None);
    assert_eq!(texts[2].text, "Italic");
    assert_eq!(italic(&texts[2].font), Some(true));
}

#[test]
fn test_report_round_trip() {
    let loaded = reload(&report());
    assert_eq!(loaded.sections.len(), 1);

    let elements = &loaded.sections[0].elements;
    assert_eq!(elements.len(), 2, "got {:?}", elements);
    assert_eq!(elements[0], Element::Title(report_title()));
    let Element::Table(table) = &elements[1] else {
        panic!("expected a table");
    };
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.rows[1].cells[0].text(), "Paper");
    assert_eq!(table.rows[1].cells[1].text(), "12");
}

#[test]
fn test_metadata_round_trip() {
    let mut doc = report();
    doc.info.title = Some("Budget".into());
    doc.info.creator = Some("Finance".into());
    doc.info.company = Some("Acme".into());
    doc.info.set_custom("Reviewed", CustomValue::Bool(true));
    doc.settings.track_revisions = true;

    let loaded = reload(&doc);
    assert_eq!(loaded.info.title.as_deref(), Some("Budget"));
    assert_eq!(loaded.info.creator.as_deref(), Some("Finance"));
    assert_eq!(loaded.info.company.as_deref(), Some("Acme"));
    assert_eq!(loaded.info.custom.get("Reviewed"), Some(&CustomValue::Bool(true)));
    assert!(loaded.settings.track_revisions);
}

#[test]
fn test_headers_and_notes_round_trip() {
    let mut doc = Document::new();
    let note = doc.add_footnote(vec![Text::new("Source: survey").into()]);
    let section = doc.add_section(SectionStyle::default());
    section
        .header_mut(HeaderFooterKind::Default)
        .push(Text::new("Running head"));
    let mut run = TextRun::new();
    run.push(Text::new("Claim")).push(note);
    section.push(run);

    let loaded = reload(&doc);
    let section = &loaded.sections[0];
    let header = section.header(HeaderFooterKind::Default).expect("header read");
    assert_eq!(header.elements, vec![Element::Text(Text::new("Running head"))]);

    assert_eq!(loaded.footnotes.len(), 1);
    let Element::TextRun(run) = &section.elements[0] else {
        panic!("expected a text run");
    };
    let Some(Element::Footnote(reference)) = run.elements.last() else {
        panic!("expected a footnote reference, got {:?}", run.elements);
    };
    let body = loaded.footnotes.get(reference.id).expect("note body read");
    assert_eq!(body.elements[0].text(), "Source: survey");
}

#[test]
fn test_tracked_insertion_round_trip() {
    let mut doc = Document::new();
    let change = TrackChange::new(ChangeKind::Insert, "Reviewer");
    let mut run = TextRun::new();
    run.push(Text::new("kept "))
        .push(Element::Tracked(Tracked::new(change, Text::new("added"))));
    doc.add_section(SectionStyle::default()).push(run);

    let loaded = reload(&doc);
    let Element::TextRun(run) = &loaded.sections[0].elements[0] else {
        panic!("expected a text run");
    };
    let Element::Tracked(tracked) = &run.elements[1] else {
        panic!("expected a tracked element, got {:?}", run.elements);
    };
    assert_eq!(tracked.change.kind, ChangeKind::Insert);
    assert_eq!(tracked.change.author, "Reviewer");
    assert_eq!(tracked.element.text(), "added");
}

#[test]
fn test_empty_paragraph_reads_as_text_break() {
    let bytes = docx_with(
        r#"<w:p><w:r><w:t>a</w:t></w:r></w:p><w:p/><w:sectPr/>"#,
        &[],
    );
    let doc = Document::from_bytes(&bytes).unwrap();
    assert_eq!(
        doc.sections[0].elements,
        vec![Element::Text(Text::new("a")), Element::TextBreak]
    );
}

#[test]
fn test_unknown_elements_are_skipped() {
    init_logging();
    let bytes = docx_with(
        r#"<w:customThing/><w:p><w:r><w:t>kept</w:t></w:r><w:r><w:unknownRunChild/></w:r></w:p>"#,
        &[],
    );
    let doc = Document::from_bytes(&bytes).unwrap();
    assert_eq!(doc.sections[0].elements, vec![Element::Text(Text::new("kept"))]);
}

#[test]
fn test_styles_part_is_registered() {
    let styles = format!(
        r#"<w:styles xmlns:w="{}">
            <w:style w:type="paragraph" w:styleId="Quote"><w:name w:val="Quote"/><w:pPr><w:ind w:left="720"/></w:pPr></w:style>
        </w:styles>"#,
        W_NS
    );
    let bytes = docx_with(
        r#"<w:p><w:pPr><w:pStyle w:val="Quote"/></w:pPr><w:r><w:t>cited</w:t></w:r></w:p>"#,
        &[(rel_types::STYLES, "styles.xml", &styles)],
    );
    let doc = Document::from_bytes(&bytes).unwrap();
    assert!(doc.styles.contains("Quote"));

    let Element::Text(text) = &doc.sections[0].elements[0] else {
        panic!("expected text");
    };
    assert_eq!(
        text.paragraph.as_ref().and_then(|p| p.name.as_deref()),
        Some("Quote")
    );
}

#[test]
fn test_unreadable_input() {
    assert!(matches!(
        Document::from_bytes(b"%PDF-1.7"),
        Err(Error::UnreadablePackage(_))
    ));
    assert!(matches!(
        Document::open("does/not/exist.docx"),
        Err(Error::UnreadablePackage(_))
    ));
}
