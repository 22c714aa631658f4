//! `word/styles.xml`
//!
//! Registry names map to style ids by dropping whitespace. A font style
//! that also carries paragraph properties becomes a linked pair: a
//! paragraph style with the registry name plus a character style
//! `{id}Char` used by runs that reference it.

use super::properties;
use super::WordWriter;
use crate::error::Result;
use crate::model::{title_style_name, Element};
use crate::style::{
    FontStyle, ParagraphStyle, Style, StyleDefinition, StyleFamily, StyleRegistry,
};
use crate::writer::dispatch::{self, StyleWriterFn, StyleWriters};
use crate::xml;
use std::collections::BTreeSet;

/// Style id for a registry name
pub(crate) fn style_id(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_title_style(name: &str) -> bool {
    name == "Title"
        || name
            .strip_prefix("Heading")
            .and_then(|d| d.parse::<u8>().ok())
            .map_or(false, |d| (1..=9).contains(&d))
}

/// `w:pStyle` value for a registry name, `None` when the name does not
/// denote a paragraph style
pub(crate) fn paragraph_style_id(registry: &StyleRegistry, name: &str) -> Option<String> {
    match registry.get(name).map(|def| &def.style) {
        Some(Style::Paragraph(_)) => Some(style_id(name)),
        Some(Style::Font(font)) if font.paragraph.is_some() => Some(style_id(name)),
        Some(_) => {
            log::warn!("docx: style '{}' is not a paragraph style", name);
            None
        }
        // Written with defaults when used
        None if is_title_style(name) => Some(style_id(name)),
        None => {
            log::warn!("docx: paragraph style '{}' is not defined", name);
            None
        }
    }
}

/// `w:rStyle` value for a registry name
pub(crate) fn char_style_id(registry: &StyleRegistry, name: &str) -> Option<String> {
    match registry.get(name).map(|def| &def.style) {
        Some(Style::Font(font)) if font.paragraph.is_some() => {
            Some(format!("{}Char", style_id(name)))
        }
        Some(Style::Font(_)) => Some(style_id(name)),
        Some(_) => {
            log::warn!("docx: style '{}' is not a font style", name);
            None
        }
        None => {
            log::warn!("docx: font style '{}' is not defined", name);
            None
        }
    }
}

/// `w:tblStyle` value for a registry name
pub(crate) fn table_style_id(registry: &StyleRegistry, name: &str) -> Option<String> {
    match registry.get(name).map(|def| &def.style) {
        Some(Style::Table(_)) => Some(style_id(name)),
        _ => {
            log::warn!("docx: table style '{}' is not defined", name);
            None
        }
    }
}

impl StyleWriters for WordWriter<'_> {
    const BACKEND: &'static str = "Word2007";

    fn style_writer(family: StyleFamily) -> Option<StyleWriterFn<Self>> {
        let writer: StyleWriterFn<Self> = match family {
            StyleFamily::Font => write_font_style as StyleWriterFn<Self>,
            StyleFamily::Paragraph => write_paragraph_style as StyleWriterFn<Self>,
            StyleFamily::Table => write_table_style as StyleWriterFn<Self>,
            // numbering.xml and sectPr carry these
            StyleFamily::Section | StyleFamily::Numbering => return None,
        };
        Some(writer)
    }
}

pub(super) fn write_styles_part(w: &mut WordWriter<'_>) -> Result<()> {
    let doc = w.doc;

    w.x.start_document()?;
    w.x.start_element("w:styles")?;
    for (key, ns) in xml::minimal_document_namespaces() {
        w.x.write_attribute(key, ns)?;
    }

    w.x.start_element("w:docDefaults")?;
    w.x.start_element("w:rPrDefault")?;
    w.x.start_element("w:rPr")?;
    properties::write_run_property_list(&mut w.x, None, &doc.settings.default_font())?;
    w.x.end_element()?;
    w.x.end_element()?;
    w.x.start_element("w:pPrDefault")?;
    w.x.start_element("w:pPr")?;
    properties::write_paragraph_property_list(
        &mut w.x,
        None,
        &doc.settings.default_paragraph,
        None,
    )?;
    w.x.end_element()?;
    w.x.end_element()?;
    w.x.end_element()?;

    if !doc.styles.contains("Normal") {
        start_style(w, "paragraph", "Normal", "Normal", None, None, None)?;
        w.x.end_element()?;
    }

    for def in doc.styles.iter() {
        dispatch::write_style(w, def)?;
    }

    let mut depths = BTreeSet::new();
    doc.for_each_element(|e| {
        if let Element::Title(title) = e {
            depths.insert(title.depth);
        }
    });
    for depth in depths {
        if !doc.styles.contains(&title_style_name(depth)) {
            write_default_heading(w, depth)?;
        }
    }

    w.x.end_element()
}

/// Display name Word shows for a style
fn display_name(name: &str) -> String {
    match name.strip_prefix("Heading") {
        Some(depth) if is_title_style(name) => format!("heading {}", depth),
        _ => name.to_string(),
    }
}

/// Open a `w:style` and write its identity elements
fn start_style(
    w: &mut WordWriter<'_>,
    kind: &str,
    id: &str,
    name: &str,
    based_on: Option<String>,
    next: Option<String>,
    link: Option<String>,
) -> Result<()> {
    w.x.start_element("w:style")?;
    w.x.write_attribute("w:type", kind)?;
    if id == "Normal" {
        w.x.write_attribute("w:default", 1)?;
    }
    w.x.write_attribute("w:styleId", id)?;
    w.x.write_val("w:name", "w:val", display_name(name))?;
    if let Some(parent) = based_on {
        w.x.write_val("w:basedOn", "w:val", parent)?;
    }
    if let Some(next) = next {
        w.x.write_val("w:next", "w:val", next)?;
    }
    if let Some(link) = link {
        w.x.write_val("w:link", "w:val", link)?;
    }
    w.x.write_element("w:qFormat", &[])
}

fn numbering_pr(w: &WordWriter<'_>, props: &ParagraphStyle) -> Option<properties::NumberingPr> {
    let reference = props.numbering.as_ref()?;
    w.numbering
        .exact(&reference.style)
        .map(|id| (id, reference.level))
}

fn write_font_style(w: &mut WordWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Font(font) = &def.style else {
        return Ok(());
    };
    let doc = w.doc;
    let registry = &doc.styles;
    let id = style_id(&def.name);
    let parent = |f: fn(&StyleRegistry, &str) -> Option<String>| {
        def.based_on
            .as_deref()
            .filter(|p| registry.contains(p))
            .and_then(|p| f(registry, p))
    };

    let Some(paragraph) = font.paragraph_part() else {
        start_style(w, "character", &id, &def.name, parent(char_style_id), None, None)?;
        properties::write_run_properties(&mut w.x, None, Some(font))?;
        return w.x.end_element();
    };

    let char_id = format!("{}Char", id);
    let next = def
        .next
        .as_deref()
        .and_then(|n| paragraph_style_id(registry, n));
    start_style(
        w,
        "paragraph",
        &id,
        &def.name,
        parent(paragraph_style_id),
        next,
        Some(char_id.clone()),
    )?;
    let numbering = numbering_pr(w, paragraph);
    properties::write_paragraph_properties(&mut w.x, None, Some(paragraph), numbering)?;
    properties::write_run_properties(&mut w.x, None, Some(&font.font_only()))?;
    w.x.end_element()?;

    // Runs see the whole chain through the linked character style
    let resolved: FontStyle = registry.resolve_named(&def.name)?;
    start_style(
        w,
        "character",
        &char_id,
        &format!("{} Char", def.name),
        None,
        None,
        Some(id),
    )?;
    properties::write_run_properties(&mut w.x, None, Some(&resolved.font_only()))?;
    w.x.end_element()
}

fn write_paragraph_style(w: &mut WordWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Paragraph(paragraph) = &def.style else {
        return Ok(());
    };
    let doc = w.doc;
    let registry = &doc.styles;
    let based_on = def
        .based_on
        .as_deref()
        .filter(|p| registry.contains(p))
        .and_then(|p| paragraph_style_id(registry, p));
    let next = def
        .next
        .as_deref()
        .and_then(|n| paragraph_style_id(registry, n));

    start_style(w, "paragraph", &style_id(&def.name), &def.name, based_on, next, None)?;
    let numbering = numbering_pr(w, paragraph);
    properties::write_paragraph_properties(&mut w.x, None, Some(paragraph), numbering)?;
    w.x.end_element()
}

fn write_table_style(w: &mut WordWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Table(table) = &def.style else {
        return Ok(());
    };
    let doc = w.doc;
    let registry = &doc.styles;
    let based_on = def
        .based_on
        .as_deref()
        .filter(|p| registry.contains(p))
        .and_then(|p| table_style_id(registry, p));

    start_style(w, "table", &style_id(&def.name), &def.name, based_on, None, None)?;

    let mut props = table.clone();
    let first_row = props.first_row.take();
    properties::write_table_properties(&mut w.x, None, &props)?;

    if let Some(region) = first_row {
        w.x.start_element("w:tblStylePr")?;
        w.x.write_attribute("w:type", "firstRow")?;
        properties::write_run_properties(&mut w.x, None, region.font.as_ref())?;
        if region.borders.is_some() || region.bg_color.is_some() {
            w.x.start_element("w:tcPr")?;
            if let Some(borders) = &region.borders {
                properties::write_borders(&mut w.x, "w:tcBorders", borders, false)?;
            }
            if let Some(fill) = &region.bg_color {
                properties::write_shading(&mut w.x, fill)?;
            }
            w.x.end_element()?;
        }
        w.x.end_element()?;
    }
    w.x.end_element()
}

/// `Title` / `Heading{n}` for documents that use a heading depth without
/// registering its style
fn write_default_heading(w: &mut WordWriter<'_>, depth: u8) -> Result<()> {
    let name = title_style_name(depth);
    start_style(
        w,
        "paragraph",
        &style_id(&name),
        &name,
        Some("Normal".to_string()),
        Some("Normal".to_string()),
        None,
    )?;

    let paragraph = ParagraphStyle {
        keep_next: Some(true),
        outline_level: depth.checked_sub(1),
        ..Default::default()
    };
    properties::write_paragraph_properties(&mut w.x, None, Some(&paragraph), None)?;

    let mut font = FontStyle::new().bold();
    if depth == 0 {
        font.size = Some(20.0);
    }
    properties::write_run_properties(&mut w.x, None, Some(&font))?;
    w.x.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Text, Title};
    use crate::opc::{well_known, Package};
    use crate::style::{SectionStyle, StyleRef, TableStyle};
    use crate::writer::{word, WriterOptions};

    fn styles_of(doc: &Document) -> String {
        let bytes = word::write(doc, &WriterOptions::default()).unwrap();
        let package = Package::from_bytes(&bytes).unwrap();
        package
            .part(&well_known::styles())
            .unwrap()
            .data_as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_style_id() {
        assert_eq!(style_id("Body Text"), "BodyText");
        assert_eq!(style_id("Heading1"), "Heading1");
    }

    #[test]
    fn test_default_styles() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .push(Title::new("Intro", 1));
        let xml = styles_of(&doc);

        assert!(xml.contains(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#));
        assert!(xml.contains(r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/>"#));
        assert!(xml.contains(r#"<w:outlineLvl w:val="0"/>"#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/>"#));
        assert!(!xml.contains(r#"w:styleId="Heading2""#));
    }

    #[test]
    fn test_combined_font_style_is_linked_pair() {
        let mut doc = Document::new();
        doc.styles.define(
            "Quote Text",
            FontStyle::new()
                .italic()
                .with_paragraph(ParagraphStyle::new().with_indent(720)),
            None,
            None,
        );
        doc.add_section(SectionStyle::default())
            .push(Text::new("x").with_font(StyleRef::<FontStyle>::named("Quote Text")));
        let xml = styles_of(&doc);

        assert!(xml.contains(r#"w:styleId="QuoteText""#));
        assert!(xml.contains(r#"<w:link w:val="QuoteTextChar"/>"#));
        assert!(xml.contains(r#"<w:style w:type="character" w:styleId="QuoteTextChar">"#));
    }

    #[test]
    fn test_section_and_numbering_styles_are_not_styles() {
        let mut doc = Document::new();
        doc.styles
            .define("Landscape", SectionStyle::default(), None, None);
        doc.styles
            .define("Grid", TableStyle::new(), None, None);
        let xml = styles_of(&doc);
        assert!(!xml.contains("Landscape"));
        assert!(xml.contains(r#"<w:style w:type="table" w:styleId="Grid">"#));
    }
}
