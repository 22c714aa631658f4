//! OpenDocument text backend (`.odt`)
//!
//! ODF references styles by name and expects every automatic style to be
//! declared ahead of the content using it. Body and master-page content
//! are therefore rendered first into their own emitters, collecting the
//! automatic styles they need, and the collected declarations are written
//! in front of the rendered fragment when the part is assembled.

mod elements;
mod meta;
mod styles;

use crate::error::Result;
use crate::model::{Document, Element, HeaderFooterKind, Section};
use crate::opc::entry_options;
use crate::style::{FontStyle, SectionStyle, StyleFamily};
use crate::writer::dispatch;
use crate::writer::WriterOptions;
use crate::xml::{odf, XmlEmitter};
use std::io::{Cursor, Write};
use styles::AutoStyles;
use zip::write::ZipWriter;

const MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

/// Serialize `doc` as an ODF text package
pub fn write(doc: &Document, options: &WriterOptions) -> Result<Vec<u8>> {
    let mut writer = OdfWriter::new(doc, options);

    let content = writer.write_content()?;
    let styles = writer.write_styles()?;
    let meta = meta::write_meta(options.emitter(), doc)?;

    log::debug!(
        "odt: {} sections, {} pictures",
        doc.sections.len(),
        writer.pictures.len()
    );
    writer.package(content, styles, meta)
}

/// An embedded picture, stored under `Pictures/`
struct Picture {
    path: String,
    media_type: &'static str,
    data: Vec<u8>,
}

/// Writer context for one document
pub struct OdfWriter<'a> {
    doc: &'a Document,
    options: &'a WriterOptions,
    /// Emitter of the fragment being rendered
    x: XmlEmitter,
    /// Automatic styles of the part being rendered
    auto: AutoStyles,
    /// A `text:p` / `text:h` is open; block elements degrade to inline content
    in_paragraph: bool,
    /// Text properties applied beneath inline ones (table first row)
    region_font: Option<FontStyle>,
    /// Master page the next paragraph must switch to
    pending_master: Option<String>,
    pictures: Vec<Picture>,
    table_count: usize,
    /// Text width of the current section in twips
    content_width: u32,
}

impl<'a> OdfWriter<'a> {
    fn new(doc: &'a Document, options: &'a WriterOptions) -> Self {
        OdfWriter {
            doc,
            options,
            x: XmlEmitter::memory(),
            auto: AutoStyles::new(""),
            in_paragraph: false,
            region_font: None,
            pending_master: None,
            pictures: Vec::new(),
            table_count: 0,
            content_width: SectionStyle::default().content_width(),
        }
    }

    /// Render `f` into a fresh emitter and automatic style set, returning
    /// the fragment and the styles it used
    fn render<F>(&mut self, prefix: &'static str, f: F) -> Result<(Vec<u8>, AutoStyles)>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let outer_x = std::mem::replace(&mut self.x, self.options.emitter());
        let outer_auto = std::mem::replace(&mut self.auto, AutoStyles::new(prefix));
        let outer_in_paragraph = std::mem::replace(&mut self.in_paragraph, false);

        let result = f(self);

        let x = std::mem::replace(&mut self.x, outer_x);
        let auto = std::mem::replace(&mut self.auto, outer_auto);
        self.in_paragraph = outer_in_paragraph;

        result?;
        Ok((x.get_data()?, auto))
    }

    /// `content.xml`
    fn write_content(&mut self) -> Result<Vec<u8>> {
        let doc = self.doc;
        let (body, auto) = self.render("", |w| {
            for (i, section) in doc.sections.iter().enumerate() {
                if i > 0 {
                    w.pending_master = Some(master_page_name(i));
                }
                w.content_width = section.style.content_width();
                dispatch::write_elements(w, &section.elements)?;
                // A section without paragraphs still has to switch pages
                if w.pending_master.is_some() {
                    w.write_paragraph_with(None, None, |_| Ok(()))?;
                }
            }
            Ok(())
        })?;

        let mut x = self.options.emitter();
        x.start_document()?;
        x.start_element("office:document-content")?;
        for (key, ns) in odf::document_namespaces() {
            x.write_attribute(key, ns)?;
        }
        x.write_attribute("office:version", "1.2")?;
        auto.write(&mut x)?;
        x.start_element("office:body")?;
        x.start_element("office:text")?;
        x.write_raw(&body)?;
        x.end_element()?;
        x.end_element()?;
        x.end_element()?;
        x.get_data()
    }

    /// Zip the parts. `mimetype` comes first and uncompressed so that
    /// consumers can identify the package by its leading bytes.
    fn package(&self, content: Vec<u8>, styles: Vec<u8>, meta: Vec<u8>) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        let options = entry_options(self.options.compression);

        zip.start_file("mimetype", entry_options(false))?;
        zip.write_all(MIMETYPE.as_bytes())?;

        for (name, data) in [
            ("content.xml", &content),
            ("styles.xml", &styles),
            ("meta.xml", &meta),
        ] {
            zip.start_file(name, options)?;
            zip.write_all(data)?;
        }
        for picture in &self.pictures {
            zip.start_file(picture.path.as_str(), options)?;
            zip.write_all(&picture.data)?;
        }

        zip.start_file("META-INF/manifest.xml", options)?;
        zip.write_all(&self.manifest()?)?;

        zip.finish()?;
        Ok(buf)
    }

    fn manifest(&self) -> Result<Vec<u8>> {
        let mut x = self.options.emitter();
        x.start_document()?;
        x.start_element("manifest:manifest")?;
        x.write_attribute("xmlns:manifest", odf::MANIFEST)?;
        x.write_attribute("manifest:version", "1.2")?;

        let mut entry = |path: &str, media_type: &str| -> Result<()> {
            x.start_element("manifest:file-entry")?;
            x.write_attribute("manifest:full-path", path)?;
            x.write_attribute("manifest:media-type", media_type)?;
            x.end_element()
        };
        entry("/", MIMETYPE)?;
        entry("content.xml", "text/xml")?;
        entry("styles.xml", "text/xml")?;
        entry("meta.xml", "text/xml")?;
        for picture in &self.pictures {
            entry(&picture.path, picture.media_type)?;
        }

        x.get_data()
    }
}

/// Master page of the section at `index`
fn master_page_name(index: usize) -> String {
    if index == 0 {
        "Standard".to_string()
    } else {
        format!("Section{}", index + 1)
    }
}

/// ODF header/footer element for a header or footer kind
fn header_footer_element(header: bool, kind: HeaderFooterKind) -> &'static str {
    match (header, kind) {
        (true, HeaderFooterKind::Default) => "style:header",
        (true, HeaderFooterKind::Even) => "style:header-left",
        (true, HeaderFooterKind::First) => "style:header-first",
        (false, HeaderFooterKind::Default) => "style:footer",
        (false, HeaderFooterKind::Even) => "style:footer-left",
        (false, HeaderFooterKind::First) => "style:footer-first",
    }
}

impl OdfWriter<'_> {
    /// Header and footer content of one master page, in schema order
    fn write_master_content(&mut self, section: &Section) -> Result<()> {
        for header in [true, false] {
            for kind in [
                HeaderFooterKind::Default,
                HeaderFooterKind::Even,
                HeaderFooterKind::First,
            ] {
                let content = if header {
                    section.header(kind)
                } else {
                    section.footer(kind)
                };
                let Some(content) = content else {
                    continue;
                };
                self.x.start_element(header_footer_element(header, kind))?;
                self.write_block_container(&content.elements)?;
                self.x.end_element()?;
            }
        }
        Ok(())
    }

    /// Block content of a container that must hold at least one paragraph
    fn write_block_container(&mut self, elements: &[Element]) -> Result<()> {
        let outer = std::mem::replace(&mut self.in_paragraph, false);
        let result = dispatch::write_elements(self, elements);
        self.in_paragraph = outer;
        result?;
        if elements.is_empty() {
            self.x.write_element("text:p", &[])?;
        }
        Ok(())
    }

    /// Whether a numbering style is registered under `name`
    fn is_numbering(&self, name: &str) -> bool {
        self.doc
            .styles
            .get(name)
            .map_or(false, |def| def.family() == StyleFamily::Numbering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Text, Title};
    use crate::style::ParagraphStyle;
    use std::io::Read;
    use zip::{CompressionMethod, ZipArchive};

    pub(super) fn entry(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_mimetype_is_first_and_stored() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default()).add_text("Hello");
        let bytes = write(&doc, &WriterOptions::default()).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(&bytes)).unwrap();
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        drop(first);

        let manifest = entry(&bytes, "META-INF/manifest.xml");
        assert!(manifest.contains(r#"manifest:full-path="content.xml""#));
        assert!(entry(&bytes, "content.xml").contains(">Hello</text:p>"));
    }

    #[test]
    fn test_spacing_style_declared_before_use() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default()).push(
            Text::new("spaced").with_paragraph(ParagraphStyle {
                space_before: Some(88),
                ..Default::default()
            }),
        );
        let content = entry(&write(&doc, &WriterOptions::default()).unwrap(), "content.xml");

        let declared = content.find(r#"style:name="P1""#).unwrap();
        let used = content.find(r#"text:style-name="P1""#).unwrap();
        assert!(declared < used);
        assert!(content.contains(r#"fo:margin-top="0.2cm""#));
    }

    #[test]
    fn test_second_section_switches_master_page() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default()).add_text("one");
        doc.add_section(SectionStyle::landscape())
            .push(Title::new("two", 1));
        let bytes = write(&doc, &WriterOptions::default()).unwrap();

        let content = entry(&bytes, "content.xml");
        assert!(content.contains(r#"style:master-page-name="Section2""#));
        let styles = entry(&bytes, "styles.xml");
        assert!(styles.contains(r#"<style:master-page style:name="Section2""#));
        assert!(styles.contains(r#"style:print-orientation="landscape""#));
    }

    #[test]
    fn test_headers_go_into_master_page() {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::default());
        section
            .header_mut(HeaderFooterKind::Default)
            .push(Text::new("Running head"));
        let styles = entry(&write(&doc, &WriterOptions::default()).unwrap(), "styles.xml");
        assert!(styles.contains("<style:header><text:p>Running head</text:p></style:header>"));
    }
}
