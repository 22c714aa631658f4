//! Office Open XML backend (`.docx`)
//!
//! One [`WordWriter`] builds the whole package. Each XML part is written
//! with its own emitter and relationship list; [`WordWriter::with_part`]
//! swaps them in while the part's content is dispatched, so element
//! writers always target "the current part" and register images and
//! hyperlinks against it.

mod docprops;
mod elements;
mod numbering;
mod properties;
mod styles;
mod table;

use crate::error::Result;
use crate::model::{
    Document, Element, HeaderFooter, HeaderFooterKind, Notes, Section, TrackChange,
};
use crate::opc::{content_type, rel_types, well_known, Package, Part, PartUri, Relationships};
use crate::style::FontStyle;
use crate::writer::dispatch;
use crate::writer::WriterOptions;
use crate::xml::{self, XmlEmitter};
use numbering::NumberingIds;
use properties::HeaderFooterRef;

/// Part currently being written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PartKind {
    Body,
    Header,
    Footer,
    Footnotes,
    Endnotes,
    Other,
}

/// Serialize `doc` as a DOCX package
pub fn write(doc: &Document, options: &WriterOptions) -> Result<Vec<u8>> {
    let mut writer = WordWriter::new(doc, options);
    writer.write_package()?;
    writer.package.to_bytes(options.compression)
}

/// Writer context for one document
pub struct WordWriter<'a> {
    doc: &'a Document,
    options: &'a WriterOptions,
    package: Package,
    /// Emitter of the current part
    x: XmlEmitter,
    /// Relationships of the current part
    rels: Relationships,
    part: PartKind,
    /// A `w:p` is open; block elements degrade to inline content
    in_paragraph: bool,
    /// Revision applied to runs written while set
    revision: Option<TrackChange>,
    /// Run properties applied beneath inline ones (table first row)
    region_font: Option<FontStyle>,
    numbering: NumberingIds,
    /// Width between the margins of the current section, in twips
    content_width: u32,
    has_toc: bool,
    image_count: usize,
    header_count: usize,
    footer_count: usize,
    title_count: usize,
    bookmark_id: u32,
    revision_id: u32,
}

impl<'a> WordWriter<'a> {
    fn new(doc: &'a Document, options: &'a WriterOptions) -> Self {
        WordWriter {
            doc,
            options,
            package: Package::new(),
            x: XmlEmitter::memory(),
            rels: Relationships::new(),
            part: PartKind::Other,
            in_paragraph: false,
            revision: None,
            region_font: None,
            numbering: NumberingIds::collect(doc),
            content_width: crate::style::SectionStyle::default().content_width(),
            has_toc: doc.contains_element(|e| matches!(e, Element::Toc(_))),
            image_count: 0,
            header_count: 0,
            footer_count: 0,
            title_count: 0,
            bookmark_id: 0,
            revision_id: 0,
        }
    }

    /// Run `f` against a fresh emitter and relationship list, restoring
    /// the current part's state afterwards. Returns the part's XML and
    /// relationships.
    fn with_part<F>(
        &mut self,
        part: PartKind,
        rels: Relationships,
        f: F,
    ) -> Result<(Vec<u8>, Relationships)>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let outer_x = std::mem::replace(&mut self.x, self.options.emitter());
        let outer_rels = std::mem::replace(&mut self.rels, rels);
        let outer_part = std::mem::replace(&mut self.part, part);
        let outer_in_paragraph = std::mem::replace(&mut self.in_paragraph, false);

        let result = f(self);

        let x = std::mem::replace(&mut self.x, outer_x);
        let rels = std::mem::replace(&mut self.rels, outer_rels);
        self.part = outer_part;
        self.in_paragraph = outer_in_paragraph;

        result?;
        Ok((x.get_data()?, rels))
    }

    fn add_part(&mut self, uri: PartUri, content_type: &str, data: Vec<u8>, rels: Relationships) {
        let part = Part::new(uri, content_type, data);
        let part = if rels.is_empty() {
            part
        } else {
            part.with_relationships(rels)
        };
        self.package.add_part(part);
    }

    fn write_package(&mut self) -> Result<()> {
        let doc = self.doc;
        let document_uri = well_known::document();

        self.package
            .add_relationship(rel_types::OFFICE_DOCUMENT, &document_uri.as_str()[1..]);
        docprops::write_docprops(self)?;

        let mut rels = Relationships::new();
        rels.add(rel_types::STYLES, "styles.xml");
        rels.add(rel_types::NUMBERING, "numbering.xml");
        rels.add(rel_types::SETTINGS, "settings.xml");

        let (data, mut rels) = self.with_part(PartKind::Body, rels, |w| w.write_body())?;

        if !doc.footnotes.is_empty() {
            let (notes, notes_rels) =
                self.with_part(PartKind::Footnotes, Relationships::new(), |w| {
                    w.write_notes("w:footnotes", "w:footnote", &doc.footnotes)
                })?;
            self.add_part(well_known::footnotes(), content_type::FOOTNOTES, notes, notes_rels);
            rels.add(rel_types::FOOTNOTES, "footnotes.xml");
        }
        if !doc.endnotes.is_empty() {
            let (notes, notes_rels) =
                self.with_part(PartKind::Endnotes, Relationships::new(), |w| {
                    w.write_notes("w:endnotes", "w:endnote", &doc.endnotes)
                })?;
            self.add_part(well_known::endnotes(), content_type::ENDNOTES, notes, notes_rels);
            rels.add(rel_types::ENDNOTES, "endnotes.xml");
        }

        self.add_part(document_uri, content_type::MAIN_DOCUMENT, data, rels);

        let (styles, _) = self.with_part(PartKind::Other, Relationships::new(), |w| {
            styles::write_styles_part(w)
        })?;
        self.add_part(well_known::styles(), content_type::STYLES, styles, Relationships::new());

        let mut x = self.options.emitter();
        numbering::write_numbering_part(&mut x, doc, &self.numbering)?;
        let data = x.get_data()?;
        self.add_part(well_known::numbering(), content_type::NUMBERING, data, Relationships::new());

        let mut x = self.options.emitter();
        write_settings(&mut x, doc)?;
        let data = x.get_data()?;
        self.add_part(well_known::settings(), content_type::SETTINGS, data, Relationships::new());

        log::debug!(
            "docx: {} sections, {} images, {} headers, {} footers",
            doc.sections.len(),
            self.image_count,
            self.header_count,
            self.footer_count
        );
        Ok(())
    }

    /// `word/document.xml`. Every section but the last ends with an empty
    /// paragraph carrying its `w:sectPr`; the last section's properties
    /// close the body.
    fn write_body(&mut self) -> Result<()> {
        let doc = self.doc;
        let sections = &doc.sections;

        self.x.start_document()?;
        self.x.start_element("w:document")?;
        for (key, ns) in xml::document_namespaces() {
            self.x.write_attribute(key, ns)?;
        }
        self.x.start_element("w:body")?;

        if sections.is_empty() {
            properties::write_section_properties(&mut self.x, &Default::default(), &[])?;
        }

        for (i, section) in sections.iter().enumerate() {
            self.content_width = section.style.content_width();
            dispatch::write_elements(self, &section.elements)?;
            // Word keeps a paragraph between a table and the section end
            if matches!(section.elements.last(), Some(Element::Table(_))) {
                self.x.write_element("w:p", &[])?;
            }

            let references = self.write_headers_footers(section)?;
            let mut style = section.style.clone();
            let has_first = section.header(HeaderFooterKind::First).is_some()
                || section.footer(HeaderFooterKind::First).is_some();
            if has_first && style.title_page.is_none() {
                style.title_page = Some(true);
            }

            if i + 1 < sections.len() {
                self.x.start_element("w:p")?;
                self.x.start_element("w:pPr")?;
                properties::write_section_properties(&mut self.x, &style, &references)?;
                self.x.end_element()?;
                self.x.end_element()?;
            } else {
                properties::write_section_properties(&mut self.x, &style, &references)?;
            }
        }

        self.x.end_element()?;
        self.x.end_element()
    }

    /// Write the section's header and footer parts, returning the
    /// references for its `w:sectPr`
    fn write_headers_footers(&mut self, section: &Section) -> Result<Vec<HeaderFooterRef>> {
        let mut references = Vec::new();
        for header in &section.headers {
            self.header_count += 1;
            let uri = well_known::header(self.header_count);
            let rel_id = self.write_header_footer(
                header,
                "w:hdr",
                PartKind::Header,
                uri,
                content_type::HEADER,
                rel_types::HEADER,
            )?;
            references.push(HeaderFooterRef {
                element: "w:headerReference",
                kind: header.kind.as_str(),
                rel_id,
            });
        }
        for footer in &section.footers {
            self.footer_count += 1;
            let uri = well_known::footer(self.footer_count);
            let rel_id = self.write_header_footer(
                footer,
                "w:ftr",
                PartKind::Footer,
                uri,
                content_type::FOOTER,
                rel_types::FOOTER,
            )?;
            references.push(HeaderFooterRef {
                element: "w:footerReference",
                kind: footer.kind.as_str(),
                rel_id,
            });
        }
        Ok(references)
    }

    fn write_header_footer(
        &mut self,
        hf: &HeaderFooter,
        root: &str,
        part: PartKind,
        uri: PartUri,
        content_type: &str,
        rel_type: &str,
    ) -> Result<String> {
        let (data, rels) = self.with_part(part, Relationships::new(), |w| {
            w.x.start_document()?;
            w.x.start_element(root)?;
            for (key, ns) in xml::document_namespaces() {
                w.x.write_attribute(key, ns)?;
            }
            w.write_block_container(&hf.elements)?;
            w.x.end_element()
        })?;
        let target = uri.target_from(&well_known::document());
        self.add_part(uri, content_type, data, rels);
        Ok(self.rels.add(rel_type, &target))
    }

    /// Footnotes or endnotes part, starting with the two separator notes
    /// Word expects at ids -1 and 0
    fn write_notes(&mut self, root: &str, note: &str, notes: &Notes) -> Result<()> {
        self.x.start_document()?;
        self.x.start_element(root)?;
        for (key, ns) in xml::document_namespaces() {
            self.x.write_attribute(key, ns)?;
        }

        for (id, kind, mark) in [
            (-1, "separator", "w:separator"),
            (0, "continuationSeparator", "w:continuationSeparator"),
        ] {
            self.x.start_element(note)?;
            self.x.write_attribute("w:type", kind)?;
            self.x.write_attribute("w:id", id)?;
            self.x.start_element("w:p")?;
            self.x.start_element("w:r")?;
            self.x.write_element(mark, &[])?;
            self.x.end_element()?;
            self.x.end_element()?;
            self.x.end_element()?;
        }

        for (id, body) in notes.iter() {
            self.x.start_element(note)?;
            self.x.write_attribute("w:id", id)?;
            self.write_block_container(&body.elements)?;
            self.x.end_element()?;
        }

        self.x.end_element()
    }

    /// Block content of a container that must end with a paragraph
    /// (table cell, header, footer, note)
    fn write_block_container(&mut self, elements: &[Element]) -> Result<()> {
        dispatch::write_elements(self, elements)?;
        let needs_paragraph = match elements.last() {
            None | Some(Element::Table(_)) | Some(Element::Bookmark(_)) => true,
            Some(_) => false,
        };
        if needs_paragraph {
            self.x.write_element("w:p", &[])?;
        }
        Ok(())
    }
}

/// `word/settings.xml`
fn write_settings(x: &mut XmlEmitter, doc: &Document) -> Result<()> {
    let settings = &doc.settings;

    x.start_document()?;
    x.start_element("w:settings")?;
    for (key, ns) in xml::minimal_document_namespaces() {
        x.write_attribute(key, ns)?;
    }

    x.write_val("w:zoom", "w:percent", settings.zoom)?;
    if settings.hide_spelling_errors {
        x.write_element("w:hideSpellingErrors", &[])?;
    }
    if settings.hide_grammatical_errors {
        x.write_element("w:hideGrammaticalErrors", &[])?;
    }
    if settings.track_revisions {
        x.write_element("w:trackRevisions", &[])?;
    }
    x.write_val("w:defaultTabStop", "w:val", 708)?;
    if settings.even_and_odd_headers {
        x.write_element("w:evenAndOddHeaders", &[])?;
    }
    x.write_val("w:characterSpacingControl", "w:val", "doNotCompress")?;

    for (notes, container, note) in [
        (&doc.footnotes, "w:footnotePr", "w:footnote"),
        (&doc.endnotes, "w:endnotePr", "w:endnote"),
    ] {
        if !notes.is_empty() {
            x.start_element(container)?;
            x.write_val(note, "w:id", -1)?;
            x.write_val(note, "w:id", 0)?;
            x.end_element()?;
        }
    }

    x.start_element("w:compat")?;
    x.start_element("w:compatSetting")?;
    x.write_attribute("w:name", "compatibilityMode")?;
    x.write_attribute("w:uri", "http://schemas.microsoft.com/office/word")?;
    x.write_attribute("w:val", 15)?;
    x.end_element()?;
    x.end_element()?;

    if let Some(lang) = &settings.theme_font_lang {
        x.write_val("w:themeFontLang", "w:val", lang)?;
    }
    x.write_val("w:decimalSymbol", "w:val", &settings.decimal_symbol)?;
    x.write_val("w:listSeparator", "w:val", ";")?;

    x.end_element()
}
