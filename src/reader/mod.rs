//! OOXML reader: builds a [`Document`] from a `.docx` package.
//!
//! Parts are located through relationships, never by fixed path: the
//! package relationships lead to the metadata parts and the main document
//! part, whose own relationships lead to styles, numbering, settings,
//! notes, headers, footers, images and hyperlink targets.

mod body;
mod docprops;
mod numbering;
mod properties;
mod styles;

use crate::error::{Error, Result};
use crate::model::{Document, Note, Notes};
use crate::opc::{rel_types, Package, Part};
use crate::xml::XmlElement;
use std::collections::HashMap;

/// Load a document from `.docx` bytes.
///
/// Fails with [`Error::UnreadablePackage`] when the archive cannot be
/// opened, has no relationship to a main document part, or that part is not
/// a readable WordprocessingML document.
pub fn load(bytes: &[u8]) -> Result<Document> {
    let package =
        Package::from_bytes(bytes).map_err(|e| Error::UnreadablePackage(e.to_string()))?;
    let main = package.main_document_part().ok_or_else(|| {
        Error::UnreadablePackage("no relationship to a main document part".to_string())
    })?;
    log::debug!("docx reader: main document part {}", main.uri().as_str());

    let root = XmlElement::parse(main.data())
        .map_err(|e| Error::UnreadablePackage(format!("{}: {}", main.uri().as_str(), e)))?;
    let body = root.child("body").ok_or_else(|| {
        Error::UnreadablePackage(format!("{} has no w:body", main.uri().as_str()))
    })?;

    let mut reader = DocxReader::new(&package);
    reader.read_metadata()?;
    reader.read_definitions(main)?;
    reader.read_notes(main)?;
    reader.read_body(body, main)?;
    Ok(reader.doc)
}

fn parse_part(part: &Part) -> Result<XmlElement> {
    log::debug!("docx reader: parsing {}", part.uri().as_str());
    XmlElement::parse(part.data())
}

/// Reader state for one package
pub(crate) struct DocxReader<'a> {
    package: &'a Package,
    doc: Document,
    /// `w:numId` to numbering style name
    lists: HashMap<String, String>,
    style_ids: styles::StyleIds,
}

impl<'a> DocxReader<'a> {
    fn new(package: &'a Package) -> Self {
        DocxReader {
            package,
            doc: Document::new(),
            lists: HashMap::new(),
            style_ids: styles::StyleIds::default(),
        }
    }

    fn read_metadata(&mut self) -> Result<()> {
        let package = self.package;
        let info = &mut self.doc.info;
        if let Some(part) = package.part_by_rel_type(rel_types::CORE_PROPERTIES) {
            docprops::read_core(&parse_part(part)?, info);
        }
        if let Some(part) = package.part_by_rel_type(rel_types::EXTENDED_PROPERTIES) {
            docprops::read_app(&parse_part(part)?, info);
        }
        if let Some(part) = package.part_by_rel_type(rel_types::CUSTOM_PROPERTIES) {
            docprops::read_custom(&parse_part(part)?, info);
        }
        Ok(())
    }

    /// Numbering first: paragraph styles refer to numbering definitions
    fn read_definitions(&mut self, main: &Part) -> Result<()> {
        let package = self.package;
        if let Some(part) = package.related_part(main, rel_types::NUMBERING) {
            self.lists = numbering::read_numbering(&parse_part(part)?, &mut self.doc.styles);
        }
        if let Some(part) = package.related_part(main, rel_types::STYLES) {
            self.style_ids = styles::read_styles(
                &parse_part(part)?,
                &mut self.doc.styles,
                &mut self.doc.settings,
                &self.lists,
            );
        }
        if let Some(part) = package.related_part(main, rel_types::SETTINGS) {
            docprops::read_settings(&parse_part(part)?, &mut self.doc.settings);
        }
        Ok(())
    }

    fn read_notes(&mut self, main: &Part) -> Result<()> {
        let package = self.package;
        if let Some(part) = package.related_part(main, rel_types::FOOTNOTES) {
            self.doc.footnotes = self.read_note_part(part, "footnote")?;
        }
        if let Some(part) = package.related_part(main, rel_types::ENDNOTES) {
            self.doc.endnotes = self.read_note_part(part, "endnote")?;
        }
        Ok(())
    }

    /// Note bodies by id; separator notes are skipped
    fn read_note_part(&mut self, part: &Part, tag: &str) -> Result<Notes> {
        let root = parse_part(part)?;
        let mut notes = Notes::new();
        for note in root.children_named(tag) {
            if note.attr("type").map_or(false, |t| t != "normal") {
                continue;
            }
            let Some(id) = note.attr_parse::<u32>("id") else {
                continue;
            };
            let elements = self.read_blocks(note, part)?;
            notes.insert(id, Note { elements });
        }
        Ok(notes)
    }

    /// Target part of a relationship of `source`
    fn related(&self, source: &Part, rel_id: &str) -> Option<&'a Part> {
        let part = self.package.part_by_rel_id(source, rel_id);
        if part.is_none() {
            log::warn!(
                "docx reader: relationship {} of {} does not resolve to a part",
                rel_id,
                source.uri().as_str()
            );
        }
        part
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::Element;
    use crate::opc::{content_type, well_known, Relationships};

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// Package with the given body XML and optional extra parts related to
    /// the main document
    pub(crate) fn package_with(body: &str, related: &[(&str, &str, &str)]) -> Vec<u8> {
        let mut package = Package::new();
        package.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");

        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{}</w:body></w:document>"#,
            W_NS, body
        );
        let mut rels = Relationships::new();
        for (rel_type, name, xml) in related {
            rels.add(rel_type, name);
            let uri = crate::opc::PartUri::new(&format!("/word/{}", name)).unwrap();
            package.add_part(Part::new(uri, content_type::XML, xml.as_bytes().to_vec()));
        }
        package.add_part(
            Part::new(
                well_known::document(),
                content_type::MAIN_DOCUMENT,
                document.into_bytes(),
            )
            .with_relationships(rels),
        );
        package.to_bytes(true).unwrap()
    }

    #[test]
    fn test_not_a_zip() {
        let err = load(b"plain text").unwrap_err();
        assert!(matches!(err, Error::UnreadablePackage(_)));
    }

    #[test]
    fn test_missing_main_relationship() {
        let mut package = Package::new();
        package.add_part(Part::new(
            well_known::document(),
            content_type::MAIN_DOCUMENT,
            b"<w:document/>".to_vec(),
        ));
        let bytes = package.to_bytes(true).unwrap();
        assert!(matches!(load(&bytes), Err(Error::UnreadablePackage(_))));
    }

    #[test]
    fn test_minimal_body() {
        let bytes = package_with(r#"<w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:sectPr/>"#, &[]);
        let doc = load(&bytes).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].elements, vec![Element::Text(crate::model::Text::new("Hello"))]);
    }

    #[test]
    fn test_footnotes_part() {
        let notes = format!(
            r#"<w:footnotes xmlns:w="{}">
                <w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote>
                <w:footnote w:type="continuationSeparator" w:id="0"><w:p><w:r><w:continuationSeparator/></w:r></w:p></w:footnote>
                <w:footnote w:id="1"><w:p><w:r><w:t>See appendix</w:t></w:r></w:p></w:footnote>
            </w:footnotes>"#,
            W_NS
        );
        let bytes = package_with(
            r#"<w:p><w:r><w:t>Claim</w:t></w:r><w:r><w:rPr><w:vertAlign w:val="superscript"/></w:rPr><w:footnoteReference w:id="1"/></w:r></w:p>"#,
            &[(rel_types::FOOTNOTES, "footnotes.xml", &notes)],
        );
        let doc = load(&bytes).unwrap();
        assert_eq!(doc.footnotes.len(), 1);
        assert_eq!(doc.footnotes.get(1).unwrap().elements[0].text(), "See appendix");
        let Element::TextRun(run) = &doc.sections[0].elements[0] else {
            panic!("expected a text run");
        };
        assert_eq!(
            run.elements[1],
            Element::Footnote(crate::model::NoteReference { id: 1 })
        );
    }
}
