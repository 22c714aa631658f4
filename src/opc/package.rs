//! OPC Package implementation
//!
//! Handles reading and writing DOCX files as ZIP packages

use crate::error::{Error, Result};
use crate::opc::relationships::rel_types;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// An OPC package (ZIP-based container for DOCX)
#[derive(Debug)]
pub struct Package {
    /// All parts in the package, ordered by part name
    parts: BTreeMap<PartUri, Part>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    /// Content types ([Content_Types].xml)
    content_types: ContentTypes,
}

impl Package {
    /// Create a new empty package
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open a package from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut package = Self::new();

        package.content_types = Self::read_content_types(&mut archive)?;
        package.relationships = Self::read_package_rels(&mut archive)?;
        package.read_parts(&mut archive)?;
        package.read_part_relationships(&mut archive)?;

        Ok(package)
    }

    /// Save the package to bytes
    pub fn to_bytes(&self, compressed: bool) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(Cursor::new(&mut buf), compressed)?;
        Ok(buf)
    }

    /// Write the package to a writer.
    ///
    /// Entries are written in a fixed order (content types, package
    /// relationships, then parts by name, each followed by its own
    /// relationships) with a fixed timestamp, so equal packages produce
    /// equal bytes.
    pub fn write_to<W: Write + Seek>(&self, writer: W, compressed: bool) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = entry_options(compressed);

        zip.start_file("[Content_Types].xml", options)?;
        self.content_types.write_to(&mut zip)?;

        if !self.relationships.is_empty() {
            zip.start_file("_rels/.rels", options)?;
            self.relationships.write_to(&mut zip)?;
        }

        for (uri, part) in &self.parts {
            zip.start_file(&uri.as_str()[1..], options)?;
            zip.write_all(part.data())?;

            if let Some(rels) = part.relationships() {
                if !rels.is_empty() {
                    let rels_uri = uri.relationships_uri();
                    zip.start_file(&rels_uri.as_str()[1..], options)?;
                    rels.write_to(&mut zip)?;
                }
            }
        }

        zip.finish()?;
        Ok(())
    }

    /// Get a part by URI
    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.get(uri)
    }

    /// Add a part to the package, registering its content type
    pub fn add_part(&mut self, part: Part) {
        let uri = part.uri().clone();
        self.content_types.add_override(&uri, part.content_type());
        self.parts.insert(uri, part);
    }

    /// Add a part whose content type is covered by an extension default
    pub fn add_media_part(&mut self, part: Part) {
        self.parts.insert(part.uri().clone(), part);
    }

    /// Get package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Get content types
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Get a part by relationship type from package relationships
    pub fn part_by_rel_type(&self, rel_type: &str) -> Option<&Part> {
        let rel = self.relationships.by_type(rel_type)?;
        let uri = PartUri::new(&rel.target).ok()?;
        self.parts.get(&uri)
    }

    /// Get the main document part
    pub fn main_document_part(&self) -> Option<&Part> {
        self.part_by_rel_type(rel_types::OFFICE_DOCUMENT)
    }

    /// Follow a relationship of `source` by type to the target part
    pub fn related_part(&self, source: &Part, rel_type: &str) -> Option<&Part> {
        let rel = source.relationships()?.by_type(rel_type)?;
        let uri = source.resolve_target(&rel.id)?;
        self.parts.get(&uri)
    }

    /// Follow a relationship of `source` by id to the target part
    pub fn part_by_rel_id(&self, source: &Part, rel_id: &str) -> Option<&Part> {
        let uri = source.resolve_target(rel_id)?;
        self.parts.get(&uri)
    }

    /// Add a package-level relationship
    pub fn add_relationship(&mut self, rel_type: &str, target: &str) -> String {
        self.relationships.add(rel_type, target)
    }

    // === Private methods ===

    fn read_content_types<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<ContentTypes> {
        let mut file = archive
            .by_name("[Content_Types].xml")
            .map_err(|_| Error::MissingPart("[Content_Types].xml".into()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        ContentTypes::from_xml(&content)
    }

    fn read_package_rels<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Relationships> {
        match archive.by_name("_rels/.rels") {
            Ok(mut file) => {
                let mut content = String::new();
                file.read_to_string(&mut content)?;
                Relationships::from_xml(&content)
            }
            Err(_) => Ok(Relationships::new()),
        }
    }

    fn read_parts<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>) -> Result<()> {
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if name.ends_with('/') || name == "[Content_Types].xml" {
                continue;
            }

            // Relationship files are attached to their parts afterwards
            if name.contains("_rels/") && name.ends_with(".rels") {
                continue;
            }

            let uri = PartUri::new(&format!("/{}", name))?;

            let content_type = self
                .content_types
                .get(&uri)
                .unwrap_or("application/octet-stream")
                .to_string();

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            self.parts.insert(uri.clone(), Part::new(uri, content_type, data));
        }

        Ok(())
    }

    fn read_part_relationships<R: Read + Seek>(
        &mut self,
        archive: &mut ZipArchive<R>,
    ) -> Result<()> {
        for (uri, part) in self.parts.iter_mut() {
            let rels_uri = uri.relationships_uri();

            if let Ok(mut file) = archive.by_name(&rels_uri.as_str()[1..]) {
                let mut content = String::new();
                file.read_to_string(&mut content)?;
                part.set_relationships(Relationships::from_xml(&content)?);
            }
        }

        Ok(())
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

/// Zip entry options shared by the package writers: fixed timestamp,
/// deflate or store
pub(crate) fn entry_options(compressed: bool) -> SimpleFileOptions {
    let method = if compressed {
        CompressionMethod::Deflated
    } else {
        CompressionMethod::Stored
    };
    SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(zip::DateTime::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::content_types::MAIN_DOCUMENT;

    #[test]
    fn test_new_package() {
        let pkg = Package::new();
        assert!(pkg.parts.is_empty());
        assert!(pkg.relationships.is_empty());
    }

    #[test]
    fn test_add_part() {
        let mut pkg = Package::new();
        let uri = PartUri::new("/word/document.xml").unwrap();
        pkg.add_part(Part::new(uri.clone(), "application/xml", b"<doc/>".to_vec()));

        assert_eq!(pkg.part(&uri).unwrap().data(), b"<doc/>");
        assert_eq!(pkg.content_types().get(&uri), Some("application/xml"));
    }

    #[test]
    fn test_roundtrip_empty() {
        let pkg = Package::new();
        let bytes = pkg.to_bytes(true).unwrap();

        let pkg2 = Package::from_bytes(&bytes).unwrap();
        assert!(pkg2.parts.is_empty());
    }

    #[test]
    fn test_roundtrip_with_parts() {
        let mut pkg = Package::new();

        let doc_uri = PartUri::new("/word/document.xml").unwrap();
        let mut doc_part = Part::new(
            doc_uri.clone(),
            MAIN_DOCUMENT,
            b"<?xml version=\"1.0\"?><document/>".to_vec(),
        );
        doc_part
            .ensure_relationships()
            .add(rel_types::STYLES, "styles.xml");
        pkg.add_part(doc_part);
        pkg.add_part(Part::new(
            PartUri::new("/word/styles.xml").unwrap(),
            "application/xml",
            b"<styles/>".to_vec(),
        ));
        pkg.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");

        let bytes = pkg.to_bytes(false).unwrap();
        let pkg2 = Package::from_bytes(&bytes).unwrap();

        let main = pkg2.main_document_part().unwrap();
        assert_eq!(main.uri(), &doc_uri);
        let styles = pkg2.related_part(main, rel_types::STYLES).unwrap();
        assert_eq!(styles.data(), b"<styles/>");
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut pkg = Package::new();
            for name in ["/word/b.xml", "/word/a.xml"] {
                let uri = PartUri::new(name).unwrap();
                pkg.add_part(Part::new(uri, "application/xml", b"<x/>".to_vec()));
            }
            pkg.to_bytes(true).unwrap()
        };
        assert_eq!(build(), build());
    }
}
