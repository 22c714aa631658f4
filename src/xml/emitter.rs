//! Streaming XML emitter over an [`OutputBuffer`]

use super::buffer::OutputBuffer;
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::Write;

/// Streaming XML writer with `start_element` / `write_attribute` /
/// `write_text` / `end_element` calls.
///
/// A start tag stays open until content or the matching end arrives, so
/// an element without content is written as an empty tag.
pub struct XmlEmitter {
    writer: Writer<OutputBuffer>,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
}

impl XmlEmitter {
    pub fn new(buffer: OutputBuffer) -> Self {
        Self {
            writer: Writer::new(buffer),
            pending: None,
            open: Vec::new(),
        }
    }

    /// Emitter writing to memory
    pub fn memory() -> Self {
        Self::new(OutputBuffer::memory())
    }

    /// Write the `<?xml ...?>` declaration
    pub fn start_document(&mut self) -> Result<()> {
        self.writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;
        Ok(())
    }

    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.flush_start()?;
        self.pending = Some(BytesStart::new(name.to_string()));
        self.open.push(name.to_string());
        Ok(())
    }

    /// Add an attribute to the element just started
    pub fn write_attribute(&mut self, key: &str, value: impl Display) -> Result<()> {
        let start = self.pending.as_mut().ok_or_else(|| {
            Error::InvalidDocument(format!("attribute '{}' written outside a start tag", key))
        })?;
        let value = value.to_string();
        start.push_attribute((key, value.as_str()));
        Ok(())
    }

    /// Escaped character data
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.flush_start()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    pub fn end_element(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| Error::InvalidDocument("end_element without open element".into()))?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        Ok(())
    }

    /// `<name a="b" .../>`
    pub fn write_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.start_element(name)?;
        for (key, value) in attributes {
            self.write_attribute(key, value)?;
        }
        self.end_element()
    }

    /// `<name>text</name>`
    pub fn write_element_text(&mut self, name: &str, text: &str) -> Result<()> {
        self.start_element(name)?;
        self.write_text(text)?;
        self.end_element()
    }

    /// `<name val_key="value"/>`, the common OOXML property shape
    pub fn write_val(&mut self, name: &str, val_key: &str, value: impl Display) -> Result<()> {
        self.start_element(name)?;
        self.write_attribute(val_key, value)?;
        self.end_element()
    }

    /// Append already serialized markup, e.g. a fragment produced by
    /// another emitter
    pub fn write_raw(&mut self, markup: &[u8]) -> Result<()> {
        self.flush_start()?;
        self.writer.get_mut().write_all(markup)?;
        Ok(())
    }

    /// Close any open elements and return the written bytes
    pub fn get_data(mut self) -> Result<Vec<u8>> {
        while !self.open.is_empty() {
            self.end_element()?;
        }
        self.writer.into_inner().into_bytes()
    }

    fn flush_start(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(emitter: XmlEmitter) -> String {
        String::from_utf8(emitter.get_data().unwrap()).unwrap()
    }

    #[test]
    fn test_nested_elements() {
        let mut x = XmlEmitter::memory();
        x.start_element("w:p").unwrap();
        x.start_element("w:pPr").unwrap();
        x.write_val("w:jc", "w:val", "center").unwrap();
        x.end_element().unwrap();
        x.write_element_text("w:t", "a < b").unwrap();
        x.end_element().unwrap();

        assert_eq!(
            text(x),
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:t>a &lt; b</w:t></w:p>"#
        );
    }

    #[test]
    fn test_attribute_escaping_and_empty_element() {
        let mut x = XmlEmitter::memory();
        x.write_element("a", &[("href", "x?a=1&b=\"2\"")]).unwrap();
        assert_eq!(text(x), r#"<a href="x?a=1&amp;b=&quot;2&quot;"/>"#);
    }

    #[test]
    fn test_attribute_after_content_fails() {
        let mut x = XmlEmitter::memory();
        x.start_element("a").unwrap();
        x.write_text("t").unwrap();
        assert!(x.write_attribute("k", "v").is_err());
    }

    #[test]
    fn test_get_data_closes_open_elements() {
        let mut x = XmlEmitter::memory();
        x.start_element("a").unwrap();
        x.start_element("b").unwrap();
        x.write_text("t").unwrap();
        assert_eq!(text(x), "<a><b>t</b></a>");
    }

    #[test]
    fn test_raw_fragment_inside_element() {
        let mut inner = XmlEmitter::memory();
        inner.write_element_text("b", "t").unwrap();
        let fragment = inner.get_data().unwrap();

        let mut x = XmlEmitter::memory();
        x.start_element("a").unwrap();
        x.write_attribute("k", "v").unwrap();
        x.write_raw(&fragment).unwrap();
        assert_eq!(text(x), r#"<a k="v"><b>t</b></a>"#);
    }

    #[test]
    fn test_disk_backed_emitter() {
        let mut x = XmlEmitter::new(OutputBuffer::disk(None));
        x.start_document().unwrap();
        x.write_element_text("root", "data").unwrap();
        let out = text(x);
        assert!(out.starts_with("<?xml"));
        assert!(out.ends_with("<root>data</root>"));
    }
}
