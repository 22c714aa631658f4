//! In-memory XML element tree used by the reader

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

use crate::error::{Error, Result};

/// XML node: element or character data
#[derive(Clone, Debug, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// XML element with attributes and children.
///
/// Names keep their prefix (`w:p`); lookups go by local name so that
/// documents using other prefixes for the same namespaces still match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlElement {
    /// Full element name (with prefix, e.g., "w:p")
    pub name: String,
    /// Attributes as (name, unescaped value) pairs
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Parse a whole XML document and return its root element
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let start = e.into_owned();
                    return Self::from_reader(&mut reader, &start);
                }
                Event::Empty(e) => return Self::from_empty(&e),
                Event::Eof => return Err(Error::InvalidDocument("no root element".into())),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Read a complete element from XML reader (starting after the start tag was read)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut element = Self::from_empty(start)?;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let e = e.into_owned();
                    let child = Self::from_reader(reader, &e)?;
                    element.children.push(XmlNode::Element(child));
                }
                Event::Empty(e) => {
                    element.children.push(XmlNode::Element(Self::from_empty(&e)?));
                }
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    if !text.is_empty() {
                        element.children.push(XmlNode::Text(text));
                    }
                }
                Event::CData(c) => {
                    let text = std::str::from_utf8(&c)?.to_string();
                    element.children.push(XmlNode::Text(text));
                }
                Event::End(e) => {
                    if e.name().as_ref() == element.name.as_bytes() {
                        break;
                    }
                }
                Event::Eof => return Err(Error::InvalidDocument("Unexpected EOF".into())),
                _ => {}
            }
            buf.clear();
        }

        Ok(element)
    }

    /// Create from empty element tag
    pub fn from_empty(e: &BytesStart) -> Result<Self> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                attr.unescape_value()?.into_owned(),
            ));
        }

        Ok(Self {
            name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
            attributes,
            children: Vec::new(),
        })
    }

    /// Name without prefix
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    pub fn is(&self, local_name: &str) -> bool {
        self.local_name() == local_name
    }

    /// Attribute by local name
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local(k) == local_name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute by exact (prefixed) name
    pub fn attr_exact(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `w:val` attribute
    pub fn val(&self) -> Option<&str> {
        self.attr("val")
    }

    /// Parse an attribute with `FromStr`
    pub fn attr_parse<T: std::str::FromStr>(&self, local_name: &str) -> Option<T> {
        self.attr(local_name)?.trim().parse().ok()
    }

    /// Child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(local_name))
    }

    /// All child elements with the given local name
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.is(local_name))
    }

    /// `w:val` of a child element
    pub fn child_val(&self, local_name: &str) -> Option<&str> {
        self.child(local_name)?.val()
    }

    /// OOXML toggle property: `Some(true)` for `<w:b/>` or `<w:b w:val="1"/>`,
    /// `Some(false)` for an explicit off value, `None` when absent
    pub fn toggle(&self, local_name: &str) -> Option<bool> {
        self.child(local_name).map(|c| parse_on_off(c.val()))
    }

    /// Concatenated character data of this element and its descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Depth-first search for the first descendant with the given local name
    pub fn find(&self, local_name: &str) -> Option<&XmlElement> {
        for e in self.elements() {
            if e.is(local_name) {
                return Some(e);
            }
            if let Some(found) = e.find(local_name) {
                return Some(found);
            }
        }
        None
    }
}

/// Parse an OOXML on/off value; a missing value means on
pub fn parse_on_off(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => matches!(v, "1" | "true" | "on"),
    }
}

fn local(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}
