//! Sections, headers and footers

use super::element::{Element, Text, Title};
use super::table::Table;
use crate::style::SectionStyle;

/// Which pages a header or footer applies to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderFooterKind {
    #[default]
    Default,
    First,
    Even,
}

impl HeaderFooterKind {
    /// OOXML `w:type`
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderFooterKind::Default => "default",
            HeaderFooterKind::First => "first",
            HeaderFooterKind::Even => "even",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "first" => HeaderFooterKind::First,
            "even" => HeaderFooterKind::Even,
            _ => HeaderFooterKind::Default,
        }
    }
}

/// Header or footer content
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderFooter {
    pub kind: HeaderFooterKind,
    pub elements: Vec<Element>,
}

impl HeaderFooter {
    pub fn new(kind: HeaderFooterKind) -> Self {
        HeaderFooter {
            kind,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }
}

/// A document section
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    pub style: SectionStyle,
    pub elements: Vec<Element>,
    pub headers: Vec<HeaderFooter>,
    pub footers: Vec<HeaderFooter>,
}

impl Section {
    pub fn new(style: SectionStyle) -> Self {
        Section {
            style,
            ..Default::default()
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Text::new(text))
    }

    pub fn add_title(&mut self, text: impl Into<String>, depth: u8) -> &mut Self {
        self.push(Title::new(text, depth))
    }

    pub fn add_table(&mut self, table: Table) -> &mut Self {
        self.push(table)
    }

    pub fn add_page_break(&mut self) -> &mut Self {
        self.elements.push(Element::PageBreak);
        self
    }

    /// Header of the given kind, created on first use
    pub fn header_mut(&mut self, kind: HeaderFooterKind) -> &mut HeaderFooter {
        entry(&mut self.headers, kind)
    }

    /// Footer of the given kind, created on first use
    pub fn footer_mut(&mut self, kind: HeaderFooterKind) -> &mut HeaderFooter {
        entry(&mut self.footers, kind)
    }

    pub fn header(&self, kind: HeaderFooterKind) -> Option<&HeaderFooter> {
        self.headers.iter().find(|h| h.kind == kind)
    }

    pub fn footer(&self, kind: HeaderFooterKind) -> Option<&HeaderFooter> {
        self.footers.iter().find(|f| f.kind == kind)
    }
}

fn entry(list: &mut Vec<HeaderFooter>, kind: HeaderFooterKind) -> &mut HeaderFooter {
    let pos = match list.iter().position(|h| h.kind == kind) {
        Some(pos) => pos,
        None => {
            list.push(HeaderFooter::new(kind));
            list.len() - 1
        }
    };
    &mut list[pos]
}
