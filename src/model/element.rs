//! Content elements

use super::field::Field;
use super::image::Image;
use super::table::Table;
use crate::style::{FontStyle, ParagraphStyle, StyleRef, TabLeader};
use chrono::{DateTime, Utc};

/// One node of content
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Text(Text),
    TextRun(TextRun),
    Table(Table),
    Image(Image),
    Field(Field),
    Link(Link),
    Title(Title),
    ListItem(ListItem),
    PageBreak,
    TextBreak,
    Bookmark(Bookmark),
    Footnote(NoteReference),
    Endnote(NoteReference),
    Toc(Toc),
    Tracked(Tracked),
}

/// Variant tag of [`Element`], used as the dispatch key by writers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Text,
    TextRun,
    Table,
    Image,
    Field,
    Link,
    Title,
    ListItem,
    PageBreak,
    TextBreak,
    Bookmark,
    Footnote,
    Endnote,
    Toc,
    Tracked,
}

impl ElementKind {
    pub const ALL: [ElementKind; 15] = [
        ElementKind::Text,
        ElementKind::TextRun,
        ElementKind::Table,
        ElementKind::Image,
        ElementKind::Field,
        ElementKind::Link,
        ElementKind::Title,
        ElementKind::ListItem,
        ElementKind::PageBreak,
        ElementKind::TextBreak,
        ElementKind::Bookmark,
        ElementKind::Footnote,
        ElementKind::Endnote,
        ElementKind::Toc,
        ElementKind::Tracked,
    ];
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::TextRun(_) => ElementKind::TextRun,
            Element::Table(_) => ElementKind::Table,
            Element::Image(_) => ElementKind::Image,
            Element::Field(_) => ElementKind::Field,
            Element::Link(_) => ElementKind::Link,
            Element::Title(_) => ElementKind::Title,
            Element::ListItem(_) => ElementKind::ListItem,
            Element::PageBreak => ElementKind::PageBreak,
            Element::TextBreak => ElementKind::TextBreak,
            Element::Bookmark(_) => ElementKind::Bookmark,
            Element::Footnote(_) => ElementKind::Footnote,
            Element::Endnote(_) => ElementKind::Endnote,
            Element::Toc(_) => ElementKind::Toc,
            Element::Tracked(_) => ElementKind::Tracked,
        }
    }

    /// Plain text of this element and its children
    pub fn text(&self) -> String {
        match self {
            Element::Text(t) => t.text.clone(),
            Element::TextRun(r) => r.text(),
            Element::Title(t) => t.text.clone(),
            Element::ListItem(l) => l.text(),
            Element::Link(l) => l.text.clone(),
            Element::Field(f) => f.text.clone().unwrap_or_default(),
            Element::Tracked(t) => t.element.text(),
            Element::Table(t) => t
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .map(|c| c.text())
                .collect::<Vec<_>>()
                .join("\t"),
            Element::TextBreak => "\n".to_string(),
            _ => String::new(),
        }
    }

    /// True for elements that occupy a paragraph of their own
    pub fn is_block(&self) -> bool {
        match self {
            Element::Tracked(t) => t.element.is_block(),
            Element::Text(_)
            | Element::TextRun(_)
            | Element::Table(_)
            | Element::Title(_)
            | Element::ListItem(_)
            | Element::PageBreak
            | Element::TextBreak
            | Element::Toc(_) => true,
            Element::Image(_)
            | Element::Field(_)
            | Element::Link(_)
            | Element::Bookmark(_)
            | Element::Footnote(_)
            | Element::Endnote(_) => false,
        }
    }
}

impl From<Text> for Element {
    fn from(t: Text) -> Self {
        Element::Text(t)
    }
}

impl From<TextRun> for Element {
    fn from(r: TextRun) -> Self {
        Element::TextRun(r)
    }
}

impl From<Table> for Element {
    fn from(t: Table) -> Self {
        Element::Table(t)
    }
}

impl From<Title> for Element {
    fn from(t: Title) -> Self {
        Element::Title(t)
    }
}

impl From<Field> for Element {
    fn from(f: Field) -> Self {
        Element::Field(f)
    }
}

impl From<Image> for Element {
    fn from(i: Image) -> Self {
        Element::Image(i)
    }
}

impl From<Link> for Element {
    fn from(l: Link) -> Self {
        Element::Link(l)
    }
}

impl From<ListItem> for Element {
    fn from(l: ListItem) -> Self {
        Element::ListItem(l)
    }
}

impl From<Bookmark> for Element {
    fn from(b: Bookmark) -> Self {
        Element::Bookmark(b)
    }
}

impl From<Tracked> for Element {
    fn from(t: Tracked) -> Self {
        Element::Tracked(t)
    }
}

/// Styled text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub text: String,
    pub font: Option<StyleRef<FontStyle>>,
    pub paragraph: Option<StyleRef<ParagraphStyle>>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_font(mut self, font: impl Into<StyleRef<FontStyle>>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_paragraph(mut self, paragraph: impl Into<StyleRef<ParagraphStyle>>) -> Self {
        self.paragraph = Some(paragraph.into());
        self
    }
}

/// A paragraph made of several inline elements
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRun {
    pub elements: Vec<Element>,
    pub paragraph: Option<StyleRef<ParagraphStyle>>,
}

impl TextRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, paragraph: impl Into<StyleRef<ParagraphStyle>>) -> Self {
        self.paragraph = Some(paragraph.into());
        self
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn text(&self) -> String {
        self.elements.iter().map(Element::text).collect()
    }
}

/// Heading. Depth 0 is the document title, 1..=9 are heading levels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Title {
    pub text: String,
    pub depth: u8,
    /// Overrides on top of the `Heading{depth}` / `Title` style
    pub style: Option<StyleRef<FontStyle>>,
}

impl Title {
    pub fn new(text: impl Into<String>, depth: u8) -> Self {
        Title {
            text: text.into(),
            depth,
            style: None,
        }
    }

    /// Registry name of the style for this depth
    pub fn style_name(&self) -> String {
        title_style_name(self.depth)
    }
}

/// `Title` for depth 0, `Heading{depth}` otherwise
pub fn title_style_name(depth: u8) -> String {
    if depth == 0 {
        "Title".to_string()
    } else {
        format!("Heading{}", depth)
    }
}

/// Numbered or bulleted paragraph
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListItem {
    pub elements: Vec<Element>,
    /// List level, 0-based
    pub depth: u8,
    /// Registered numbering style name
    pub numbering: Option<String>,
    pub paragraph: Option<StyleRef<ParagraphStyle>>,
}

impl ListItem {
    pub fn new(text: impl Into<String>, depth: u8) -> Self {
        ListItem {
            elements: vec![Element::Text(Text::new(text))],
            depth,
            ..Default::default()
        }
    }

    pub fn with_numbering(mut self, numbering: impl Into<String>) -> Self {
        self.numbering = Some(numbering.into());
        self
    }

    pub fn text(&self) -> String {
        self.elements.iter().map(Element::text).collect()
    }
}

/// Hyperlink
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Link {
    /// URL, or bookmark name when `internal`
    pub target: String,
    pub text: String,
    pub internal: bool,
    pub font: Option<StyleRef<FontStyle>>,
}

impl Link {
    pub fn new(target: impl Into<String>, text: impl Into<String>) -> Self {
        Link {
            target: target.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn internal(bookmark: impl Into<String>, text: impl Into<String>) -> Self {
        Link {
            internal: true,
            ..Link::new(bookmark, text)
        }
    }
}

/// Named position in the document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
}

impl Bookmark {
    pub fn new(name: impl Into<String>) -> Self {
        Bookmark { name: name.into() }
    }
}

/// Reference to a footnote or endnote body stored on the document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteReference {
    pub id: u32,
}

/// Table of contents built from the document's titles
#[derive(Clone, Debug, PartialEq)]
pub struct Toc {
    pub font: Option<StyleRef<FontStyle>>,
    pub tab_leader: TabLeader,
    /// Right tab position in twips
    pub tab_position: i32,
    /// Indent per level in twips
    pub indent: i32,
    pub min_depth: u8,
    pub max_depth: u8,
}

impl Default for Toc {
    fn default() -> Self {
        Toc {
            font: None,
            tab_leader: TabLeader::Dot,
            tab_position: 9062,
            indent: 200,
            min_depth: 1,
            max_depth: 9,
        }
    }
}

impl Toc {
    pub fn includes(&self, depth: u8) -> bool {
        depth >= self.min_depth && depth <= self.max_depth
    }
}

/// Revision kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Delete,
}

/// Revision metadata
#[derive(Clone, Debug, PartialEq)]
pub struct TrackChange {
    pub kind: ChangeKind,
    pub author: String,
    pub date: Option<DateTime<Utc>>,
}

impl TrackChange {
    pub fn new(kind: ChangeKind, author: impl Into<String>) -> Self {
        TrackChange {
            kind,
            author: author.into(),
            date: None,
        }
    }

    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// An element carrying revision metadata
#[derive(Clone, Debug, PartialEq)]
pub struct Tracked {
    pub change: TrackChange,
    pub element: Box<Element>,
}

impl Tracked {
    pub fn new(change: TrackChange, element: impl Into<Element>) -> Self {
        Tracked {
            change,
            element: Box::new(element.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Element::PageBreak.kind(), ElementKind::PageBreak);
        assert_eq!(Element::Text(Text::new("a")).kind(), ElementKind::Text);
        let tracked = Tracked::new(TrackChange::new(ChangeKind::Insert, "me"), Text::new("x"));
        assert_eq!(Element::Tracked(tracked).kind(), ElementKind::Tracked);
    }

    #[test]
    fn test_bookmark_and_tracked_convert_into_elements() {
        let mut run = TextRun::new();
        run.push(Bookmark::new("top")).push(Tracked::new(
            TrackChange::new(ChangeKind::Delete, "me"),
            Text::new("old"),
        ));
        assert_eq!(run.elements[0], Element::Bookmark(Bookmark::new("top")));
        assert_eq!(run.elements[1].kind(), ElementKind::Tracked);
    }

    #[test]
    fn test_text_collects_children() {
        let mut run = TextRun::new();
        run.push(Text::new("Hello, "))
            .push(Link::new("https://example.com", "world"));
        assert_eq!(Element::TextRun(run).text(), "Hello, world");
    }

    #[test]
    fn test_title_style_names() {
        assert_eq!(Title::new("Doc", 0).style_name(), "Title");
        assert_eq!(Title::new("Intro", 2).style_name(), "Heading2");
    }
}
