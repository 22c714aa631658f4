//! Styles: property bags for fonts, paragraphs, tables, sections and
//! numbering, plus the per-document registry that resolves named styles.
//!
//! Every property is an `Option`; `None` means "not set here" and falls
//! through to the parent style during resolution.

mod font;
mod numbering;
mod paragraph;
mod registry;
mod section;
mod table;

pub use font::{FontStyle, Underline, VerticalAlign};
pub use numbering::{LevelAlignment, NumberFormat, NumberingLevel, NumberingStyle};
pub use paragraph::{
    Alignment, LineSpacing, NumberingRef, ParagraphStyle, TabKind, TabLeader, TabStop,
};
pub use registry::{ConcreteProperties, StyleDefinition, StyleProperties, StyleRegistry};
pub use section::{BreakType, Orientation, SectionStyle};
pub use table::{
    Border, BorderStyle, Borders, CellMargins, CellStyle, RowStyle, TableAlignment, TableLayout,
    TableRegionStyle, TableStyle, VerticalMerge, VerticalPosition,
};

/// Layer `top` over `self`: every property set in `top` replaces the
/// corresponding property of `self`, unset properties are left alone.
pub trait Overlay {
    fn overlay(&mut self, top: &Self);
}

/// Copy `top` into `base` when it is set
pub(crate) fn pick<T: Clone>(base: &mut Option<T>, top: &Option<T>) {
    if top.is_some() {
        base.clone_from(top);
    }
}

/// A style family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleFamily {
    Font,
    Paragraph,
    Table,
    Section,
    Numbering,
}

impl StyleFamily {
    pub const ALL: [StyleFamily; 5] = [
        StyleFamily::Font,
        StyleFamily::Paragraph,
        StyleFamily::Table,
        StyleFamily::Section,
        StyleFamily::Numbering,
    ];
}

/// A style of any family
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    Font(FontStyle),
    Paragraph(ParagraphStyle),
    Table(TableStyle),
    Section(SectionStyle),
    Numbering(NumberingStyle),
}

impl Style {
    pub fn family(&self) -> StyleFamily {
        match self {
            Style::Font(_) => StyleFamily::Font,
            Style::Paragraph(_) => StyleFamily::Paragraph,
            Style::Table(_) => StyleFamily::Table,
            Style::Section(_) => StyleFamily::Section,
            Style::Numbering(_) => StyleFamily::Numbering,
        }
    }
}

impl From<FontStyle> for Style {
    fn from(s: FontStyle) -> Self {
        Style::Font(s)
    }
}

impl From<ParagraphStyle> for Style {
    fn from(s: ParagraphStyle) -> Self {
        Style::Paragraph(s)
    }
}

impl From<TableStyle> for Style {
    fn from(s: TableStyle) -> Self {
        Style::Table(s)
    }
}

impl From<SectionStyle> for Style {
    fn from(s: SectionStyle) -> Self {
        Style::Section(s)
    }
}

impl From<NumberingStyle> for Style {
    fn from(s: NumberingStyle) -> Self {
        Style::Numbering(s)
    }
}

/// Style attached to an element: a registry name, an anonymous inline
/// override, or both (inline wins over the named style).
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRef<P> {
    pub name: Option<String>,
    pub inline: Option<P>,
}

impl<P> Default for StyleRef<P> {
    fn default() -> Self {
        StyleRef {
            name: None,
            inline: None,
        }
    }
}

impl<P> StyleRef<P> {
    /// Reference a registered style by name
    pub fn named(name: impl Into<String>) -> Self {
        StyleRef {
            name: Some(name.into()),
            inline: None,
        }
    }

    /// Anonymous inline properties
    pub fn inline(props: P) -> Self {
        StyleRef {
            name: None,
            inline: Some(props),
        }
    }

    /// Named style with inline overrides on top
    pub fn with_inline(mut self, props: P) -> Self {
        self.inline = Some(props);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.inline.is_none()
    }
}

impl<P> From<P> for StyleRef<P> {
    fn from(props: P) -> Self {
        StyleRef::inline(props)
    }
}
