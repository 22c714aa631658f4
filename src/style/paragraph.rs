//! Paragraph properties

use super::{pick, Overlay};
use crate::color::Color;

/// Paragraph style
///
/// Spacing and indentation values are in twips.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    pub alignment: Option<Alignment>,
    /// Space before, in twips
    pub space_before: Option<u32>,
    /// Space after, in twips
    pub space_after: Option<u32>,
    pub line_spacing: Option<LineSpacing>,
    pub indent_left: Option<i32>,
    pub indent_right: Option<i32>,
    /// First line indent; negative values are a hanging indent
    pub indent_first_line: Option<i32>,
    pub keep_next: Option<bool>,
    pub keep_lines: Option<bool>,
    pub page_break_before: Option<bool>,
    pub widow_control: Option<bool>,
    /// Outline level, 0-based
    pub outline_level: Option<u8>,
    pub shading: Option<Color>,
    pub tabs: Option<Vec<TabStop>>,
    pub numbering: Option<NumberingRef>,
    pub bidi: Option<bool>,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_spacing(mut self, before: u32, after: u32) -> Self {
        self.space_before = Some(before);
        self.space_after = Some(after);
        self
    }

    pub fn with_indent(mut self, left: i32) -> Self {
        self.indent_left = Some(left);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &ParagraphStyle::default()
    }

    /// Hanging indent in twips, when the first line indent is negative
    pub fn hanging(&self) -> Option<u32> {
        self.indent_first_line
            .filter(|v| *v < 0)
            .map(|v| v.unsigned_abs())
    }
}

impl Overlay for ParagraphStyle {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.alignment, &top.alignment);
        pick(&mut self.space_before, &top.space_before);
        pick(&mut self.space_after, &top.space_after);
        pick(&mut self.line_spacing, &top.line_spacing);
        pick(&mut self.indent_left, &top.indent_left);
        pick(&mut self.indent_right, &top.indent_right);
        pick(&mut self.indent_first_line, &top.indent_first_line);
        pick(&mut self.keep_next, &top.keep_next);
        pick(&mut self.keep_lines, &top.keep_lines);
        pick(&mut self.page_break_before, &top.page_break_before);
        pick(&mut self.widow_control, &top.widow_control);
        pick(&mut self.outline_level, &top.outline_level);
        pick(&mut self.shading, &top.shading);
        pick(&mut self.tabs, &top.tabs);
        pick(&mut self.numbering, &top.numbering);
        pick(&mut self.bidi, &top.bidi);
    }
}

/// Horizontal alignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

impl Alignment {
    /// OOXML `w:jc/@w:val`
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
            Alignment::Distribute => "distribute",
        }
    }

    /// ODF `fo:text-align`
    pub fn as_odf(self) -> &'static str {
        match self {
            Alignment::Left => "start",
            Alignment::Center => "center",
            Alignment::Right => "end",
            Alignment::Justify | Alignment::Distribute => "justify",
        }
    }

    /// RTF alignment control word
    pub fn as_rtf(self) -> &'static str {
        match self {
            Alignment::Left => "\\ql",
            Alignment::Center => "\\qc",
            Alignment::Right => "\\qr",
            Alignment::Justify => "\\qj",
            Alignment::Distribute => "\\qd",
        }
    }

    pub fn from_ooxml(value: &str) -> Option<Self> {
        Some(match value {
            "left" | "start" => Alignment::Left,
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" | "justify" => Alignment::Justify,
            "distribute" => Alignment::Distribute,
            _ => return None,
        })
    }
}

/// Line spacing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineSpacing {
    /// Multiple of single spacing (1.0 = single)
    Multiple(f64),
    /// Exact height in twips
    Exact(u32),
    /// Minimum height in twips
    AtLeast(u32),
}

impl LineSpacing {
    /// OOXML `w:spacing` (`w:line`, `w:lineRule`)
    pub fn to_ooxml(self) -> (String, &'static str) {
        match self {
            LineSpacing::Multiple(m) => (((m * 240.0).round() as i64).to_string(), "auto"),
            LineSpacing::Exact(t) => (t.to_string(), "exact"),
            LineSpacing::AtLeast(t) => (t.to_string(), "atLeast"),
        }
    }

    pub fn from_ooxml(line: &str, rule: Option<&str>) -> Option<Self> {
        let value: f64 = line.parse().ok()?;
        Some(match rule {
            Some("exact") => LineSpacing::Exact(value.max(0.0) as u32),
            Some("atLeast") => LineSpacing::AtLeast(value.max(0.0) as u32),
            _ => LineSpacing::Multiple(value / 240.0),
        })
    }
}

/// Tab stop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabStop {
    pub kind: TabKind,
    /// Position in twips
    pub position: i32,
    pub leader: TabLeader,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TabKind {
    Left,
    Center,
    Right,
    Decimal,
    Bar,
    Clear,
}

impl TabKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TabKind::Left => "left",
            TabKind::Center => "center",
            TabKind::Right => "right",
            TabKind::Decimal => "decimal",
            TabKind::Bar => "bar",
            TabKind::Clear => "clear",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "center" => TabKind::Center,
            "right" | "end" => TabKind::Right,
            "decimal" => TabKind::Decimal,
            "bar" => TabKind::Bar,
            "clear" => TabKind::Clear,
            _ => TabKind::Left,
        }
    }
}

/// Tab leader characters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabLeader {
    #[default]
    None,
    Dot,
    Hyphen,
    Underscore,
    Heavy,
    MiddleDot,
}

impl TabLeader {
    pub fn as_str(self) -> &'static str {
        match self {
            TabLeader::None => "none",
            TabLeader::Dot => "dot",
            TabLeader::Hyphen => "hyphen",
            TabLeader::Underscore => "underscore",
            TabLeader::Heavy => "heavy",
            TabLeader::MiddleDot => "middleDot",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "dot" => TabLeader::Dot,
            "hyphen" => TabLeader::Hyphen,
            "underscore" => TabLeader::Underscore,
            "heavy" => TabLeader::Heavy,
            "middleDot" => TabLeader::MiddleDot,
            _ => TabLeader::None,
        }
    }
}

/// Reference to a numbering style and list level
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberingRef {
    /// Registered numbering style name
    pub style: String,
    /// List level, 0-based
    pub level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spacing_ooxml() {
        assert_eq!(
            LineSpacing::Multiple(1.5).to_ooxml(),
            ("360".to_string(), "auto")
        );
        assert_eq!(
            LineSpacing::from_ooxml("240", Some("exact")),
            Some(LineSpacing::Exact(240))
        );
        assert_eq!(
            LineSpacing::from_ooxml("480", None),
            Some(LineSpacing::Multiple(2.0))
        );
    }

    #[test]
    fn test_overlay_and_hanging() {
        let mut base = ParagraphStyle::new().with_spacing(240, 0);
        let mut top = ParagraphStyle::new();
        top.indent_first_line = Some(-360);
        base.overlay(&top);
        assert_eq!(base.space_before, Some(240));
        assert_eq!(base.hanging(), Some(360));
    }

    #[test]
    fn test_alignment_names() {
        assert_eq!(Alignment::from_ooxml("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::Justify.as_odf(), "justify");
        assert_eq!(Alignment::Center.as_rtf(), "\\qc");
    }
}
