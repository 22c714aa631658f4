//! Character (font) properties

use super::{pick, Overlay, ParagraphStyle};
use crate::color::{Color, HighlightColor};

/// Font style
///
/// `size` is stored in points. Writers convert to their own unit (half
/// points for OOXML and RTF, `pt` strings for ODF).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontStyle {
    /// Font family (ASCII / high ANSI)
    pub name: Option<String>,
    /// East Asian font family
    pub east_asia_name: Option<String>,
    /// Size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<Underline>,
    pub strike: Option<bool>,
    pub double_strike: Option<bool>,
    /// Superscript / subscript
    pub vertical_align: Option<VerticalAlign>,
    pub color: Option<Color>,
    pub highlight: Option<HighlightColor>,
    /// Run background fill
    pub shading: Option<Color>,
    pub small_caps: Option<bool>,
    pub all_caps: Option<bool>,
    pub hidden: Option<bool>,
    /// Character spacing in twips
    pub spacing: Option<i32>,
    /// Kerning threshold in points
    pub kerning: Option<f64>,
    pub rtl: Option<bool>,
    /// Language tag, e.g. `en-US`
    pub lang: Option<String>,
    /// Paragraph half of a combined style (headings carry both)
    pub paragraph: Option<Box<ParagraphStyle>>,
}

impl FontStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn with_size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn with_paragraph(mut self, paragraph: ParagraphStyle) -> Self {
        self.paragraph = Some(Box::new(paragraph));
        self
    }

    /// The embedded paragraph half, if any
    pub fn paragraph_part(&self) -> Option<&ParagraphStyle> {
        self.paragraph.as_deref()
    }

    /// A copy without the embedded paragraph half
    pub fn font_only(&self) -> FontStyle {
        FontStyle {
            paragraph: None,
            ..self.clone()
        }
    }

    /// True when no character property is set
    pub fn is_empty(&self) -> bool {
        self.font_only() == FontStyle::default()
    }

    /// Size in half points, as OOXML `w:sz` and RTF `\fs` expect
    pub fn half_points(&self) -> Option<u32> {
        self.size.map(|s| (s * 2.0).round().max(0.0) as u32)
    }
}

impl Overlay for FontStyle {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.name, &top.name);
        pick(&mut self.east_asia_name, &top.east_asia_name);
        pick(&mut self.size, &top.size);
        pick(&mut self.bold, &top.bold);
        pick(&mut self.italic, &top.italic);
        pick(&mut self.underline, &top.underline);
        pick(&mut self.strike, &top.strike);
        pick(&mut self.double_strike, &top.double_strike);
        pick(&mut self.vertical_align, &top.vertical_align);
        pick(&mut self.color, &top.color);
        pick(&mut self.highlight, &top.highlight);
        pick(&mut self.shading, &top.shading);
        pick(&mut self.small_caps, &top.small_caps);
        pick(&mut self.all_caps, &top.all_caps);
        pick(&mut self.hidden, &top.hidden);
        pick(&mut self.spacing, &top.spacing);
        pick(&mut self.kerning, &top.kerning);
        pick(&mut self.rtl, &top.rtl);
        pick(&mut self.lang, &top.lang);
        if let Some(top_para) = &top.paragraph {
            match &mut self.paragraph {
                Some(base) => base.overlay(top_para),
                None => self.paragraph = Some(top_para.clone()),
            }
        }
    }
}

/// Underline type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Underline {
    Single,
    Double,
    Thick,
    Dotted,
    Dash,
    Wave,
    Words,
    None,
}

impl Underline {
    /// OOXML `w:u/@w:val`
    pub fn as_str(self) -> &'static str {
        match self {
            Underline::Single => "single",
            Underline::Double => "double",
            Underline::Thick => "thick",
            Underline::Dotted => "dotted",
            Underline::Dash => "dash",
            Underline::Wave => "wave",
            Underline::Words => "words",
            Underline::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "single" => Underline::Single,
            "double" => Underline::Double,
            "thick" => Underline::Thick,
            "dotted" | "dottedHeavy" => Underline::Dotted,
            "dash" | "dashedHeavy" | "dashLong" => Underline::Dash,
            "wave" | "wavyHeavy" | "wavyDouble" => Underline::Wave,
            "words" => Underline::Words,
            "none" => Underline::None,
            _ => return None,
        })
    }
}

/// Vertical text position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Baseline,
    Superscript,
    Subscript,
}

impl VerticalAlign {
    /// OOXML `w:vertAlign/@w:val`
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalAlign::Baseline => "baseline",
            VerticalAlign::Superscript => "superscript",
            VerticalAlign::Subscript => "subscript",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "baseline" => Some(VerticalAlign::Baseline),
            "superscript" => Some(VerticalAlign::Superscript),
            "subscript" => Some(VerticalAlign::Subscript),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_keeps_unset() {
        let mut base = FontStyle::new().with_name("Arial").with_size(10.0);
        base.overlay(&FontStyle::new().bold().with_size(14.0));
        assert_eq!(base.name.as_deref(), Some("Arial"));
        assert_eq!(base.size, Some(14.0));
        assert_eq!(base.bold, Some(true));
        assert_eq!(base.italic, None);
    }

    #[test]
    fn test_half_points() {
        assert_eq!(FontStyle::new().with_size(10.5).half_points(), Some(21));
        assert_eq!(FontStyle::new().half_points(), None);
    }

    #[test]
    fn test_paragraph_half_split() {
        let mut para = ParagraphStyle::default();
        para.space_after = Some(120);
        let heading = FontStyle::new().bold().with_paragraph(para);

        assert_eq!(heading.paragraph_part().and_then(|p| p.space_after), Some(120));
        assert!(heading.font_only().paragraph.is_none());
        assert!(!heading.is_empty());
        assert!(FontStyle::new().with_paragraph(ParagraphStyle::default()).is_empty());
    }
}
