//! Table, row and cell properties

use super::{pick, FontStyle, Overlay};
use crate::color::Color;
use crate::units::Length;

/// Table style
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableStyle {
    pub width: Option<Length>,
    pub alignment: Option<TableAlignment>,
    pub layout: Option<TableLayout>,
    /// Left indent in twips
    pub indent: Option<i32>,
    pub cell_margins: Option<CellMargins>,
    /// Spacing between cells in twips
    pub cell_spacing: Option<u32>,
    pub borders: Option<Borders>,
    pub bg_color: Option<Color>,
    /// Formatting that applies to the first row only
    pub first_row: Option<TableRegionStyle>,
}

impl TableStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = Some(borders);
        self
    }

    pub fn with_alignment(mut self, alignment: TableAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_bg_color(mut self, color: Color) -> Self {
        self.bg_color = Some(color);
        self
    }
}

impl Overlay for TableStyle {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.width, &top.width);
        pick(&mut self.alignment, &top.alignment);
        pick(&mut self.layout, &top.layout);
        pick(&mut self.indent, &top.indent);
        pick(&mut self.cell_margins, &top.cell_margins);
        pick(&mut self.cell_spacing, &top.cell_spacing);
        if let Some(top_borders) = &top.borders {
            match &mut self.borders {
                Some(base) => base.overlay(top_borders),
                None => self.borders = Some(top_borders.clone()),
            }
        }
        pick(&mut self.bg_color, &top.bg_color);
        if let Some(top_first) = &top.first_row {
            match &mut self.first_row {
                Some(base) => base.overlay(top_first),
                None => self.first_row = Some(top_first.clone()),
            }
        }
    }
}

/// Conditional formatting for a table region (e.g. the first row).
///
/// Independent of [`TableStyle`]: it carries only what a region can override.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRegionStyle {
    pub borders: Option<Borders>,
    pub bg_color: Option<Color>,
    pub font: Option<FontStyle>,
}

impl Overlay for TableRegionStyle {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.borders, &top.borders);
        pick(&mut self.bg_color, &top.bg_color);
        if let Some(top_font) = &top.font {
            match &mut self.font {
                Some(base) => base.overlay(top_font),
                None => self.font = Some(top_font.clone()),
            }
        }
    }
}

/// Table alignment on the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TableAlignment {
    /// Parse from OOXML string value
    pub fn parse(s: &str) -> Self {
        match s {
            "center" => TableAlignment::Center,
            "right" | "end" => TableAlignment::Right,
            _ => TableAlignment::Left,
        }
    }

    /// Convert to OOXML string value
    pub fn as_str(&self) -> &'static str {
        match self {
            TableAlignment::Left => "left",
            TableAlignment::Center => "center",
            TableAlignment::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableLayout {
    Fixed,
    Autofit,
}

impl TableLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            TableLayout::Fixed => "fixed",
            TableLayout::Autofit => "autofit",
        }
    }
}

/// Default cell margins in twips
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellMargins {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

/// Border line style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Dotted,
    Dashed,
    Thick,
    None,
}

impl BorderStyle {
    /// OOXML `w:val`
    pub fn as_ooxml(self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Thick => "thick",
            BorderStyle::None => "nil",
        }
    }

    /// ODF `fo:border` line style
    pub fn as_odf(self) -> &'static str {
        match self {
            BorderStyle::Single | BorderStyle::Thick => "solid",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::None => "none",
        }
    }

    /// RTF border control word
    pub fn as_rtf(self) -> &'static str {
        match self {
            BorderStyle::Single => "\\brdrs",
            BorderStyle::Double => "\\brdrdb",
            BorderStyle::Dotted => "\\brdrdot",
            BorderStyle::Dashed => "\\brdrdash",
            BorderStyle::Thick => "\\brdrth",
            BorderStyle::None => "\\brdrnone",
        }
    }

    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "double" => BorderStyle::Double,
            "dotted" => BorderStyle::Dotted,
            "dashed" | "dashSmallGap" => BorderStyle::Dashed,
            "thick" => BorderStyle::Thick,
            "nil" | "none" => BorderStyle::None,
            _ => BorderStyle::Single,
        }
    }
}

/// One border line
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Border {
    pub style: BorderStyle,
    /// Width in eighths of a point
    pub size: u32,
    pub color: Color,
    /// Space between border and content, in points
    pub space: u32,
}

impl Border {
    pub fn single(size: u32, color: Color) -> Self {
        Border {
            style: BorderStyle::Single,
            size,
            color,
            space: 0,
        }
    }

    /// Width in twips (RTF `\brdrw`)
    pub fn width_twips(&self) -> u32 {
        self.size * 20 / 8
    }

    /// ODF `fo:border` shorthand, e.g. `0.05pt solid #000000`
    pub fn to_odf(&self) -> String {
        if self.style == BorderStyle::None {
            return "none".to_string();
        }
        let hex = self.color.to_hex().unwrap_or_else(|| "000000".to_string());
        format!(
            "{}pt {} #{}",
            f64::from(self.size) / 8.0,
            self.style.as_odf(),
            hex.to_ascii_lowercase()
        )
    }
}

/// The six border edges of a table (or four of a cell)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Borders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

impl Borders {
    /// The same border on every edge
    pub fn all(border: Border) -> Self {
        Borders {
            top: Some(border.clone()),
            left: Some(border.clone()),
            bottom: Some(border.clone()),
            right: Some(border.clone()),
            inside_h: Some(border.clone()),
            inside_v: Some(border),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges().all(|(_, b)| b.is_none())
    }

    /// Edges a cell takes from these table borders: the outer edges on the
    /// table's rim, the inside rules elsewhere. The cell sits in `row` of
    /// `rows` and covers grid columns `first..=last` of `columns`.
    pub fn for_cell(
        &self,
        row: usize,
        rows: usize,
        first: usize,
        last: usize,
        columns: usize,
    ) -> Borders {
        let pick = |outer: bool, rim: &Option<Border>, inside: &Option<Border>| {
            if outer {
                rim.clone()
            } else {
                inside.clone()
            }
        };
        Borders {
            top: pick(row == 0, &self.top, &self.inside_h),
            bottom: pick(row + 1 >= rows, &self.bottom, &self.inside_h),
            left: pick(first == 0, &self.left, &self.inside_v),
            right: pick(last + 1 >= columns, &self.right, &self.inside_v),
            inside_h: None,
            inside_v: None,
        }
    }

    /// Edges in OOXML element order, with their OOXML local names
    pub fn edges(&self) -> impl Iterator<Item = (&'static str, Option<&Border>)> {
        [
            ("top", self.top.as_ref()),
            ("left", self.left.as_ref()),
            ("bottom", self.bottom.as_ref()),
            ("right", self.right.as_ref()),
            ("insideH", self.inside_h.as_ref()),
            ("insideV", self.inside_v.as_ref()),
        ]
        .into_iter()
    }
}

impl Overlay for Borders {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.top, &top.top);
        pick(&mut self.left, &top.left);
        pick(&mut self.bottom, &top.bottom);
        pick(&mut self.right, &top.right);
        pick(&mut self.inside_h, &top.inside_h);
        pick(&mut self.inside_v, &top.inside_v);
    }
}

/// Row properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowStyle {
    /// Prevent the row from breaking across pages
    pub cant_split: Option<bool>,
    /// Repeat as header row on every page
    pub header: Option<bool>,
    /// Height is exact rather than a minimum
    pub exact_height: Option<bool>,
}

/// Cell properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellStyle {
    pub v_align: Option<VerticalPosition>,
    pub bg_color: Option<Color>,
    pub borders: Option<Borders>,
    /// Number of grid columns spanned
    pub grid_span: Option<u32>,
    pub v_merge: Option<VerticalMerge>,
    pub no_wrap: Option<bool>,
}

impl Overlay for CellStyle {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.v_align, &top.v_align);
        pick(&mut self.bg_color, &top.bg_color);
        pick(&mut self.borders, &top.borders);
        pick(&mut self.grid_span, &top.grid_span);
        pick(&mut self.v_merge, &top.v_merge);
        pick(&mut self.no_wrap, &top.no_wrap);
    }
}

/// Vertical merge type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalMerge {
    /// Start of a new vertical merge group
    Restart,
    /// Continuation of a vertical merge
    Continue,
}

/// Vertical alignment for table cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalPosition {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalPosition {
    /// Parse from OOXML string value
    pub fn parse(s: &str) -> Self {
        match s {
            "center" => VerticalPosition::Center,
            "bottom" => VerticalPosition::Bottom,
            _ => VerticalPosition::Top,
        }
    }

    /// Convert to OOXML string value
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalPosition::Top => "top",
            VerticalPosition::Center => "center",
            VerticalPosition::Bottom => "bottom",
        }
    }

    /// ODF `style:vertical-align`
    pub fn as_odf(&self) -> &'static str {
        match self {
            VerticalPosition::Top => "top",
            VerticalPosition::Center => "middle",
            VerticalPosition::Bottom => "bottom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_edges_from_table_borders() {
        let outer = Border::single(8, Color::hex("000000").unwrap());
        let inner = Border::single(4, Color::hex("999999").unwrap());
        let table = Borders {
            inside_h: Some(inner.clone()),
            inside_v: Some(inner.clone()),
            ..Borders::all(outer.clone())
        };

        let corner = table.for_cell(0, 2, 0, 0, 2);
        assert_eq!(corner.top, Some(outer.clone()));
        assert_eq!(corner.left, Some(outer.clone()));
        assert_eq!(corner.bottom, Some(inner.clone()));
        assert_eq!(corner.right, Some(inner));

        let spanning = table.for_cell(1, 2, 0, 1, 2);
        assert_eq!(spanning.right, Some(outer.clone()));
        assert_eq!(spanning.bottom, Some(outer));
        assert_eq!(spanning.inside_h, None);
    }

    #[test]
    fn test_first_row_is_independent() {
        let mut style = TableStyle::new().with_bg_color(Color::hex("FFFFFF").unwrap());
        style.first_row = Some(TableRegionStyle {
            bg_color: Some(Color::hex("CCCCCC").unwrap()),
            ..Default::default()
        });

        let first = style.first_row.as_ref().unwrap();
        assert_eq!(first.bg_color, Some(Color::hex("CCCCCC").unwrap()));
        assert!(first.borders.is_none());
        assert_eq!(style.bg_color, Some(Color::hex("FFFFFF").unwrap()));
    }

    #[test]
    fn test_border_overlay_per_edge() {
        let black = Border::single(4, Color::hex("000000").unwrap());
        let red = Border::single(8, Color::hex("FF0000").unwrap());
        let mut base = Borders::all(black.clone());
        base.overlay(&Borders {
            top: Some(red.clone()),
            ..Default::default()
        });
        assert_eq!(base.top, Some(red));
        assert_eq!(base.bottom, Some(black));
    }

    #[test]
    fn test_border_units() {
        let b = Border::single(8, Color::hex("FF0000").unwrap());
        assert_eq!(b.width_twips(), 20);
        assert_eq!(b.to_odf(), "1pt solid #ff0000");
        assert!(Borders::default().is_empty());
    }
}
